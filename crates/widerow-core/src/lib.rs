//! Core runtime for widerow: the value union, field metadata
//! classifier and cache, role-filtered extraction, CQL assembly, the
//! store collaborator traits, and the `DataAccess` façade.

pub mod access;
pub mod cql;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod model;
pub mod store;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;
