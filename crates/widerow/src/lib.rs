//! widerow — a typed DAO layer for wide-column stores.
//!
//! Annotated record structs map to rows keyed by partition and
//! clustering keys; per-type field metadata drives column lists, key
//! predicates, and value bindings for every operation. Statement
//! execution is delegated to a [`store::Store`] collaborator.
//!
//! ## Crate layout
//! - `core` (re-exported at the root): value union, field metadata,
//!   extraction, CQL assembly, store traits, and the `DataAccess`
//!   façade.
//! - `derive`: the `#[derive(FieldValues)]` macro with `#[column]`
//!   field attributes.

pub use widerow_core::*;
pub use widerow_derive::FieldValues;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///
/// The vocabulary an application needs to declare records and run the
/// operation catalog.
///

pub mod prelude {
    pub use crate::{
        access::{AccessConfig, DataAccess, RowIter},
        cql::{Consistency, Filter, RangeBound, Statement},
        error::{not_found_ok, Error},
        model::{KeyRole, RawField, RoleFilter},
        store::{RowCursor, Store},
        traits::{FieldValues, Record},
        value::{FieldValue, Timestamp, Value},
    };
    pub use widerow_derive::FieldValues;
}
