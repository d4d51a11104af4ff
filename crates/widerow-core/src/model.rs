//! Field metadata model.
//!
//! The derive macro emits one static [`RawField`] table per record
//! type; the classifier in [`crate::metadata`] turns that table into
//! an ordered [`FieldModel`] sequence, which every operation consumes.

///
/// RawField
///
/// Unparsed per-field annotation as declared on the struct.
/// `spec` is the annotation text verbatim: a column name, optionally
/// followed by a comma and a role qualifier (`key`, `sort`,
/// `traverse`). Parsing happens at classification time so a bad
/// qualifier faults the whole type, never the macro expansion.
///

#[derive(Clone, Copy, Debug)]
pub struct RawField {
    /// Struct field name, declaration order preserved by the macro.
    pub name: &'static str,
    /// Annotation text: `"col_name"` or `"col_name,qualifier"`.
    pub spec: &'static str,
    /// Raw field table of the field's own type, wired by the macro
    /// when the annotation requests traversal into a sub-record.
    pub embed: Option<fn() -> &'static [RawField]>,
}

///
/// KeyRole
///
/// Role a column plays in row identity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyRole {
    /// Plain data column.
    Ordinary,
    /// Determines the physical partition a row lives in.
    PartitionKey,
    /// Orders rows within a partition.
    ClusteringKey,
}

impl KeyRole {
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::PartitionKey | Self::ClusteringKey)
    }
}

///
/// RoleFilter
///
/// Descriptor subset selector used by extraction and column listing.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoleFilter {
    /// Every descriptor.
    Any,
    /// Partition and clustering keys.
    AnyKey,
    Ordinary,
    PartitionKey,
    ClusteringKey,
}

impl RoleFilter {
    /// Selection rule shared by filters, column lists, and field lists.
    #[must_use]
    pub const fn matches(self, role: KeyRole) -> bool {
        match self {
            Self::Any => true,
            Self::AnyKey => role.is_key(),
            Self::Ordinary => matches!(role, KeyRole::Ordinary),
            Self::PartitionKey => matches!(role, KeyRole::PartitionKey),
            Self::ClusteringKey => matches!(role, KeyRole::ClusteringKey),
        }
    }
}

///
/// FieldModel
///
/// One classified field descriptor. Immutable once computed; the
/// ordered sequence per type is the authority for column order, and
/// scan results are written back positionally in that same order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field ordinal within its declaring struct.
    pub pos: usize,
    /// Struct field name.
    pub name: &'static str,
    /// Persisted column name.
    pub column: &'static str,
    pub role: KeyRole,
}
