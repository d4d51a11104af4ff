//! Role-filtered value extraction and positional write-back.

use crate::{
    cql::Filter,
    model::{FieldModel, RoleFilter},
    traits::FieldValues,
    value::Value,
};

/// Pull current field values as column/value filters.
///
/// A descriptor passes when the role filter matches and, if `names`
/// is non-empty, its field name is listed. Key inclusion for partial
/// updates is achieved by calling this twice: `AnyKey` with no
/// allowlist, then `Ordinary` with one.
#[must_use]
pub fn filters(
    models: &[FieldModel],
    rec: &impl FieldValues,
    filter: RoleFilter,
    names: &[&str],
) -> Vec<Filter> {
    let mut out = Vec::with_capacity(models.len());
    for model in models {
        if !filter.matches(model.role) {
            continue;
        }
        if !names.is_empty() && !names.contains(&model.name) {
            continue;
        }
        if let Some(value) = rec.get_value(model.name) {
            out.push(Filter::new(model.column, value));
        }
    }
    out
}

/// Column names of the descriptors matching `filter`, in order.
#[must_use]
pub fn col_names(models: &[FieldModel], filter: RoleFilter) -> Vec<&'static str> {
    models
        .iter()
        .filter(|m| filter.matches(m.role))
        .map(|m| m.column)
        .collect()
}

/// Field names of the descriptors matching `filter`, in order.
#[must_use]
pub fn field_names(models: &[FieldModel], filter: RoleFilter) -> Vec<&'static str> {
    models
        .iter()
        .filter(|m| filter.matches(m.role))
        .map(|m| m.name)
        .collect()
}

/// Write scanned values back into the record by position-matched
/// name. A `Value::Null` at a position resets that field to its zero
/// value; fields not named keep their prior value.
pub fn populate(rec: &mut impl FieldValues, names: &[&'static str], values: Vec<Value>) {
    for (name, value) in names.iter().zip(values) {
        rec.set_value(name, value);
    }
}
