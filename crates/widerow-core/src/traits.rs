use crate::{model::RawField, value::Value};

///
/// FieldValues
///
/// Per-type column surface: the static raw field table plus by-name
/// access to current field values. Derived via
/// `#[derive(FieldValues)]` with `#[column("...")]` attributes;
/// traversed sub-records delegate by name.
///

pub trait FieldValues {
    /// Raw annotation table in declaration order. Fields without a
    /// `column` annotation do not appear.
    fn raw_fields() -> &'static [RawField]
    where
        Self: Sized;

    /// Current value of the named field, `None` when the name is not
    /// a persisted field of this type.
    fn get_value(&self, field: &str) -> Option<Value>;

    /// Write a scanned value back into the named field. `Value::Null`
    /// resets the field to its zero value; a variant mismatch leaves
    /// the field untouched. Returns whether the field exists.
    fn set_value(&mut self, field: &str, value: Value) -> bool;
}

///
/// Record
///
/// The contract a persisted type implements on top of its derived
/// field surface: the table it lives in, plus optional lifecycle
/// hooks. The hooks are an explicit capability set; a type overrides
/// exactly the ones it wants and the defaults cost nothing.
///

pub trait Record: FieldValues {
    fn table_name(&self) -> &str;

    /// Runs before every save variant issues its write.
    fn pre_save(&mut self) {}

    /// Runs after a whole-record save. Partial saves run it only when
    /// [`crate::access::AccessConfig::partial_save_post_save`] is set.
    fn post_save(&mut self) {}

    /// Runs after every successful population from a read, including
    /// partition and full iteration.
    fn post_load(&mut self) {}
}
