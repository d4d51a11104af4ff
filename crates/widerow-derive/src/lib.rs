use proc_macro::TokenStream;

mod field_values;

/// Derive `widerow::traits::FieldValues` for a named-field struct.
///
/// Fields opt in with `#[column("col_name")]`, optionally qualified:
/// `#[column("col_name,key")]`, `#[column("col_name,sort")]`, or
/// `#[column("_,traverse")]` to splice a sub-record's columns in
/// place. Fields without the attribute are not persisted.
#[proc_macro_derive(FieldValues, attributes(column))]
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    field_values::derive_field_values(input.into()).into()
}
