use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr};

// derive_field_values
pub fn derive_field_values(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = if let Data::Struct(data) = &input.data {
        if let Fields::Named(named) = &data.fields {
            &named.named
        } else {
            let err = Error::new_spanned(
                &data.fields,
                "FieldValues can only be derived for structs with named fields",
            );
            return err.to_compile_error();
        }
    } else {
        let err = Error::new_spanned(
            &input.ident,
            "FieldValues can only be derived for structs with named fields",
        );
        return err.to_compile_error();
    };

    // Annotated fields only; unannotated fields are not persisted.
    let mut annotated = Vec::new();
    for field in fields {
        match column_spec(field) {
            Ok(Some(spec)) => annotated.push((field, spec)),
            Ok(None) => {}
            Err(err) => return err.to_compile_error(),
        }
    }

    let raw_entries = annotated.iter().map(|(field, spec)| {
        let field_ident = field.ident.as_ref().expect("named field");
        let field_name = field_ident.to_string();
        let field_ty = &field.ty;

        // Only the traverse wiring is decided here; role parsing and
        // fault handling stay in the runtime classifier.
        let embed = if is_traverse(spec) {
            quote! {
                Some(<#field_ty as ::widerow::traits::FieldValues>::raw_fields)
            }
        } else {
            quote! { None }
        };

        quote! {
            ::widerow::model::RawField {
                name: #field_name,
                spec: #spec,
                embed: #embed,
            },
        }
    });

    let plain: Vec<_> = annotated
        .iter()
        .filter(|(_, spec)| !is_traverse(spec))
        .map(|(field, _)| field.ident.as_ref().expect("named field"))
        .collect();
    let embedded: Vec<_> = annotated
        .iter()
        .filter(|(_, spec)| is_traverse(spec))
        .map(|(field, _)| field.ident.as_ref().expect("named field"))
        .collect();

    let get_arms = plain.iter().map(|field_ident| {
        let field_name = field_ident.to_string();
        quote! {
            #field_name => Some(FieldValue::to_value(&self.#field_ident)),
        }
    });

    let set_arms = plain.iter().map(|field_ident| {
        let field_name = field_ident.to_string();
        quote! {
            #field_name => {
                match value {
                    Value::Null => self.#field_ident = ::core::default::Default::default(),
                    other => {
                        if let Some(parsed) = FieldValue::from_value(other) {
                            self.#field_ident = parsed;
                        }
                    }
                }
                true
            }
        }
    });

    let get_delegates = embedded.iter().map(|field_ident| {
        quote! {
            if let Some(found) =
                ::widerow::traits::FieldValues::get_value(&self.#field_ident, field)
            {
                return Some(found);
            }
        }
    });

    let set_delegates = embedded.iter().map(|field_ident| {
        quote! {
            if ::widerow::traits::FieldValues::set_value(
                &mut self.#field_ident,
                field,
                value.clone(),
            ) {
                return true;
            }
        }
    });

    quote! {
        impl #impl_generics ::widerow::traits::FieldValues for #ident #ty_generics #where_clause {
            fn raw_fields() -> &'static [::widerow::model::RawField] {
                const FIELDS: &[::widerow::model::RawField] = &[
                    #(#raw_entries)*
                ];
                FIELDS
            }

            fn get_value(&self, field: &str) -> Option<::widerow::value::Value> {
                use ::widerow::value::{FieldValue, Value};

                match field {
                    #(#get_arms)*
                    _ => {
                        #(#get_delegates)*
                        None
                    }
                }
            }

            fn set_value(&mut self, field: &str, value: ::widerow::value::Value) -> bool {
                use ::widerow::value::{FieldValue, Value};

                match field {
                    #(#set_arms)*
                    _ => {
                        #(#set_delegates)*
                        false
                    }
                }
            }
        }
    }
}

/// The `#[column("...")]` annotation text, if present.
fn column_spec(field: &Field) -> syn::Result<Option<String>> {
    for attr in &field.attrs {
        if attr.path().is_ident("column") {
            let lit: LitStr = attr.parse_args()?;
            return Ok(Some(lit.value()));
        }
    }
    Ok(None)
}

fn is_traverse(spec: &str) -> bool {
    spec.splitn(2, ',').nth(1) == Some("traverse")
}
