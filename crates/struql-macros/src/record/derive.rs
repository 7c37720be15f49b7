//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates `ToNode` and `Record` implementations and column
//! name constants for structs with named fields.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_field_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut entries: Vec<TokenStream> = Vec::new();
    let mut column_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let column = attrs
            .rename
            .unwrap_or_else(|| unraw(&field_name.to_string()));
        let const_name = format_ident!("{}", to_screaming_snake_case(&column));

        column_constants.push(quote! {
            /// Column name constant for type-safe filters.
            pub const #const_name: &'static str = #column;
        });

        entries.push(quote! {
            (
                ::std::string::String::from(#column),
                ::struql::ToNode::to_node(&self.#field_name),
            )
        });
    }

    // Every type parameter must itself convert into a node.
    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = generics.make_where_clause();
        for param in type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::struql::ToNode));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#column_constants)*
        }

        impl #impl_generics ::struql::ToNode for #struct_name #ty_generics #where_clause {
            fn to_node(&self) -> ::struql::Node {
                ::struql::Node::Record(::std::vec![
                    #(#entries),*
                ])
            }
        }

        impl #impl_generics ::struql::Record for #struct_name #ty_generics #where_clause {}
    };

    Ok(expanded)
}

/// Strip the `r#` prefix of raw identifiers.
fn unraw(name: &str) -> String {
    name.strip_prefix("r#").unwrap_or(name).to_string()
}

/// Convert a column name to SCREAMING_SNAKE_CASE.
///
/// Separators that cannot appear in an identifier become `_`.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c.is_alphanumeric() {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_lowercase();
        } else {
            result.push('_');
            prev_was_lower = false;
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}
