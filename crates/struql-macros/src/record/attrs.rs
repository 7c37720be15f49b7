//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[struql(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[struql(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    /// Leave this field out of the record.
    pub skip: bool,
    /// Custom column name (default: field name).
    pub rename: Option<String>,
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                // rename = "custom_name"
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        let name = s.value();
                        if name.is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(name);
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown struql attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[struql(...)]` attributes from a field's attributes.
///
/// Several `#[struql(...)]` attributes on one field are merged.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in attrs {
        if attr.path().is_ident("struql") {
            let parsed = attr.parse_args::<FieldAttr>()?;
            merged.skip |= parsed.skip;
            if parsed.rename.is_some() {
                merged.rename = parsed.rename;
            }
        }
    }
    Ok(merged)
}
