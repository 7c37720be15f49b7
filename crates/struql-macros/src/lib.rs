//! Proc macros for struql.
//!
//! # Available Macros
//!
//! - [`Record`] - Expose a struct with named fields as a struql record
//!
//! The generated code refers to the `struql` crate by absolute path, so it
//! is meant to be used through the `derive` feature of `struql`, which
//! re-exports this macro as `struql::Record`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `ToNode` and `Record` for structs with named fields.
///
/// Every field is converted with its own `ToNode` impl, in declaration
/// order: scalars become cells, nested `Record` types become dotted columns,
/// and `Vec`s of records expand into one row per element.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Leave this field out of the table |
/// | `rename = "..."` | Use a custom column name |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Column name constants (e.g., `Order::CUSTOMER`, `Order::LINES`)
/// 2. Implementations of `struql::ToNode` and `struql::Record`
///
/// Type parameters receive a `struql::ToNode` bound.
///
/// # Example
///
/// ```ignore
/// use struql::{Query, Record, Struql};
///
/// #[derive(Record)]
/// struct Order {
///     customer: String,
///     #[struql(rename = "items")]
///     lines: Vec<Line>,
///     #[struql(skip)]
///     cache_key: u64,
/// }
///
/// #[derive(Record)]
/// struct Line {
///     sku: String,
///     qty: i64,
/// }
///
/// let table = Struql::new(&order)?;
/// let rows = Query::new().gt("items.qty", 3i64).run(&table)?;
/// ```
#[proc_macro_derive(Record, attributes(struql))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
