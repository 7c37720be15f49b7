//! struql - flatten nested Rust records into rows and filter them.
//!
//! struql takes one nested record (structs holding structs, sequences of
//! structs, and sequences of scalars) and denormalizes it into a flat table,
//! the way a SQL `JOIN` flattens parent and child tables. The table can then
//! be scanned with typed predicates, like a single-table `WHERE` clause.
//!
//! # Quick Start
//!
//! ```rust
//! use struql::{Query, Record, Struql};
//!
//! #[derive(Record)]
//! struct Team {
//!     name: String,
//!     members: Vec<Member>,
//! }
//!
//! #[derive(Record)]
//! struct Member {
//!     login: String,
//!     commits: i64,
//!     langs: Vec<String>,
//! }
//!
//! let team = Team {
//!     name: "core".into(),
//!     members: vec![
//!         Member { login: "ana".into(), commits: 120, langs: vec!["rust".into()] },
//!         Member { login: "ben".into(), commits: 8, langs: vec!["go".into(), "rust".into()] },
//!     ],
//! };
//!
//! // One row per member, each carrying the team's own columns.
//! let table = Struql::new(&team).unwrap();
//! assert_eq!(table.len(), 2);
//!
//! let rows = Query::new()
//!     .exists("members.langs", "rust")
//!     .gt("members.commits", 100i64)
//!     .run(&table)
//!     .unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].get("members.login").unwrap().value().as_str(), Some("ana"));
//! ```
//!
//! # Flattening Rules
//!
//! | Field holds | Result |
//! |-------------|--------|
//! | Scalar | One column, written into every current row |
//! | Nested record | Columns named `parent.child`, same rows |
//! | Sequence of records | One row per element (per current row), ancestor columns copied |
//! | Sequence of scalars | One column holding the whole sequence |
//! | Empty sequence | One column holding an empty sequence |
//! | Anything else | Skipped |
//!
//! Sibling and nested record sequences multiply: two sequences of 2 and 3
//! elements yield 6 rows.
//!
//! # Operations
//!
//! | Operation | Field kinds |
//! |-----------|-------------|
//! | `Equal`, `NotEqual` | any |
//! | `Greater`, `Lesser` | string, i32, i64, isize, f32, f64 |
//! | `BeginWith`, `EndWith` | string |
//! | `Exists` | sequence (comparand is one element) |
//! | `In` | scalar (comparand is a sequence) |
//!
//! No coercion happens between representations: an `i32` field is compared
//! against `i32` comparands only.
//!
//! # Features
//!
//! - `derive` (default): re-exports `#[derive(Record)]` from `struql-macros`.

extern crate self as struql;

mod error;
mod filter;
mod flatten;
mod node;
mod op;
mod query;
mod row;
mod table;
mod value;

// Re-export public API
pub use error::{Result, StruqlError};
pub use filter::{Filter, Modifier};
pub use flatten::PATH_SEPARATOR;
pub use node::{Node, Record, ToNode};
pub use op::Operation;
pub use query::Query;
pub use row::{Columns, Field, Row, RowCollection};
pub use table::Struql;
pub use value::{Kind, Value};

#[cfg(feature = "derive")]
pub use struql_macros::Record;
