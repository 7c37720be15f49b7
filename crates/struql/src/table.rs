//! The query façade: build a table once, then scan it with filters.

use std::io;

use crate::error::{Result, StruqlError};
use crate::filter::Filter;
use crate::flatten::FlattenContext;
use crate::node::{Node, ToNode};
use crate::row::{Columns, Row, RowCollection};

/// A flattened table built from one root record.
///
/// The table is built exactly once, in [`Struql::new`], and is read-only
/// afterwards. Scans never change it, so a `&Struql` can be shared freely.
///
/// # Example
///
/// ```
/// use struql::{Filter, Node, Operation, Struql};
///
/// let order = Node::record([
///     ("customer", Node::scalar("ada")),
///     ("lines", Node::seq([
///         Node::record([("sku", Node::scalar("A-1")), ("qty", Node::scalar(2i64))]),
///         Node::record([("sku", Node::scalar("B-7")), ("qty", Node::scalar(5i64))]),
///     ])),
/// ]);
///
/// let table = Struql::new(&order).unwrap();
/// assert_eq!(table.len(), 2);
///
/// let big = table
///     .filter(&[Filter::new("lines.qty", Operation::Greater, 3i64)])
///     .unwrap();
/// assert_eq!(big.len(), 1);
/// assert_eq!(big[0].get("customer").unwrap().value().as_str(), Some("ada"));
/// ```
#[derive(Debug, Clone)]
pub struct Struql {
    table: RowCollection,
}

impl Struql {
    /// Flattens `root` into a new table.
    ///
    /// Returns [`StruqlError::InvalidRoot`] unless `root` converts to a
    /// record node.
    pub fn new<T: ToNode + ?Sized>(root: &T) -> Result<Self> {
        Self::from_node(&root.to_node())
    }

    /// Flattens an already-built node tree into a new table.
    pub fn from_node(root: &Node) -> Result<Self> {
        let Node::Record(fields) = root else {
            let found = root.shape_name();
            tracing::debug!(found, "rejected non-record root");
            return Err(StruqlError::InvalidRoot { found });
        };

        let mut ctx = FlattenContext::new();
        let rows = ctx.flatten_record(fields, "", vec![Row::new()]);
        let columns = ctx.into_columns();
        tracing::debug!(rows = rows.len(), columns = columns.len(), "table initialized");

        Ok(Struql {
            table: RowCollection::from_parts(rows, columns),
        })
    }

    /// Returns the underlying row collection.
    pub fn table(&self) -> &RowCollection {
        &self.table
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Row] {
        self.table.rows()
    }

    /// Returns the column registry.
    pub fn columns(&self) -> &Columns {
        self.table.columns()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Appends every row matching all `filters` to `acc`.
    ///
    /// A row missing any filter's target field is excluded. The first
    /// comparison error aborts the scan; rows appended before it stay in
    /// `acc`.
    pub fn filter_into<'a>(&'a self, acc: &mut Vec<&'a Row>, filters: &[Filter]) -> Result<()> {
        self.table.filter_into(acc, filters)
    }

    /// Returns the rows matching all `filters`.
    pub fn filter(&self, filters: &[Filter]) -> Result<Vec<&Row>> {
        self.table.filter(filters)
    }

    /// Writes every row as plain text, see [`RowCollection::dump`].
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.table.dump(out)
    }
}
