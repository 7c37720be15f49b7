//! Recursive flattening of a record tree into denormalized rows.
//!
//! The traversal is depth-first over the record's fields in declaration
//! order. The rows currently being written are threaded through the
//! recursion: a scalar lands in every one of them, a nested record recurses
//! into the same rows, and a sequence of records replaces them with one copy
//! per (row, element) pair. Copies start from the row as it stood before the
//! sequence (the carry set), so ancestor columns are duplicated the way a SQL
//! join duplicates parent columns.

use crate::node::Node;
use crate::row::{Columns, Field, Row};
use crate::value::Value;

/// Separator placed between ancestor and child field names.
pub const PATH_SEPARATOR: char = '.';

/// Traversal state shared across the whole flattening pass.
#[derive(Debug, Default)]
pub(crate) struct FlattenContext {
    columns: Columns,
}

impl FlattenContext {
    pub(crate) fn new() -> Self {
        FlattenContext::default()
    }

    pub(crate) fn into_columns(self) -> Columns {
        self.columns
    }

    /// Flattens `fields` under `prefix` into `rows`, returning the rows that
    /// result once every field has been written.
    pub(crate) fn flatten_record(
        &mut self,
        fields: &[(String, Node)],
        prefix: &str,
        mut rows: Vec<Row>,
    ) -> Vec<Row> {
        for (name, node) in fields {
            let path = format!("{prefix}{name}");

            match node {
                Node::Record(inner) => {
                    rows = self.flatten_record(inner, &child_prefix(&path), rows);
                }
                Node::Seq(items) if is_record_seq(items) => {
                    rows = self.expand(items, &child_prefix(&path), rows);
                }
                Node::Seq(_) | Node::Scalar(_) => match node.to_value() {
                    Some(value) => self.write(&mut rows, &path, value),
                    None => {
                        tracing::trace!(field = %path, "skipping sequence with non-scalar elements");
                    }
                },
                Node::Unsupported => {
                    tracing::trace!(field = %path, "skipping unsupported field");
                }
            }
        }
        rows
    }

    // One-to-many: every carry row yields one row per element.
    fn expand(&mut self, items: &[Node], prefix: &str, carry: Vec<Row>) -> Vec<Row> {
        let mut expanded = Vec::with_capacity(carry.len() * items.len());
        for row in &carry {
            for item in items {
                if let Node::Record(fields) = item {
                    let produced = self.flatten_record(fields, prefix, vec![row.clone()]);
                    expanded.extend(produced);
                }
            }
        }
        tracing::trace!(
            prefix,
            carried = carry.len(),
            elements = items.len(),
            produced = expanded.len(),
            "expanded rows"
        );
        expanded
    }

    fn write(&mut self, rows: &mut [Row], path: &str, value: Value) {
        let index = self.columns.resolve(path);
        for row in rows.iter_mut() {
            row.insert(Field::new(path, value.clone(), index));
        }
    }
}

fn child_prefix(path: &str) -> String {
    let mut prefix = String::with_capacity(path.len() + 1);
    prefix.push_str(path);
    prefix.push(PATH_SEPARATOR);
    prefix
}

/// A sequence expands rows only when it is non-empty and every element is a
/// record. Empty sequences are written whole like scalar sequences.
fn is_record_seq(items: &[Node]) -> bool {
    !items.is_empty() && items.iter().all(Node::is_record)
}
