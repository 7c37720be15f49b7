//! Fields, rows, and the row collection.
//!
//! A [`RowCollection`] is the flat table produced by flattening one root
//! record. It owns a column registry that hands out a stable index the first
//! time a field name is seen, so the same name sits at the same position in
//! every row even when some rows lack it.

use std::fmt;
use std::io;

use indexmap::{IndexMap, IndexSet};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::Result;
use crate::filter::Filter;
use crate::value::{Kind, Value};

/// One named, typed cell of a [`Row`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Value,
    kind: Kind,
    index: usize,
}

impl Field {
    /// Creates a field, classifying its value once.
    pub fn new(name: impl Into<String>, value: Value, index: usize) -> Self {
        let kind = value.kind();
        Field {
            name: name.into(),
            value,
            kind,
            index,
        }
    }

    /// Returns the dotted field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stored value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the kind assigned when the field was built.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the column index of this field's name in its collection.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One denormalized record instance: an ordered, name-keyed set of fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: IndexMap<String, Field>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row::default()
    }

    /// Inserts a field, replacing any field with the same name.
    ///
    /// A replaced field keeps its original position in the row.
    pub fn insert(&mut self, field: Field) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns `true` if the row has a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterates fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Returns the fields sorted by column index.
    pub fn fields_by_column(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.values().collect();
        fields.sort_by_key(|field| field.index);
        fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluates all filters against this row (logical AND).
    ///
    /// A row lacking a filter's target field does not match. Filters are
    /// evaluated in order and evaluation stops at the first non-match.
    pub fn matches(&self, filters: &[Filter]) -> Result<bool> {
        for filter in filters {
            let Some(field) = self.get(filter.target()) else {
                return Ok(false);
            };
            if !filter.matches(field)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields_by_column().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", field.value)?;
        }
        Ok(())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields_by_column() {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

/// Registry assigning each field name a stable column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    names: IndexSet<String>,
}

impl Columns {
    /// Returns the index of `name`, assigning the next free one on first sight.
    pub fn resolve(&mut self, name: &str) -> usize {
        match self.names.get_index_of(name) {
            Some(index) => index,
            None => self.names.insert_full(name.to_string()).0,
        }
    }

    /// Returns the index of `name`, if it has been seen.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Iterates column names in index order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the number of distinct columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no column has been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Ordered, append-only sequence of rows plus their column registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCollection {
    rows: Vec<Row>,
    columns: Columns,
}

impl RowCollection {
    pub(crate) fn from_parts(rows: Vec<Row>, columns: Columns) -> Self {
        RowCollection { rows, columns }
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column registry.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Returns the row at `position`.
    pub fn get(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Iterates the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the collection has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends every row matching all `filters` to `acc`.
    ///
    /// The first comparison error aborts the scan. Rows appended before the
    /// error stay in `acc`.
    pub fn filter_into<'a>(&'a self, acc: &mut Vec<&'a Row>, filters: &[Filter]) -> Result<()> {
        let before = acc.len();
        for (position, row) in self.rows.iter().enumerate() {
            match row.matches(filters) {
                Ok(true) => acc.push(row),
                Ok(false) => {}
                Err(err) => {
                    tracing::debug!(position, error = %err, "row scan aborted");
                    return Err(err);
                }
            }
        }
        tracing::trace!(
            rows = self.rows.len(),
            filters = filters.len(),
            matched = acc.len() - before,
            "row scan complete"
        );
        Ok(())
    }

    /// Returns the rows matching all `filters`.
    pub fn filter(&self, filters: &[Filter]) -> Result<Vec<&Row>> {
        let mut acc = Vec::new();
        self.filter_into(&mut acc, filters)?;
        Ok(acc)
    }

    /// Writes a plain-text table: a header of column names, then one line
    /// per row with every column (missing cells left empty).
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let header: Vec<&str> = self.columns.names().collect();
        writeln!(out, "{}", header.join(" | "))?;
        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .names()
                .map(|name| row.get(name).map(|f| f.value.to_string()).unwrap_or_default())
                .collect();
            writeln!(out, "{}", cells.join(" | "))?;
        }
        Ok(())
    }

    /// Renders the rows as a pretty-printed JSON array of objects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a RowCollection {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Serialize for RowCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
