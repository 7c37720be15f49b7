//! Fluent builder for filter sets.
//!
//! The [`Query`] struct collects [`Filter`]s with one shorthand per
//! operation and runs them against a [`Struql`] table. All filters are
//! combined with AND.

use crate::error::Result;
use crate::filter::{Filter, Modifier};
use crate::op::Operation;
use crate::row::Row;
use crate::table::Struql;
use crate::value::Value;

/// A conjunction of filters.
///
/// # Example
///
/// ```
/// use struql::{Modifier, Node, Query, Struql};
///
/// let shop = Node::record([
///     ("city", Node::scalar("Lyon")),
///     ("staff", Node::seq([
///         Node::record([("name", Node::scalar("Ines")), ("years", Node::scalar(4i64))]),
///         Node::record([("name", Node::scalar("Marc")), ("years", Node::scalar(9i64))]),
///     ])),
/// ]);
/// let table = Struql::new(&shop).unwrap();
///
/// let query = Query::new()
///     .eq("city", "lyon")
///     .with_modifier(Modifier::lowercase())
///     .gt("staff.years", 5i64)
///     .build();
///
/// let rows = query.run(&table).unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("staff.name").unwrap().value().as_str(), Some("Marc"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<Filter>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches every row.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Generic builders
    // ========================================================================

    /// Adds a prepared filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Adds a filter from its parts.
    pub fn and(self, target: &str, op: Operation, value: impl Into<Value>) -> Self {
        self.filter(Filter::new(target, op, value))
    }

    /// Attaches a modifier to the most recently added filter.
    ///
    /// Does nothing on an empty query.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if let Some(last) = self.filters.pop() {
            self.filters.push(last.with_modifier(modifier));
        }
        self
    }

    // ========================================================================
    // Shorthand methods
    // ========================================================================

    /// Adds an equality filter.
    pub fn eq(self, target: &str, value: impl Into<Value>) -> Self {
        self.and(target, Operation::Equal, value)
    }

    /// Adds a not-equal filter.
    pub fn ne(self, target: &str, value: impl Into<Value>) -> Self {
        self.and(target, Operation::NotEqual, value)
    }

    /// Adds a greater-than filter.
    pub fn gt(self, target: &str, value: impl Into<Value>) -> Self {
        self.and(target, Operation::Greater, value)
    }

    /// Adds a less-than filter.
    pub fn lt(self, target: &str, value: impl Into<Value>) -> Self {
        self.and(target, Operation::Lesser, value)
    }

    /// Adds a prefix filter.
    pub fn begins_with(self, target: &str, prefix: &str) -> Self {
        self.and(target, Operation::BeginWith, prefix)
    }

    /// Adds a suffix filter.
    pub fn ends_with(self, target: &str, suffix: &str) -> Self {
        self.and(target, Operation::EndWith, suffix)
    }

    /// Adds a filter requiring the sequence field to contain `value`.
    pub fn exists(self, target: &str, value: impl Into<Value>) -> Self {
        self.and(target, Operation::Exists, value)
    }

    /// Adds a filter requiring the field value to be one of `values`.
    pub fn in_set<I, V>(self, target: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.and(target, Operation::In, Value::Seq(set))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    /// Returns the collected filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns `true` if this query has no filters (matches everything).
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Returns every matching row of `table`.
    pub fn run<'a>(&self, table: &'a Struql) -> Result<Vec<&'a Row>> {
        table.filter(&self.filters)
    }

    /// Appends every matching row of `table` to `acc`.
    pub fn run_into<'a>(&self, table: &'a Struql, acc: &mut Vec<&'a Row>) -> Result<()> {
        table.filter_into(acc, &self.filters)
    }

    /// Counts the matching rows.
    pub fn count(&self, table: &Struql) -> Result<usize> {
        let mut count = 0;
        for row in table.rows() {
            if row.matches(&self.filters)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Finds the first matching row, stopping the scan there.
    pub fn find<'a>(&self, table: &'a Struql) -> Result<Option<&'a Row>> {
        for row in table.rows() {
            if row.matches(&self.filters)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StruqlError;
    use crate::node::Node;

    fn library() -> Struql {
        let book = |title: &str, year: i32, tags: Vec<&str>| {
            Node::record([
                ("title", Node::scalar(title)),
                ("year", Node::scalar(year)),
                ("tags", Node::seq(tags.into_iter().map(Node::scalar))),
            ])
        };
        let root = Node::record([
            ("shelf", Node::scalar("S1")),
            (
                "books",
                Node::seq([
                    book("Dune", 1965, vec!["scifi", "classic"]),
                    book("Emma", 1815, vec!["classic"]),
                    book("Neuromancer", 1984, vec!["scifi", "cyberpunk"]),
                ]),
            ),
        ]);
        Struql::from_node(&root).unwrap()
    }

    #[test]
    fn empty_query_matches_all() {
        let table = library();
        let query = Query::new().build();
        assert!(query.is_empty());
        assert_eq!(query.run(&table).unwrap().len(), 3);
    }

    #[test]
    fn shorthands_build_expected_operations() {
        let query = Query::new()
            .eq("a", 1i32)
            .ne("a", 2i32)
            .gt("a", 0i32)
            .lt("a", 9i32)
            .begins_with("s", "x")
            .ends_with("s", "y")
            .exists("t", "z")
            .in_set("a", [1i32, 2])
            .build();
        let ops: Vec<Operation> = query.filters().iter().map(Filter::operation).collect();
        assert_eq!(
            ops,
            [
                Operation::Equal,
                Operation::NotEqual,
                Operation::Greater,
                Operation::Lesser,
                Operation::BeginWith,
                Operation::EndWith,
                Operation::Exists,
                Operation::In,
            ]
        );
        assert_eq!(query.filters()[7].value(), &Value::from(vec![1i32, 2]));
    }

    #[test]
    fn conjunction_of_filters() {
        let table = library();
        let rows = Query::new()
            .exists("books.tags", "scifi")
            .lt("books.year", 1980i32)
            .run(&table)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("books.title").unwrap().value(), &Value::from("Dune"));
    }

    #[test]
    fn modifier_attaches_to_last_filter() {
        let query = Query::new()
            .eq("a", "x")
            .eq("b", "y")
            .with_modifier(Modifier::uppercase());
        assert!(query.filters()[0].modifier().is_none());
        assert!(query.filters()[1].modifier().is_some());
        assert!(Query::new().with_modifier(Modifier::trim()).is_empty());
    }

    #[test]
    fn count_and_find() {
        let table = library();
        let classics = Query::new().exists("books.tags", "classic");
        assert_eq!(classics.count(&table).unwrap(), 2);

        let found = Query::new().begins_with("books.title", "Neuro").find(&table).unwrap();
        assert_eq!(found.unwrap().get("books.year").unwrap().value(), &Value::I32(1984));

        let none = Query::new().eq("books.title", "Ulysses").find(&table).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn in_set_membership() {
        let table = library();
        let rows = Query::new()
            .in_set("books.year", [1815i32, 1984])
            .run(&table)
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn errors_surface_from_count() {
        let table = library();
        let err = Query::new().gt("books.tags", "a").count(&table).unwrap_err();
        assert!(matches!(err, StruqlError::UnsupportedComparison { .. }));
    }
}
