//! Property-based tests for flattening and filtering.

use proptest::prelude::*;
use struql::{Field, Filter, Node, Operation, Query, Row, Struql, Value};

// =============================================================================
// Strategies
// =============================================================================

fn leaf_record() -> impl Strategy<Value = Node> {
    (any::<i32>(), "[a-z]{0,6}").prop_map(|(n, s)| {
        Node::record([("n", Node::scalar(n)), ("s", Node::scalar(s))])
    })
}

/// A root with a scalar, a record sequence holding an inner record sequence,
/// and a sibling record sequence.
fn root_with_lengths() -> impl Strategy<Value = (Node, usize)> {
    let outer = prop::collection::vec(
        (any::<i64>(), prop::collection::vec(leaf_record(), 1..4)),
        1..4,
    );
    let sibling = prop::collection::vec(leaf_record(), 1..4);
    (outer, sibling).prop_map(|(outer, sibling)| {
        let expected = outer.iter().map(|(_, inner)| inner.len()).sum::<usize>() * sibling.len();
        let outer_nodes = outer.into_iter().map(|(id, inner)| {
            Node::record([("id", Node::scalar(id)), ("inner", Node::seq(inner))])
        });
        let root = Node::record([
            ("name", Node::scalar("root")),
            ("outer", Node::seq(outer_nodes)),
            ("sibling", Node::seq(sibling)),
        ]);
        (root, expected)
    })
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    prop_oneof![
        any::<i32>().prop_map(|n| Filter::new("outer.inner.n", Operation::Greater, n)),
        any::<i32>().prop_map(|n| Filter::new("sibling.n", Operation::Lesser, n)),
        "[a-z]{0,2}".prop_map(|p| Filter::new("outer.inner.s", Operation::BeginWith, p.as_str())),
        "[a-z]{0,2}".prop_map(|p| Filter::new("sibling.s", Operation::EndWith, p.as_str())),
        any::<i64>().prop_map(|n| Filter::new("outer.id", Operation::NotEqual, n)),
        Just(Filter::new("missing", Operation::Equal, 1i32)),
    ]
}

// =============================================================================
// Flattening
// =============================================================================

proptest! {
    /// Nested sequences add up per parent, sibling sequences multiply.
    #[test]
    fn row_count_is_product_of_lengths((root, expected) in root_with_lengths()) {
        let table = Struql::from_node(&root).unwrap();
        prop_assert_eq!(table.len(), expected);
    }

    /// Every field sits at the column index registered for its name.
    #[test]
    fn column_indexes_are_consistent((root, _) in root_with_lengths()) {
        let table = Struql::from_node(&root).unwrap();
        for row in table.rows() {
            for field in row.fields() {
                prop_assert_eq!(table.columns().index_of(field.name()), Some(field.index()));
            }
        }
    }

    /// Root scalars are copied into every row.
    #[test]
    fn root_scalar_in_every_row((root, _) in root_with_lengths()) {
        let table = Struql::from_node(&root).unwrap();
        for row in table.rows() {
            prop_assert_eq!(row.get("name").map(|f| f.value()), Some(&Value::from("root")));
        }
    }
}

// =============================================================================
// Filtering
// =============================================================================

proptest! {
    /// A scan returns a subsequence of the table's rows.
    #[test]
    fn filter_result_is_subsequence(
        (root, _) in root_with_lengths(),
        filters in prop::collection::vec(filter_strategy(), 0..4),
    ) {
        let table = Struql::from_node(&root).unwrap();
        let rows = table.filter(&filters).unwrap();
        prop_assert!(rows.len() <= table.len());

        let positions = rows
            .iter()
            .map(|r| table.rows().iter().position(|t| std::ptr::eq(t, *r)).unwrap());
        let mut last = None;
        for pos in positions {
            prop_assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
        }
    }

    /// Adding a filter never grows the result.
    #[test]
    fn more_filters_never_match_more(
        (root, _) in root_with_lengths(),
        filters in prop::collection::vec(filter_strategy(), 1..4),
    ) {
        let table = Struql::from_node(&root).unwrap();
        let fewer = table.filter(&filters[..filters.len() - 1]).unwrap().len();
        let all = table.filter(&filters).unwrap().len();
        prop_assert!(all <= fewer);
    }

    /// count and find agree with run.
    #[test]
    fn count_and_find_agree_with_run(
        (root, _) in root_with_lengths(),
        filter in filter_strategy(),
    ) {
        let table = Struql::from_node(&root).unwrap();
        let query = Query::new().filter(filter);
        let rows = query.run(&table).unwrap();
        prop_assert_eq!(query.count(&table).unwrap(), rows.len());

        let found = query.find(&table).unwrap();
        prop_assert_eq!(found.map(|r| r as *const Row), rows.first().map(|r| *r as *const Row));
    }

    /// Scanning leaves the table as it was.
    #[test]
    fn scans_do_not_mutate(
        (root, _) in root_with_lengths(),
        filters in prop::collection::vec(filter_strategy(), 0..4),
    ) {
        let table = Struql::from_node(&root).unwrap();
        let before = table.table().clone();
        let _ = table.filter(&filters).unwrap();
        let _ = table.filter(&filters).unwrap();
        prop_assert_eq!(table.table(), &before);
    }

    /// Comparisons on i32 agree with the native comparison.
    #[test]
    fn i32_ordering_matches_native(a in any::<i32>(), b in any::<i32>()) {
        let field = Field::new("x", Value::from(a), 0);
        prop_assert_eq!(Filter::new("x", Operation::Greater, b).matches(&field).unwrap(), a > b);
        prop_assert_eq!(Filter::new("x", Operation::Lesser, b).matches(&field).unwrap(), a < b);
        prop_assert_eq!(Filter::new("x", Operation::Equal, b).matches(&field).unwrap(), a == b);
    }
}
