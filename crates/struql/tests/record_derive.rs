//! Tests for the `#[derive(Record)]` macro.

use struql::{Node, Query, Record, Struql, ToNode, Value};

#[derive(Record)]
struct Ticket {
    title: String,
    #[struql(rename = "prio")]
    priority: i32,
    #[struql(skip)]
    #[allow(dead_code)]
    internal_note: String,
    r#type: String,
    labels: Vec<String>,
}

fn ticket() -> Ticket {
    Ticket {
        title: "Crash on save".to_string(),
        priority: 2,
        internal_note: "do not export".to_string(),
        r#type: "bug".to_string(),
        labels: vec!["ui".to_string(), "p1".to_string()],
    }
}

#[test]
fn test_column_constants() {
    assert_eq!(Ticket::TITLE, "title");
    assert_eq!(Ticket::PRIO, "prio");
    assert_eq!(Ticket::TYPE, "type");
    assert_eq!(Ticket::LABELS, "labels");
}

#[test]
fn test_to_node_field_order() {
    let Node::Record(fields) = ticket().to_node() else {
        panic!("derived node must be a record");
    };
    let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["title", "prio", "type", "labels"]);
}

#[test]
fn test_skipped_field_never_becomes_a_column() {
    let table = Struql::new(&ticket()).unwrap();
    assert_eq!(table.columns().len(), 4);
    assert!(table.columns().index_of("internal_note").is_none());
}

#[test]
fn test_constants_in_queries() {
    let table = Struql::new(&ticket()).unwrap();
    let rows = Query::new()
        .eq(Ticket::PRIO, 2i32)
        .exists(Ticket::LABELS, "p1")
        .run(&table)
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[derive(Record)]
struct Project {
    name: String,
    lead: Person,
    tickets: Vec<Ticket>,
}

#[derive(Record)]
struct Person {
    #[struql(rename = "login")]
    handle: String,
    home: Option<Place>,
}

#[derive(Record)]
struct Place {
    city: String,
}

#[test]
fn test_nested_records_use_dotted_columns() {
    let project = Project {
        name: "core".to_string(),
        lead: Person {
            handle: "kim".to_string(),
            home: Some(Place {
                city: "Oslo".to_string(),
            }),
        },
        tickets: vec![ticket(), ticket()],
    };
    let table = Struql::new(&project).unwrap();
    assert_eq!(table.len(), 2);

    let row = &table.rows()[0];
    assert_eq!(row.get("lead.login").unwrap().value(), &Value::from("kim"));
    assert_eq!(row.get("lead.home.city").unwrap().value(), &Value::from("Oslo"));
    assert_eq!(row.get("tickets.prio").unwrap().value(), &Value::I32(2));
}

#[derive(Record)]
struct Wrapper<T> {
    label: String,
    inner: T,
}

#[test]
fn test_generic_records() {
    let wrapped = Wrapper {
        label: "w".to_string(),
        inner: Place {
            city: "Rome".to_string(),
        },
    };
    let table = Struql::new(&wrapped).unwrap();
    assert_eq!(
        table.rows()[0].get("inner.city").unwrap().value(),
        &Value::from("Rome")
    );

    let scalar = Wrapper {
        label: "n".to_string(),
        inner: 7u8,
    };
    let table = Struql::new(&scalar).unwrap();
    assert_eq!(table.rows()[0].get("inner").unwrap().value(), &Value::U8(7));
}

fn assert_record<T: Record>(_: &T) {}

#[test]
fn test_record_marker_is_implemented() {
    assert_record(&ticket());
    assert_record(&Box::new(ticket()));
}
