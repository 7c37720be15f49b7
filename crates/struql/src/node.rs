//! Input tree and the traits that produce it.
//!
//! The flattening engine walks a [`Node`] tree. Types expose themselves as
//! nodes through [`ToNode`], and types that can serve as the root of a table
//! additionally implement the [`Record`] marker trait. Both are normally
//! derived with `#[derive(Record)]`.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::Value;

/// One node of a nested record graph.
///
/// # Example
///
/// ```
/// use struql::Node;
///
/// let person = Node::record([
///     ("name", Node::scalar("Ada")),
///     ("tags", Node::seq([Node::scalar("x"), Node::scalar("y")])),
/// ]);
/// assert!(person.is_record());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Named fields in declaration order.
    Record(Vec<(String, Node)>),
    /// Ordered elements.
    Seq(Vec<Node>),
    /// Scalar cell value.
    Scalar(Value),
    /// Anything the flattening engine does not understand. Skipped.
    Unsupported,
}

impl Node {
    /// Builds a record node from `(name, node)` pairs.
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        Node::Record(
            fields
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Builds a sequence node.
    pub fn seq<I: IntoIterator<Item = Node>>(items: I) -> Self {
        Node::Seq(items.into_iter().collect())
    }

    /// Builds a scalar node.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Node::Scalar(value.into())
    }

    /// Returns `true` if this is a record node.
    pub fn is_record(&self) -> bool {
        matches!(self, Node::Record(_))
    }

    /// Returns the name of this node's shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Node::Record(_) => "record",
            Node::Seq(_) => "sequence",
            Node::Scalar(v) => v.type_name(),
            Node::Unsupported => "unsupported value",
        }
    }

    /// Converts a scalar or a sequence of scalars into a cell value.
    ///
    /// Returns `None` for records, unsupported nodes, and sequences holding
    /// anything but scalars or nested scalar sequences.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Node::Scalar(v) => Some(v.clone()),
            Node::Seq(items) => items
                .iter()
                .map(Node::to_value)
                .collect::<Option<Vec<_>>>()
                .map(Value::Seq),
            Node::Record(_) | Node::Unsupported => None,
        }
    }
}

/// Conversion into the flattening engine's input tree.
///
/// Implemented for strings, primitive numbers, `bool`, `char`, sequences,
/// `Option`, and smart pointers. Structs implement it through
/// `#[derive(Record)]`.
///
/// # Manual Implementation
///
/// ```
/// use struql::{Node, Record, ToNode};
///
/// struct City {
///     name: String,
///     population: i64,
/// }
///
/// impl ToNode for City {
///     fn to_node(&self) -> Node {
///         Node::record([
///             ("name", self.name.to_node()),
///             ("population", self.population.to_node()),
///         ])
///     }
/// }
///
/// impl Record for City {}
/// ```
pub trait ToNode {
    /// Returns the node representation of `self`.
    fn to_node(&self) -> Node;
}

/// Marker for types whose node form is always [`Node::Record`].
pub trait Record: ToNode {}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

macro_rules! impl_scalar_to_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToNode for $ty {
                fn to_node(&self) -> Node {
                    Node::Scalar(Value::from(*self))
                }
            }
        )*
    };
}

impl_scalar_to_node!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char);

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::Scalar(Value::String(self.clone()))
    }
}

impl ToNode for str {
    fn to_node(&self) -> Node {
        Node::Scalar(Value::from(self))
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::Seq(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: ToNode, const N: usize> ToNode for [T; N] {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: ToNode> ToNode for VecDeque<T> {
    fn to_node(&self) -> Node {
        Node::Seq(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(inner) => inner.to_node(),
            None => Node::Unsupported,
        }
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode + ?Sized> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode + ?Sized> ToNode for Rc<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode + ?Sized> ToNode for Arc<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: Record + ?Sized> Record for &T {}
impl<T: Record + ?Sized> Record for Box<T> {}
impl<T: Record + ?Sized> Record for Rc<T> {}
impl<T: Record + ?Sized> Record for Arc<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_keep_representation() {
        assert_eq!(5i32.to_node(), Node::Scalar(Value::I32(5)));
        assert_eq!(5u64.to_node(), Node::Scalar(Value::U64(5)));
        assert_eq!("x".to_node(), Node::Scalar(Value::from("x")));
    }

    #[test]
    fn pointers_are_dereferenced() {
        let boxed = Box::new(3i64);
        assert_eq!(boxed.to_node(), Node::Scalar(Value::I64(3)));
        let shared = Arc::new(String::from("s"));
        assert_eq!(shared.to_node(), Node::scalar("s"));
        assert_eq!(Some(1i32).to_node(), Node::scalar(1i32));
        assert_eq!(None::<i32>.to_node(), Node::Unsupported);
    }

    #[test]
    fn sequences_become_seq_nodes() {
        let node = vec![1i32, 2].to_node();
        assert_eq!(node, Node::seq([Node::scalar(1i32), Node::scalar(2i32)]));
        assert_eq!(node.to_value(), Some(Value::from(vec![1i32, 2])));
    }

    #[test]
    fn to_value_rejects_records() {
        let node = Node::seq([Node::record([("a", Node::scalar(1i32))])]);
        assert_eq!(node.to_value(), None);
        assert_eq!(Node::Unsupported.to_value(), None);
        assert_eq!(Node::Seq(Vec::new()).to_value(), Some(Value::Seq(Vec::new())));
    }

    #[test]
    fn shape_names() {
        assert_eq!(Node::record(Vec::<(String, Node)>::new()).shape_name(), "record");
        assert_eq!(Node::scalar(1i32).shape_name(), "i32");
        assert_eq!(Node::Seq(Vec::new()).shape_name(), "sequence");
    }
}
