use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Number;

/// A keyed mapping. Keys are normalized strings, so lookups never depend on
/// how the source document spelled a key.
pub type Mapping = BTreeMap<String, Node>;

/// A configuration value: a mapping, a sequence, or a scalar.
///
/// Desired and observed trees are both made of `Node`s. Cloning a `Node` is a
/// full structural deep copy.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(untagged)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

/// The variant of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

impl Node {
    /// The variant of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Bool(_) => NodeKind::Bool,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Mapping(_) => NodeKind::Mapping,
        }
    }

    /// Returns `true` for null, the empty string, the empty sequence, and the
    /// empty mapping. Numbers and booleans are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Null => true,
            Node::String(s) => s.is_empty(),
            Node::Sequence(items) => items.is_empty(),
            Node::Mapping(map) => map.is_empty(),
            Node::Bool(_) | Node::Number(_) => false,
        }
    }

    /// The empty value of this node's kind: an empty container for
    /// containers, null for scalars.
    pub fn emptied(&self) -> Node {
        match self {
            Node::Sequence(_) => Node::Sequence(Vec::new()),
            Node::Mapping(_) => Node::Mapping(Mapping::new()),
            _ => Node::Null,
        }
    }

    /// The entries of a mapping node; `None` for every other kind.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Build a mapping node from key/value pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a float node. Returns `None` for NaN and infinities, which have
    /// no place in a configuration tree.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Node::Number)
    }
}

/// Deep value equality.
///
/// Sequences compare element-wise in order, mappings by key set and values,
/// numbers by numeric value (`1` equals `1.0`). Different variants are never
/// equal.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Number(a), Node::Number(b)) => numbers_equal(a, b),
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a == b,
            (Node::Mapping(a), Node::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    // One negative integer and one integer above i64::MAX.
    false
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value.into())
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Number(value.into())
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}
