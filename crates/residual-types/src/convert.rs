//! Conversions between [`Node`] and foreign document values.
//!
//! This is the single place where mapping keys are normalized. JSON keys are
//! already strings, but JSON text is read directly into nodes so that a key
//! repeated within one object is caught rather than overwritten. YAML keys may be numbers, booleans, or null and are
//! rendered to the string an operator would read (`1`, `true`, `""`), so
//! `1: x` in a YAML manifest and `"1": x` in a JSON API response address the
//! same field. Values that do not fit the node model are rejected here,
//! before any comparison runs.

use std::cell::RefCell;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};

use crate::error::{NodeError, NodeResult};
use crate::format::DocumentFormat;
use crate::node::{Mapping, Node};
use crate::path::NodePath;

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(b),
            Node::Number(n) => serde_json::Value::Number(n),
            Node::String(s) => serde_json::Value::String(s),
            Node::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Node::Mapping(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Parse JSON text into a node, rejecting repeated keys within an object.
pub(crate) fn from_json_str(text: &str) -> NodeResult<Node> {
    let failure = RefCell::new(None);
    let mut de = serde_json::Deserializer::from_str(text);
    let seed = JsonNode {
        path: NodePath::root(),
        failure: &failure,
    };
    let parsed = seed.deserialize(&mut de).and_then(|node| de.end().map(|()| node));
    parsed.map_err(|err| {
        failure
            .take()
            .unwrap_or_else(|| DocumentFormat::Json.parse_error(err))
    })
}

/// Deserializes one JSON value at `path`. A structural error is stashed in
/// `failure` so it survives the trip through `serde_json::Error`.
struct JsonNode<'a> {
    path: NodePath,
    failure: &'a RefCell<Option<NodeError>>,
}

impl<'de> DeserializeSeed<'de> for JsonNode<'_> {
    type Value = Node;

    fn deserialize<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for JsonNode<'_> {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Node::from_f64(v).ok_or_else(|| E::custom(format_args!("non-finite number {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        loop {
            let seed = JsonNode {
                path: self.path.index(items.len()),
                failure: self.failure,
            };
            match seq.next_element_seed(seed)? {
                Some(item) => items.push(item),
                None => return Ok(Node::Sequence(items)),
            }
        }
    }

    fn visit_map<A>(self, mut access: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Mapping::new();
        while let Some(key) = access.next_key::<String>()? {
            match map.entry(key) {
                Entry::Occupied(existing) => {
                    let err = NodeError::DuplicateKey {
                        path: self.path.clone(),
                        key: existing.key().clone(),
                    };
                    let message = err.to_string();
                    *self.failure.borrow_mut() = Some(err);
                    return Err(de::Error::custom(message));
                }
                Entry::Vacant(slot) => {
                    let seed = JsonNode {
                        path: self.path.key(slot.key().clone()),
                        failure: self.failure,
                    };
                    let child = access.next_value_seed(seed)?;
                    slot.insert(child);
                }
            }
        }
        Ok(Node::Mapping(map))
    }
}

impl TryFrom<serde_yaml::Value> for Node {
    type Error = NodeError;

    fn try_from(value: serde_yaml::Value) -> NodeResult<Self> {
        from_yaml(value, &NodePath::root())
    }
}

fn from_yaml(value: serde_yaml::Value, path: &NodePath) -> NodeResult<Node> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(Node::Null),
        Value::Bool(b) => Ok(Node::Bool(b)),
        Value::Number(n) => yaml_number(&n, path),
        Value::String(s) => Ok(Node::String(s)),
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| from_yaml(item, &path.index(i)))
            .collect::<NodeResult<Vec<_>>>()
            .map(Node::Sequence),
        Value::Mapping(entries) => {
            let mut map = Mapping::new();
            for (key, value) in entries {
                match map.entry(yaml_key(key, path)?) {
                    Entry::Occupied(existing) => {
                        return Err(NodeError::DuplicateKey {
                            path: path.clone(),
                            key: existing.key().clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        let child = from_yaml(value, &path.key(slot.key().clone()))?;
                        slot.insert(child);
                    }
                }
            }
            Ok(Node::Mapping(map))
        }
        Value::Tagged(tagged) => Err(NodeError::InvalidNodeKind {
            path: path.clone(),
            kind: format!("tagged value {}", tagged.tag),
        }),
    }
}

fn yaml_number(n: &serde_yaml::Number, path: &NodePath) -> NodeResult<Node> {
    if let Some(i) = n.as_i64() {
        return Ok(Node::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Node::from(u));
    }
    n.as_f64()
        .and_then(Node::from_f64)
        .ok_or_else(|| NodeError::InvalidNodeKind {
            path: path.clone(),
            kind: format!("non-finite number {n}"),
        })
}

/// Render a YAML mapping key as the string form used for lookups.
fn yaml_key(key: serde_yaml::Value, path: &NodePath) -> NodeResult<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Sequence(_) => Err(NodeError::InvalidNodeKind {
            path: path.clone(),
            kind: "sequence used as mapping key".into(),
        }),
        Value::Mapping(_) => Err(NodeError::InvalidNodeKind {
            path: path.clone(),
            kind: "mapping used as mapping key".into(),
        }),
        Value::Tagged(tagged) => Err(NodeError::InvalidNodeKind {
            path: path.clone(),
            kind: format!("tagged value {} used as mapping key", tagged.tag),
        }),
    }
}
