//! The result of a residual content diff.

use residual_types::{Node, NodePath};
use serde::Serialize;

/// The part of a desired tree that the observed tree does not satisfy.
///
/// Same shape as the desired tree it came from, minus every branch that was
/// confirmed present. An empty residual means no corrective action is needed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Residual {
    node: Node,
}

impl Residual {
    /// Wrap a residual node.
    pub fn new(node: Node) -> Self {
        Self { node }
    }

    /// Returns `true` if nothing of the desired tree is left: the residual is
    /// null, an empty mapping, an empty sequence, or an empty string.
    pub fn is_empty(&self) -> bool {
        self.node.is_empty()
    }

    /// Returns `true` if the desired state is already present.
    pub fn is_satisfied(&self) -> bool {
        self.is_empty()
    }

    /// Number of unsatisfied leaf paths.
    pub fn len(&self) -> usize {
        self.paths().len()
    }

    /// The residual tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Consume the residual, returning its tree.
    pub fn into_node(self) -> Node {
        self.node
    }

    /// Paths of the unsatisfied leaves, in key order.
    ///
    /// Mappings are descended. Sequences are reported whole, since a
    /// sequence is either satisfied entirely or left in the residual as
    /// declared. Scalars and empty mappings are leaves too.
    pub fn paths(&self) -> Vec<NodePath> {
        let mut paths = Vec::new();
        if !self.is_empty() {
            collect_paths(&self.node, &NodePath::root(), &mut paths);
        }
        paths
    }
}

fn collect_paths(node: &Node, path: &NodePath, out: &mut Vec<NodePath>) {
    match node {
        Node::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                collect_paths(child, &path.key(key.as_str()), out);
            }
        }
        _ => out.push(path.clone()),
    }
}

impl From<Residual> for Node {
    fn from(residual: Residual) -> Self {
        residual.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn residual(value: serde_json::Value) -> Residual {
        Residual::new(Node::from(value))
    }

    #[test]
    fn empty_residuals_are_satisfied() {
        assert!(residual(json!({})).is_satisfied());
        assert!(residual(json!([])).is_satisfied());
        assert!(residual(json!(null)).is_satisfied());
        assert!(Residual::default().is_empty());
        assert_eq!(residual(json!({})).len(), 0);
        assert!(residual(json!({})).paths().is_empty());
    }

    #[test]
    fn paths_descend_mappings_only() {
        let r = residual(json!({
            "metadata": {"labels": {"tier": "front", "app.kubernetes.io/name": "web"}},
            "spec": {"ports": [{"port": 80}], "selector": {}},
        }));
        let paths: Vec<String> = r.paths().iter().map(ToString::to_string).collect();
        assert_eq!(
            paths,
            vec![
                r#"metadata.labels["app.kubernetes.io/name"]"#,
                "metadata.labels.tier",
                "spec.ports",
                "spec.selector",
            ]
        );
        assert_eq!(r.len(), 4);
        assert!(!r.is_satisfied());
    }

    #[test]
    fn top_level_scalar_residual_is_the_root() {
        let r = residual(json!(3));
        assert_eq!(r.paths(), vec![NodePath::root()]);
    }

    #[test]
    fn serializes_as_the_bare_tree() {
        let r = residual(json!({"a": {"b": 1}}));
        assert_eq!(serde_json::to_value(&r).unwrap(), json!({"a": {"b": 1}}));
    }
}
