//! Locations inside a node tree.
//!
//! A [`NodePath`] renders the way operators write field references:
//! `spec.template.metadata.labels`, `spec.containers[0].image`. The root
//! renders as `.`. Keys that would be ambiguous in dotted form are
//! bracket-quoted: `metadata.annotations["app.kubernetes.io/name"]`.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step into a mapping or a sequence.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A path from the root of a tree to one of its values.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// A new path one mapping key deeper.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Key(key.into()));
        next
    }

    /// A new path one sequence index deeper.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(PathSegment::Index(index));
        next
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(&['.', '[', ']', '"'][..])
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if needs_quoting(key) => write!(f, "[{key:?}]")?,
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_displays_as_dot() {
        assert_eq!(NodePath::root().to_string(), ".");
        assert!(NodePath::root().is_root());
    }

    #[test]
    fn dotted_keys_and_indices() {
        let path = NodePath::root()
            .key("spec")
            .key("containers")
            .index(0)
            .key("image");
        assert_eq!(path.to_string(), "spec.containers[0].image");
        assert_eq!(path.segments().len(), 4);
    }

    #[test]
    fn ambiguous_keys_are_quoted() {
        let path = NodePath::root()
            .key("metadata")
            .key("annotations")
            .key("app.kubernetes.io/name");
        assert_eq!(
            path.to_string(),
            r#"metadata.annotations["app.kubernetes.io/name"]"#
        );
        assert_eq!(NodePath::root().key("").to_string(), r#"[""]"#);
    }

    #[test]
    fn serializes_as_display_string() {
        let path = NodePath::root().key("a").index(2);
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""a[2]""#);
    }
}
