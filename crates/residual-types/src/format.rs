//! Parsing JSON and YAML documents into [`Node`]s.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::{NodeError, NodeResult};
use crate::node::Node;

/// A supported input document format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Parse a document of this format.
    pub fn parse(self, text: &str) -> NodeResult<Node> {
        match self {
            DocumentFormat::Json => convert::from_json_str(text),
            DocumentFormat::Yaml => {
                if text.trim().is_empty() {
                    return Ok(Node::Null);
                }
                let mut value: serde_yaml::Value =
                    serde_yaml::from_str(text).map_err(|e| self.parse_error(e))?;
                // `<<: *anchor` stays a literal key until merged.
                value.apply_merge().map_err(|e| self.parse_error(e))?;
                Node::try_from(value)
            }
        }
    }

    pub(crate) fn parse_error(self, err: impl fmt::Display) -> NodeError {
        NodeError::Parse {
            format: self,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("JSON"),
            DocumentFormat::Yaml => f.write_str("YAML"),
        }
    }
}

/// Parse a document, trying JSON first and YAML second when no format is
/// given. YAML errors are reported for undetected input that is not JSON,
/// since YAML accepts everything JSON does. Input that is valid JSON syntax
/// but not a valid tree (a repeated key) fails as JSON.
pub fn parse_document(text: &str, format: Option<DocumentFormat>) -> NodeResult<Node> {
    match format {
        Some(format) => format.parse(text),
        None => match DocumentFormat::Json.parse(text) {
            Err(NodeError::Parse { .. }) => DocumentFormat::Yaml.parse(text),
            parsed => parsed,
        },
    }
}
