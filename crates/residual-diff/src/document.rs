//! Residual diff over raw JSON/YAML documents.

use residual_types::{parse_document, DocumentFormat};
use tracing::debug;

use crate::content_diff::content_diff;
use crate::error::{DiffError, DiffResult};
use crate::residual::Residual;

/// Parse both documents and compute the residual of `desired` against
/// `observed`.
///
/// Both documents are fully parsed and validated before any comparison
/// runs, so a malformed value in either one fails the call without a partial
/// result. A `None` format tries JSON and then YAML.
pub fn diff_documents(
    desired: &str,
    desired_format: Option<DocumentFormat>,
    observed: &str,
    observed_format: Option<DocumentFormat>,
) -> DiffResult<Residual> {
    let desired = parse_document(desired, desired_format).map_err(DiffError::InvalidDesired)?;
    let observed =
        parse_document(observed, observed_format).map_err(DiffError::InvalidObserved)?;
    debug!(
        desired = %desired.kind(),
        observed = %observed.kind(),
        "comparing documents"
    );

    let residual = content_diff(&desired, &observed);
    debug!(unsatisfied = residual.len(), "residual computed");
    Ok(residual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use residual_types::{Node, NodeError};
    use serde_json::json;

    const DESIRED: &str = "\
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
data:
  mode: prod
  8080: http
";

    #[test]
    fn yaml_desired_against_json_observed() {
        let observed = r#"{
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings", "uid": "e3b0", "creationTimestamp": "2026-01-01T00:00:00Z"},
            "data": {"mode": "prod", "8080": "http"}
        }"#;
        let residual = diff_documents(
            DESIRED,
            Some(DocumentFormat::Yaml),
            observed,
            Some(DocumentFormat::Json),
        )
        .unwrap();
        assert!(residual.is_satisfied());
    }

    #[test]
    fn drift_is_reported() {
        let observed = r#"{"kind": "ConfigMap", "metadata": {"name": "settings"}, "data": {"mode": "dev"}}"#;
        let residual = diff_documents(DESIRED, None, observed, None).unwrap();
        assert_eq!(
            residual.into_node(),
            Node::from(json!({"apiVersion": "v1", "data": {"mode": "prod", "8080": "http"}}))
        );
    }

    #[test]
    fn yaml_merge_keys_match_their_expanded_form() {
        let desired = "base: &b\n  app: web\nlabels:\n  <<: *b\n  tier: front\n";
        let observed = r#"{"base":{"app":"web"},"labels":{"app":"web","tier":"front"}}"#;
        let residual = diff_documents(desired, None, observed, None).unwrap();
        assert!(residual.is_satisfied(), "{:?}", residual.node());

        let partial = r#"{"labels":{"tier":"front"}}"#;
        let residual = diff_documents(desired, None, partial, None).unwrap();
        assert_eq!(
            residual.into_node(),
            Node::from(json!({"base": {"app": "web"}, "labels": {"app": "web"}}))
        );
    }

    #[test]
    fn repeated_json_key_in_desired_is_rejected() {
        let err = diff_documents(r#"{"data": {"a": 1, "a": 2}}"#, None, "{}", None).unwrap_err();
        assert!(matches!(
            err,
            DiffError::InvalidDesired(NodeError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn invalid_observed_fails_before_comparison() {
        let err = diff_documents(DESIRED, None, "data: !Binary abc\n", None).unwrap_err();
        assert!(matches!(
            err,
            DiffError::InvalidObserved(NodeError::InvalidNodeKind { .. })
        ));
        assert_eq!(
            err.to_string(),
            "invalid observed document: invalid node kind at data: tagged value !Binary"
        );
    }

    #[test]
    fn syntax_errors_propagate() {
        let err = diff_documents("{", Some(DocumentFormat::Json), "{}", None).unwrap_err();
        assert!(matches!(err, DiffError::InvalidDesired(_)));
        assert!(err.to_string().starts_with("invalid desired document: JSON parse error"), "{err}");
    }
}
