//! Rendering a residual for the terminal or for machines.

use std::fmt::Write;

use colored::Colorize;
use residual_diff::Residual;
use residual_types::NodePath;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Machine-readable summary of a diff.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub satisfied: bool,
    pub unsatisfied: Vec<NodePath>,
    pub residual: &'a Residual,
}

impl<'a> Report<'a> {
    pub fn new(residual: &'a Residual) -> Self {
        Self {
            satisfied: residual.is_satisfied(),
            unsatisfied: residual.paths(),
            residual,
        }
    }
}

/// Render the full diff output in the requested format.
pub fn render(residual: &Residual, format: OutputFormat) -> anyhow::Result<String> {
    let report = Report::new(residual);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&report)?),
        OutputFormat::Text => render_text(&report),
    }
}

/// One-line verdict, as printed by `check`.
pub fn verdict(residual: &Residual) -> String {
    if residual.is_satisfied() {
        format!("{} desired state satisfied", "✓".green().bold())
    } else {
        let count = residual.len();
        let noun = if count == 1 { "field" } else { "fields" };
        format!(
            "{} {count} desired {noun} not satisfied",
            "✗".red().bold()
        )
    }
}

fn render_text(report: &Report<'_>) -> anyhow::Result<String> {
    let mut out = verdict(report.residual);
    out.push('\n');
    if report.satisfied {
        return Ok(out);
    }

    for path in &report.unsatisfied {
        writeln!(out, "  {} {}", "-".dimmed(), path.to_string().yellow())?;
    }
    out.push('\n');
    out.push_str(&serde_yaml::to_string(report.residual)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use residual_types::Node;
    use serde_json::json;

    fn residual(value: serde_json::Value) -> Residual {
        Residual::new(Node::from(value))
    }

    #[test]
    fn json_report_shape() {
        colored::control::set_override(false);
        let r = residual(json!({"spec": {"replicas": 3}}));
        let text = render(&r, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "satisfied": false,
                "unsatisfied": ["spec.replicas"],
                "residual": {"spec": {"replicas": 3}},
            })
        );
    }

    #[test]
    fn yaml_report_for_satisfied_state() {
        let r = residual(json!({}));
        let text = render(&r, OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["satisfied"], serde_yaml::Value::Bool(true));
        assert!(value["unsatisfied"].as_sequence().unwrap().is_empty());
    }

    #[test]
    fn text_report_lists_paths_and_residual() {
        colored::control::set_override(false);
        let r = residual(json!({"metadata": {"labels": {"tier": "front"}}, "data": {"a": "1"}}));
        let text = render(&r, OutputFormat::Text).unwrap();
        assert!(text.starts_with("✗ 2 desired fields not satisfied\n"), "{text}");
        assert!(text.contains("  - data.a\n"), "{text}");
        assert!(text.contains("  - metadata.labels.tier\n"), "{text}");
        assert!(text.contains("tier: front"), "{text}");
    }

    #[test]
    fn text_report_for_satisfied_state_is_one_line() {
        colored::control::set_override(false);
        let text = render(&residual(json!({})), OutputFormat::Text).unwrap();
        assert_eq!(text, "✓ desired state satisfied\n");
    }

    #[test]
    fn singular_noun_for_one_field() {
        colored::control::set_override(false);
        assert_eq!(
            verdict(&residual(json!({"a": 1}))),
            "✗ 1 desired field not satisfied"
        );
    }
}
