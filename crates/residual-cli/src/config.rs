use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Settings read from the optional TOML config file.
///
/// Command-line flags take precedence over every field here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Output format used when `--format` is not given.
    pub format: OutputFormat,
    /// Whether text output is colored on a terminal.
    pub color: bool,
    /// When `true`, `diff` exits with status 1 on a non-empty residual, as if
    /// `--exit-code` had been passed.
    pub fail_on_drift: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            fail_on_drift: false,
        }
    }
}

impl CliConfig {
    /// Load the config file at `path`, or the defaults when no path is set.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
