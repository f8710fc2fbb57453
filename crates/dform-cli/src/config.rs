//! CLI configuration file
//!
//! ```toml
//! log_format = "json"
//!
//! [form]
//! handoff_key = "confirmationData"
//! clear_hidden_values = true
//! ```

use anyhow::{Context, Result};
use dform_engine::FormConfig;
use serde::Deserialize;
use std::path::Path;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Contents of `--config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub(crate) log_format: Option<LogFormat>,
    pub(crate) form: FormConfig,
}

impl CliConfig {
    /// Load `path`; a missing file yields defaults
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading config {}", path.display()));
            }
        };
        Self::from_toml_str(&source).with_context(|| format!("parsing config {}", path.display()))
    }

    pub(crate) fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dform_engine::CONFIRMATION_KEY;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("dform.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.form.handoff_key, CONFIRMATION_KEY);
    }

    #[test]
    fn partial_form_table() {
        let config = CliConfig::from_toml_str(
            r#"
            log_format = "json"

            [form]
            handoff_key = "reviewData"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert_eq!(config.form.handoff_key, "reviewData");
        assert!(config.form.clear_hidden_values);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dform.toml");
        std::fs::write(&path, "form = [").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
