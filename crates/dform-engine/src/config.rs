//! Engine configuration

use serde::{Deserialize, Serialize};

/// Default hand-off key read by the confirmation page
pub const CONFIRMATION_KEY: &str = "confirmationData";

/// Form engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Key the validated record is written under
    pub handoff_key: String,
    /// Drop a field's value when it becomes hidden
    pub clear_hidden_values: bool,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With hand-off key
    #[inline]
    #[must_use]
    pub fn with_handoff_key(mut self, key: impl Into<String>) -> Self {
        self.handoff_key = key.into();
        self
    }

    /// With hidden-value clearing on or off
    #[inline]
    #[must_use]
    pub fn with_clear_hidden_values(mut self, clear: bool) -> Self {
        self.clear_hidden_values = clear;
        self
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            handoff_key: CONFIRMATION_KEY.to_string(),
            clear_hidden_values: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: FormConfig = serde_json::from_str(r#"{"handoff_key": "reviewData"}"#).unwrap();
        assert_eq!(config.handoff_key, "reviewData");
        assert!(config.clear_hidden_values);
    }

    #[test]
    fn builder() {
        let config = FormConfig::new().with_clear_hidden_values(false);
        assert_eq!(config.handoff_key, CONFIRMATION_KEY);
        assert!(!config.clear_hidden_values);
    }
}
