//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Apply the specialty auto-select shortcut at wizard start.
    #[serde(default = "default_true")]
    pub auto_select_specialty: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            auto_select_specialty: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_select_defaults_on() {
        assert!(FeatureFlags::default().auto_select_specialty);
    }

    #[test]
    fn deserializes_explicit_off() {
        let flags: FeatureFlags =
            serde_json::from_str(r#"{"auto_select_specialty": false}"#).unwrap();
        assert!(!flags.auto_select_specialty);
    }
}
