use serde::{Deserialize, Serialize};

/// Build options for one time-of-day network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Period name the network is registered under, e.g. "am"
    pub name: String,
    /// Fail the build when the package carries no transit lines
    pub require_transit: bool,
}

impl NetworkConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn requiring_transit(mut self) -> Self {
        self.require_transit = true;
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            require_transit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let config: NetworkConfig = serde_json::from_str(r#"{"name": "am"}"#).unwrap();
        assert_eq!(config, NetworkConfig::new("am"));
        assert!(!config.require_transit);

        let config: NetworkConfig =
            serde_json::from_str(r#"{"name": "pm", "require_transit": true}"#).unwrap();
        assert!(config.require_transit);
    }
}
