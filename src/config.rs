//! Port configuration.
//!
//! Options are passed to a driver when a port is created. They can be
//! built in code or parsed from JSON; omitted fields take defaults.
//!
//! # Example
//!
//! ```
//! use sample_app_port::PortConfig;
//!
//! let config = PortConfig::from_json(r#"{"mailbox_capacity": 16}"#).unwrap();
//! assert_eq!(config.mailbox_capacity, 16);
//! assert_eq!(config.name, "sample_app_port");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PortError, Result};

/// Default port name used in log output.
pub const DEFAULT_PORT_NAME: &str = "sample_app_port";

/// Default mailbox capacity.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 1024;

/// Options for creating a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortConfig {
    /// Name used in log output.
    pub name: String,
    /// Maximum queued messages before `send` returns `MailboxFull`.
    pub mailbox_capacity: usize,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PORT_NAME.to_string(),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl PortConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the port name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the mailbox capacity.
    ///
    /// Default: 1024
    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.mailbox_capacity == 0 {
            return Err(PortError::InvalidConfig(
                "mailbox_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PortConfig::default();
        assert_eq!(config.name, DEFAULT_PORT_NAME);
        assert_eq!(config.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = PortConfig::new().name("port_a").mailbox_capacity(8);
        assert_eq!(config.name, "port_a");
        assert_eq!(config.mailbox_capacity, 8);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = PortConfig::from_json("{}").unwrap();
        assert_eq!(config, PortConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let config = PortConfig::from_json(r#"{"name": "p1", "mailbox_capacity": 2}"#).unwrap();
        assert_eq!(config.name, "p1");
        assert_eq!(config.mailbox_capacity, 2);
    }

    #[test]
    fn test_from_json_zero_capacity() {
        let result = PortConfig::from_json(r#"{"mailbox_capacity": 0}"#);
        assert!(matches!(result, Err(PortError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            PortConfig::from_json("not json"),
            Err(PortError::Json(_))
        ));
        assert!(matches!(
            PortConfig::from_json(r#"{"bogus": 1}"#),
            Err(PortError::Json(_))
        ));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = PortConfig::new().name("x").mailbox_capacity(3);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PortConfig::from_json(&json).unwrap(), config);
    }
}
