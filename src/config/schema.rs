//! Station configuration schema.
//!
//! The station file is TOML. It names the station, lists its interfaces and
//! points at the `<digipeater>` block file.

use serde::{Deserialize, Serialize};

/// Root configuration for the station.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StationConfig {
    /// Station identity and block file location.
    pub station: StationSection,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Radio interfaces, registered in this order.
    pub interfaces: Vec<InterfaceConfig>,
}

/// The `[station]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StationSection {
    /// Own callsign; `$mycall` in block files resolves to this.
    pub mycall: String,

    /// Path to the file holding `<digipeater>` blocks, relative to the
    /// station file.
    pub digipeaters: Option<String>,
}

impl Default for StationSection {
    fn default() -> Self {
        Self {
            mycall: "N0CALL".to_string(),
            digipeaters: None,
        }
    }
}

/// One `[[interfaces]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InterfaceConfig {
    /// Callsign the interface is known by.
    pub callsign: String,

    /// Whether the interface may transmit (required for a digipeater's
    /// `transmit`).
    #[serde(default)]
    pub tx_ok: bool,
}

/// The `[logging]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub level: String,

    /// Output format: `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: StationConfig = toml::from_str("").unwrap();
        assert_eq!(config.station.mycall, "N0CALL");
        assert!(config.station.digipeaters.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.interfaces.is_empty());
    }

    #[test]
    fn interfaces_default_to_receive_only() {
        let config: StationConfig = toml::from_str(
            r#"
            [station]
            mycall = "OH2MQK-1"

            [[interfaces]]
            callsign = "OH2MQK-1"
            tx_ok = true

            [[interfaces]]
            callsign = "OH2MQK-2"
            "#,
        )
        .unwrap();
        assert_eq!(config.station.mycall, "OH2MQK-1");
        assert!(config.interfaces[0].tx_ok);
        assert!(!config.interfaces[1].tx_ok);
    }
}
