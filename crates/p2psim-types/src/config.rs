//! # p2psim-types::config
//!
//! Strongly-typed mirror of the hierarchical configuration schema used to
//! wire up a simulation run. TOML is the concrete format the crate
//! deserializes; these types are the authoritative schema.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationSection,
    pub setup: SetupSection,
    #[serde(default)]
    pub default_global_network: DefaultGlobalNetworkSection,
    #[serde(default)]
    pub logger: LoggerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    pub name: String,
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSection {
    /// `[name, arg]`, e.g. `["time", "10.0"]`.
    pub end_condition: (String, String),
    pub global_network: String,
    pub global_state: String,
    pub node_list: Vec<String>,
    pub node_count_list: Vec<usize>,
    pub node_network_list: Vec<String>,
    pub node_behavior_list: Vec<String>,
    #[serde(default)]
    pub node_applications_list: Vec<Vec<String>>,
}

impl SetupSection {
    /// Validates that the parallel per-node-kind lists agree in length.
    /// Mirrors the CLI `validate` subcommand and the construction-time
    /// checks `NewSimulationFromConfig` performs in the source before any
    /// node is instantiated: a configuration bug must be loud.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_list.is_empty() {
            return Err(ConfigError::Missing("setup.node_list"));
        }
        let n = self.node_list.len();
        if self.node_count_list.len() != n {
            return Err(ConfigError::ListLengthMismatch {
                key: "setup.node_count_list",
                expected: n,
                got: self.node_count_list.len(),
            });
        }
        if self.node_network_list.len() != n {
            return Err(ConfigError::ListLengthMismatch {
                key: "setup.node_network_list",
                expected: n,
                got: self.node_network_list.len(),
            });
        }
        if self.node_behavior_list.len() != n {
            return Err(ConfigError::ListLengthMismatch {
                key: "setup.node_behavior_list",
                expected: n,
                got: self.node_behavior_list.len(),
            });
        }
        if !self.node_applications_list.is_empty() && self.node_applications_list.len() != n {
            return Err(ConfigError::ListLengthMismatch {
                key: "setup.node_applications_list",
                expected: n,
                got: self.node_applications_list.len(),
            });
        }
        Ok(())
    }
}

/// Mirrors `layers/global_network/default.go`'s `DEFAULT_BROADCAST_DISTRIBUTION`
/// constant: exponential, mean 0.109s, floor 0.01s, unbounded above.
pub const DEFAULT_BROADCAST_DISTRIBUTION: &str = "exponential";
pub const DEFAULT_BROADCAST_CONFIG: [&str; 3] = ["0.109", "0.01", "-1.0"];

/// Mirrors `layers/global_network/default.go`'s `DEFAULT_P2P_DISTRIBUTION`
/// constant: normal, mean 0.05s, stddev 0.05s, clamped to [0.01s, 0.5s].
pub const DEFAULT_P2P_DISTRIBUTION: &str = "normal";
pub const DEFAULT_P2P_CONFIG: [&str; 4] = ["0.05", "0.05", "0.01", "0.5"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultGlobalNetworkSection {
    pub broadcast_distribution: String,
    pub broadcast_config: Vec<String>,
    pub p2p_distribution: String,
    pub p2p_config: Vec<String>,
}

impl Default for DefaultGlobalNetworkSection {
    /// So a config file that omits this section entirely still produces a
    /// runnable simulation.
    fn default() -> Self {
        Self {
            broadcast_distribution: DEFAULT_BROADCAST_DISTRIBUTION.to_string(),
            broadcast_config: DEFAULT_BROADCAST_CONFIG.iter().map(|s| s.to_string()).collect(),
            p2p_distribution: DEFAULT_P2P_DISTRIBUTION.to_string(),
            p2p_config: DEFAULT_P2P_CONFIG.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub output_list: Vec<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggerSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            output_list: vec!["stdout".to_string()],
            tag_list: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.setup.validate()?;
        Ok(config)
    }
}
