//! Configuration module for the token ring.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use crate::driver::RingParams;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line arguments for the token ring
#[derive(Parser, Debug)]
#[command(name = "token-ring")]
#[command(author = "token-ring authors")]
#[command(version = "0.1.0")]
#[command(about = "Simulates a token-ring network with one circulating token", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of nodes in the ring
    #[arg(short = 'n', long)]
    pub nodes: Option<usize>,

    /// Hop budget of the token
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub ttl: Option<i64>,

    /// Id of the node the message is addressed to (defaults to the last node)
    #[arg(short = 'r', long)]
    pub recipient: Option<usize>,

    /// Message carried by the token
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// Ask for the ring parameters on stdin
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Stop the ring once the token is delivered or expires
    #[arg(short = 'x', long)]
    pub exit_when_settled: bool,

    /// Number of runtime worker threads (defaults to number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ring parameters
#[derive(Debug, Deserialize)]
pub struct RingConfig {
    /// Number of nodes
    #[serde(default = "default_nodes")]
    pub nodes: usize,
    /// Initial hop budget
    #[serde(default = "default_ttl")]
    pub ttl: i64,
    /// Recipient node id
    pub recipient: Option<usize>,
    /// Message text
    #[serde(default)]
    pub message: String,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            ttl: default_ttl(),
            recipient: None,
            message: String::new(),
        }
    }
}

/// Runtime-related configuration
#[derive(Debug, Deserialize, Default)]
pub struct RuntimeConfig {
    /// Number of worker threads
    pub workers: Option<usize>,
    /// Stop once the token settles
    #[serde(default)]
    pub exit_when_settled: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub(crate) fn default_nodes() -> usize {
    10
}

pub(crate) fn default_ttl() -> i64 {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub nodes: usize,
    pub ttl: i64,
    pub recipient: Option<usize>,
    pub message: String,
    pub interactive: bool,
    pub exit_when_settled: bool,
    pub workers: Option<usize>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        // Load TOML config if specified
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Ok(Self::merge(cli, toml_config))
    }

    /// Merge CLI args with TOML config (CLI takes precedence)
    fn merge(cli: CliArgs, toml_config: TomlConfig) -> Self {
        Config {
            nodes: cli.nodes.unwrap_or(toml_config.ring.nodes),
            ttl: cli.ttl.unwrap_or(toml_config.ring.ttl),
            recipient: cli.recipient.or(toml_config.ring.recipient),
            message: cli.message.unwrap_or(toml_config.ring.message),
            interactive: cli.interactive,
            exit_when_settled: cli.exit_when_settled || toml_config.runtime.exit_when_settled,
            workers: cli.workers.or(toml_config.runtime.workers),
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        }
    }

    /// Ring parameters; the recipient defaults to the last node.
    pub fn params(&self) -> RingParams {
        RingParams {
            node_count: self.nodes,
            initial_ttl: self.ttl,
            recipient_id: self.recipient.unwrap_or(self.nodes.saturating_sub(1)),
            message: self.message.clone(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    TomlParse(PathBuf, toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.ring.nodes, 10);
        assert_eq!(config.ring.ttl, 6);
        assert_eq!(config.ring.recipient, None);
        assert!(!config.runtime.exit_when_settled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [ring]
            nodes = 4
            ttl = 3
            recipient = 0
            message = "hello"

            [runtime]
            workers = 2
            exit_when_settled = true

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ring.nodes, 4);
        assert_eq!(config.ring.ttl, 3);
        assert_eq!(config.ring.recipient, Some(0));
        assert_eq!(config.ring.message, "hello");
        assert_eq!(config.runtime.workers, Some(2));
        assert!(config.runtime.exit_when_settled);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_overrides_file() {
        let toml_config: TomlConfig = toml::from_str(
            r#"
            [ring]
            nodes = 4
            message = "from file"

            [logging]
            level = "warn"
        "#,
        )
        .unwrap();
        let cli = CliArgs::parse_from(["token-ring", "-n", "3", "--ttl", "1", "-x"]);

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.nodes, 3);
        assert_eq!(config.ttl, 1);
        assert_eq!(config.message, "from file");
        assert!(config.exit_when_settled);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_params_default_recipient_is_last_node() {
        let cli = CliArgs::parse_from(["token-ring", "--nodes", "5", "-m", "hi"]);
        let params = Config::merge(cli, TomlConfig::default()).params();

        assert_eq!(params.node_count, 5);
        assert_eq!(params.initial_ttl, 6);
        assert_eq!(params.recipient_id, 4);
        assert_eq!(params.message, "hi");
    }

    #[test]
    fn test_explicit_recipient() {
        let cli = CliArgs::parse_from(["token-ring", "-n", "3", "-r", "0"]);
        let params = Config::merge(cli, TomlConfig::default()).params();
        assert_eq!(params.recipient_id, 0);
    }

    #[test]
    fn test_negative_ttl_from_cli() {
        let cli = CliArgs::parse_from(["token-ring", "-n", "2", "--ttl", "-1"]);
        let params = Config::merge(cli, TomlConfig::default()).params();
        assert_eq!(params.initial_ttl, -1);
    }
}
