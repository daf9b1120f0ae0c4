//! Server configuration and CLI arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{Error, Result};

/// Command-line arguments for the measurements server binary.
#[derive(Debug, Parser)]
#[command(
    name = "measurements-server",
    about = "Sensor measurement ingestion and range query service"
)]
pub struct CliArgs {
    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Path to a YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default sensor identity, overriding the config file.
    #[arg(long)]
    pub sensor_name: Option<String>,

    /// Table name, overriding the config file.
    #[arg(long)]
    pub table: Option<String>,
}

impl CliArgs {
    /// Builds the service configuration from the config file (when given)
    /// and CLI overrides.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Configuration(format!("cannot read {}: {}", path.display(), e))
                })?;
                serde_yaml::from_str(&raw).map_err(|e| {
                    Error::Configuration(format!("cannot parse {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };

        if let Some(sensor_name) = &self.sensor_name {
            config.sensor_name = sensor_name.clone();
        }
        if let Some(table) = &self.table {
            config.table = table.clone();
        }
        Ok(config)
    }
}

/// Configuration for the HTTP server itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self { port: args.port }
    }
}
