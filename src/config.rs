use crate::error::ConfigError;
use crate::quote::RateTable;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "shipping-calculator")]
#[command(about = "Serves the shipping cost calculator and its quote API")]
pub struct ServerConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: std::net::IpAddr,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, help = "Directory holding shipping-calculator.html")]
    pub assets_dir: Option<PathBuf>,

    #[arg(long, help = "TOML file replacing the built-in rate table")]
    pub rates_file: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [0, 0, 0, 0].into(),
            port: 8000,
            assets_dir: None,
            rates_file: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                message: "port must be non-zero".to_string(),
            });
        }

        if let Some(dir) = &self.assets_dir {
            if !dir.is_dir() {
                return Err(ConfigError::Invalid {
                    message: format!("assets directory not found: {}", dir.display()),
                });
            }
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Loads the configured rate file, or the built-in table when none is set.
    pub fn load_rates(&self) -> Result<RateTable, ConfigError> {
        match &self.rates_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading rate table");
                RateTable::from_file(path)
            }
            None => Ok(RateTable::standard()),
        }
    }
}
