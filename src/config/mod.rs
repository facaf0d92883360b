//! Environment configuration

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Runtime configuration, deserialized from environment variables.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// PostgreSQL connection URL (`DATABASE_URL`)
    pub database_url: String,

    /// Listen address (`HOST`), defaults to 127.0.0.1
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (`PORT`), defaults to 3000
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables, reading a `.env` file
    /// first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Self>()?;
        Ok(config)
    }

    /// The address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            database_url: "postgresql://localhost/biztime".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
