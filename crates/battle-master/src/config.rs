//! Configuration for the master process.
//!
//! Defaults work out of the box; override via environment variables:
//!
//! - `BATTLE_BIND_ADDR`   (default: "0.0.0.0")
//! - `BATTLE_PORT`        (default: "7771")
//! - `BATTLE_MAX_CLIENTS` (default: "16")
//! - `BATTLE_ROOM`        (default: "default")

use std::env;
use std::str::FromStr;

use anyhow::Result;

/// Master process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to.
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Room this master coordinates.
    pub room_id: String,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("BATTLE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = read_env_or_default("BATTLE_PORT", 7771u16)?;
        let max_clients = read_env_or_default("BATTLE_MAX_CLIENTS", 16usize)?;
        let room_id = env::var("BATTLE_ROOM").unwrap_or_else(|_| "default".to_string());

        Ok(Config {
            bind_addr,
            port,
            max_clients,
            room_id,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => Ok(val.parse::<T>()?),
        Err(_) => Ok(default),
    }
}
