//! Server configuration
//!
//! All runtime settings live in an explicit struct built once at
//! startup and passed into the pieces that need them.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Bearer token required on /api routes; auth is disabled when unset
    pub api_key: Option<String>,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Build from the environment (a .env file is honored if present)
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let api_key = env::var("API_KEY").ok().filter(|key| !key.is_empty());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            bind_addr,
            api_key,
            max_connections,
        })
    }
}
