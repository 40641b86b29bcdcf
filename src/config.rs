// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// `postgres://...` or `sqlite:...`; the scheme picks the repository.
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub max_connections: u32,
    pub rust_log: String,
    /// Directory for the daily-rolling log file.
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let server_addr = env::var("SERVER_ADDR")
            .ok()
            .and_then(|addr| addr.parse::<SocketAddr>().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            server_addr,
            max_connections,
            rust_log,
            log_dir,
        }
    }
}
