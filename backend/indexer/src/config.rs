//! Application configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};

/// `getEvents` rejects page sizes above this.
const MAX_EVENTS_PER_PAGE: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// The fair-launch contract address (Strkey format)
    pub contract_id: String,
    /// SQLite URL or bare file path; created on first start
    pub database_url: String,
    pub api_port: u16,
    /// Seconds between polls
    pub poll_interval_secs: u64,
    pub events_per_page: u32,
    /// Ledger to scan from when no cursor is saved, normally the ledger the
    /// contract was deployed in
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Config {
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "https://soroban-testnet.stellar.org".to_string()),
            contract_id: env_var("CONTRACT_ID").map_err(|_| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./fair_launch_events.db".to_string()),
            api_port: parse_or("API_PORT", 3001)?,
            poll_interval_secs: parse_or("POLL_INTERVAL_SECS", 5)?,
            events_per_page: parse_or("EVENTS_PER_PAGE", 100)?,
            start_ledger: parse_or("START_LEDGER", 0)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.contract_id.trim().is_empty() {
            return Err(IndexerError::Config("CONTRACT_ID is empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(IndexerError::Config(
                "POLL_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_EVENTS_PER_PAGE).contains(&self.events_per_page) {
            return Err(IndexerError::Config(format!(
                "EVENTS_PER_PAGE must be between 1 and {MAX_EVENTS_PER_PAGE}"
            )));
        }
        Ok(())
    }

    pub fn api_addr(&self) -> String {
        format!("0.0.0.0:{}", self.api_port)
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| IndexerError::Config(format!("Missing env var: {key}")))
}

/// Parse `key` if set, otherwise fall back to `default`.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env_var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| IndexerError::Config(format!("Invalid {key}: {raw:?}"))),
        Err(_) => Ok(default),
    }
}
