use std::env;

use anyhow::{anyhow, Context};
use tracing::Level;

const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub database_pool_size: u32,
    pub log_level: Level,
}

impl Config {
    // reads configuration from the process environment (call dotenvy first)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_address = lookup("BIND_ADDRESS").ok_or_else(|| anyhow!("BIND_ADDRESS must be set"))?;
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
        let database_pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("DATABASE_POOL_SIZE is not a positive number: {v}"))?,
            None => DEFAULT_POOL_SIZE,
        };
        let log_level = match lookup("LOG_LEVEL") {
            Some(v) => v
                .parse::<Level>()
                .map_err(|_| anyhow!("LOG_LEVEL is not a valid level: {v}"))?,
            None => Level::INFO,
        };
        Ok(Config {
            bind_address,
            database_url,
            database_pool_size,
            log_level,
        })
    }
}
