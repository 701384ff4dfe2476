//! Mailbox store configuration

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Where the mailbox database lives and how connections to it behave
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub pool_size: u32,
    /// How long a query waits on a locked database, and how long a
    /// caller waits for a pooled connection, before failing.
    pub busy_timeout: Duration,
}

impl StoreConfig {
    /// Configuration for the database at `path` with default pool
    /// settings.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }

    /// Load store configuration from environment variables
    ///
    /// Reads from `.env` file if present. Required variables:
    /// - `MAILBOX_DB_PATH`
    ///
    /// Optional (with defaults):
    /// - `MAILBOX_POOL_SIZE` (default: `8`)
    /// - `MAILBOX_BUSY_TIMEOUT_MS` (default: `5000`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = env::var("MAILBOX_DB_PATH")
            .map_err(|_| Error::Config("MAILBOX_DB_PATH not set".into()))?;

        Ok(Self {
            path: PathBuf::from(path),
            pool_size: parse_var("MAILBOX_POOL_SIZE", DEFAULT_POOL_SIZE)?,
            busy_timeout: Duration::from_millis(parse_var(
                "MAILBOX_BUSY_TIMEOUT_MS",
                DEFAULT_BUSY_TIMEOUT_MS,
            )?),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env::var(name).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| Error::Config(format!("Invalid {name}: {e}")))
    })
}
