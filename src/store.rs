//! SQLite connection pool and the bridge from async callers to
//! blocking reads
//!
//! Every pooled connection is set up the same way: a busy timeout,
//! foreign keys on, and the `icontains` scalar function used by
//! search. Reads run on tokio's blocking pool inside one transaction,
//! so a multi-statement query sees a single snapshot.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::schema;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::time::Duration;
use tracing::{debug, info};

pub type DbPool = Pool<SqliteConnectionManager>;

/// Handle to the mailbox database. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Open (or create) the database file and build the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot open its connections or
    /// connection setup fails.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        debug!("Opening mailbox store at {}", config.path.display());

        let busy_timeout = config.busy_timeout;
        let manager = SqliteConnectionManager::file(&config.path)
            .with_init(move |conn| prepare_connection(conn, busy_timeout));

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.busy_timeout)
            .build(manager)?;

        pool.get()?.execute_batch("PRAGMA journal_mode = WAL;")?;

        info!(
            "Opened mailbox store at {} ({} connections)",
            config.path.display(),
            config.pool_size
        );
        Ok(Self { pool })
    }

    /// Create any missing tables and indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the DDL fails.
    pub async fn initialize_schema(&self) -> Result<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            schema::initialize_schema(&conn)?;
            Ok(())
        })
        .await??;

        info!("Mailbox schema ready");
        Ok(())
    }

    /// Run `f` against a pooled connection on the blocking pool.
    ///
    /// The whole closure runs in one read transaction. Dropping the
    /// returned future abandons the result; a pool timeout, SQLite
    /// error, or panic inside `f` fails the operation as a whole.
    pub(crate) async fn read<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        debug!("Running {op}");

        tokio::task::spawn_blocking(move || -> Result<T> {
            let conn = pool.get()?;
            let tx = conn.unchecked_transaction()?;
            let out = f(&tx)?;
            tx.commit()?;
            Ok(out)
        })
        .await?
    }
}

fn prepare_connection(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.create_scalar_function(
        "icontains",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: Option<String> = ctx.get(0)?;
            let needle: Option<String> = ctx.get(1)?;
            Ok(match (haystack, needle) {
                (Some(haystack), Some(needle)) => contains_ignore_case(&haystack, &needle),
                _ => false,
            })
        },
    )
}

/// Unicode-aware case-insensitive substring test.
///
/// SQLite's own `LIKE` and `lower()` only fold ASCII, and `LIKE` treats
/// `%` and `_` in the needle as wildcards.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
