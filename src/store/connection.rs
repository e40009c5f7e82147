use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};

use crate::store::error::{Error, Result};

/// Configuration for the message store connection
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite database URL (e.g. `sqlite://chatbot.db`)
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Create the database file if it does not exist
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://chatbot.db".to_string(),
            max_connections: 5,
            create_if_missing: true,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration for the given database URL
    ///
    /// # Example
    ///
    /// ```
    /// use message_relay::store::StoreConfig;
    ///
    /// let config = StoreConfig::from_url("sqlite://data/chatbot.db").unwrap();
    /// assert_eq!(config.database_url, "sqlite://data/chatbot.db");
    /// ```
    pub fn from_url(database_url: &str) -> Result<Self> {
        if !database_url.starts_with("sqlite:") {
            return Err(Error::ValidationError(format!(
                "Unsupported database URL '{}': expected a sqlite: URL",
                database_url
            )));
        }

        Ok(Self {
            database_url: normalize_sqlite_url(database_url),
            ..Default::default()
        })
    }

    /// Set the maximum pool size
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Build a connection pool from this configuration
    pub async fn build_pool(&self) -> Result<SqlitePool> {
        if self.max_connections == 0 {
            return Err(Error::ValidationError(
                "max_connections must be at least 1".to_string(),
            ));
        }

        ensure_parent_dir(&self.database_url)?;

        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(self.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| Error::ConnectionError(e.to_string()))?;

        Ok(pool)
    }
}

/// Expand a leading `~/` in a file-backed SQLite URL and prefer the
/// `sqlite://` form. In-memory URLs pass through untouched.
fn normalize_sqlite_url(url: &str) -> String {
    if url.starts_with("sqlite::memory") {
        return url.to_string();
    }

    let rest = &url["sqlite:".len()..];
    let path_with_query = rest.strip_prefix("//").unwrap_or(rest);
    if path_with_query.is_empty() {
        return url.to_string();
    }

    let expanded = match path_with_query.strip_prefix("~/") {
        Some(tail) => match std::env::var("HOME") {
            Ok(home) => format!("{}/{}", home.trim_end_matches('/'), tail),
            Err(_) => path_with_query.to_string(),
        },
        None => path_with_query.to_string(),
    };

    format!("sqlite://{}", expanded)
}

/// Create the parent directory of a file-backed database if needed
fn ensure_parent_dir(url: &str) -> Result<()> {
    let Some(path_with_query) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path_with_query
        .split_once('?')
        .map(|(p, _)| p)
        .unwrap_or(path_with_query);

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConnectionError(format!(
                    "Failed to create database directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
