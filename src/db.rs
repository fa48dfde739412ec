//! SQLite pool construction for [`crate::repository::DieselRepository`].
//!
//! Every pooled connection gets the pragmas from [`SqliteOptions`] and the
//! `unicode_lower` SQL function used by the case-insensitive searches.

use std::fmt;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::expression::functions::define_sql_function;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sql_types::{Nullable, Text};
use diesel::sqlite::SqliteConnection;
use serde::Deserialize;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

define_sql_function! {
    /// Lowercases text with full Unicode case mapping. SQLite's built-in
    /// `lower` only folds ASCII.
    fn unicode_lower(value: Nullable<Text>) -> Nullable<Text>;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl fmt::Display for JournalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        };
        f.write_str(mode)
    }
}

/// Per-connection SQLite settings, read from the `database.sqlite` config section.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SqliteOptions {
    pub journal_mode: JournalMode,
    /// Required for the appointment -> client cascade.
    pub foreign_keys: bool,
    /// How long a writer waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    pub max_connections: u32,
}

impl Default for SqliteOptions {
    fn default() -> Self {
        Self {
            journal_mode: JournalMode::Wal,
            foreign_keys: true,
            busy_timeout_ms: 5_000,
            max_connections: 10,
        }
    }
}

impl SqliteOptions {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    fn pragmas(&self) -> String {
        let mut pragmas = format!("PRAGMA journal_mode = {};", self.journal_mode);
        if self.journal_mode == JournalMode::Wal {
            pragmas.push_str(" PRAGMA synchronous = NORMAL;");
        }
        pragmas.push_str(&format!(
            " PRAGMA foreign_keys = {};",
            if self.foreign_keys { "ON" } else { "OFF" }
        ));
        pragmas.push_str(&format!(
            " PRAGMA busy_timeout = {};",
            self.busy_timeout().as_millis()
        ));
        pragmas
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.pragmas())
            .and_then(|()| {
                unicode_lower_utils::register_impl(conn, |value: Option<String>| {
                    value.map(|text| text.to_lowercase())
                })
            })
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool for `database_url`, applying `options` to
/// every connection it hands out.
pub fn establish_connection_pool(
    database_url: &str,
    options: &SqliteOptions,
) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(options.max_connections.max(1))
        .connection_timeout(options.busy_timeout().max(Duration::from_secs(1)))
        .connection_customizer(Box::new(options.clone()))
        .build(manager)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get()
        .inspect_err(|e| log::error!("Failed to get connection from pool: {e}"))
}
