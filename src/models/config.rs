//! Configuration model loaded from external sources.

use serde::{Deserialize, Deserializer};

use crate::db::SqliteOptions;

#[derive(Clone, Debug, Default, Deserialize)]
/// Connection parameters for the relational store.
pub struct DatabaseSettings {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name; for SQLite this is the database file path.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sslmode: String,
    /// Pragmas and pool sizing applied to every connection.
    #[serde(default)]
    pub sqlite: SqliteOptions,
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub debug: bool,
    pub address: String,
    pub port: u16,
    /// Full connection URL; takes precedence over [`ServerConfig::database`].
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub database: DatabaseSettings,
    /// Allowed cross-origin request sources. `*` allows any origin.
    #[serde(default, deserialize_with = "deserialize_origins")]
    pub cors_origins: Vec<String>,
    /// Declared for token issuing; not used by the scheduling endpoints.
    pub secret_key: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_token_expiry")]
    pub access_token_expire_minutes: u32,
    /// Declared for a future synchronization job; nothing reads it yet.
    #[serde(default = "default_sync_interval")]
    pub sync_interval_minutes: u32,
}

impl ServerConfig {
    /// Resolves the database location handed to the connection pool.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or_else(|| {
                let name = self.database.name.trim();
                (!name.is_empty()).then(|| name.to_string())
            })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn default_app_name() -> String {
    "Scheduling CRM".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_token_expiry() -> u32 {
    30
}

fn default_sync_interval() -> u32 {
    5
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Origins {
    List(Vec<String>),
    Csv(String),
}

/// Accepts either a list of origins or a single comma-separated string, as
/// environment variables can only carry the latter.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}
