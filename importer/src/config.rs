//! Database configuration.
//!
//! Built from the environment (after `.env` is loaded by the binary) and
//! handed to [`crate::store::PgRecordStore::connect`]. Nothing here is global.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Table written to when none is configured.
pub const DEFAULT_TABLE: &str = "public.word_profiles";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the PostgreSQL record store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    /// Target table, optionally schema-qualified.
    pub table: String,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Configuration with defaults for everything but the URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            table: DEFAULT_TABLE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Read `DATABASE_URL`, `LEXILOAD_TABLE` and `DATABASE_CONNECT_TIMEOUT_SECS`.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_with_url(None)
    }

    /// Like [`DatabaseConfig::from_env`], with `database_url` taking
    /// precedence over `DATABASE_URL` when given.
    pub fn from_env_with_url(database_url: Option<String>) -> ConfigResult<Self> {
        Self::from_lookup(|key| match (key, &database_url) {
            ("DATABASE_URL", Some(url)) => Some(url.clone()),
            _ => std::env::var(key).ok(),
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut config = Self::new(database_url);

        if let Some(table) = lookup("LEXILOAD_TABLE") {
            config = config.with_table(table)?;
        }

        if let Some(raw) = lookup("DATABASE_CONNECT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: "DATABASE_CONNECT_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the target table. The name is interpolated into SQL, so it
    /// must be a plain identifier or `schema.table`.
    pub fn with_table(mut self, table: impl Into<String>) -> ConfigResult<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        self.table = table;
        Ok(self)
    }
}

/// Accept `name` or `schema.name` where each part is `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_table_name(table: &str) -> ConfigResult<()> {
    let parts: Vec<&str> = table.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidTableName(table.to_string()))
    }
}

/// Hide the password before a URL reaches the logs.
pub fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let mut masked = parsed.clone();
            if parsed.password().is_some() {
                let _ = masked.set_password(Some("***"));
            }
            masked.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
