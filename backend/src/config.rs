//! # Configuration
//!
//! Server configuration resolved once at startup from environment variables
//! (after loading an optional `.env` file) and handed to the storage layer by
//! reference.
//!
//! | Env Var                 | Default                  |
//! |-------------------------|--------------------------|
//! | `HOST`                  | `127.0.0.1`              |
//! | `PORT`                  | `3000`                   |
//! | `PRODE_STORAGE`         | `file`                   |
//! | `PRODE_DATA_PATH`       | `./data`                 |
//! | `VERCEL`                | unset                    |
//! | `DATABASE_URL`          | required for `table`     |
//! | `PRODE_TABLE`           | `prodes`                 |
//! | `PRODE_TABLE_BOOTSTRAP` | `false`                  |
//! | `CORS_ORIGINS`          | `http://localhost:8080`  |
//! | `PRODE_STATIC_DIR`      | `frontend/dist`          |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_TABLE_NAME: &str = "prodes";
const DATA_FILE_NAME: &str = "prode.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(String),
    #[error("PORT must be a valid u16: {0}")]
    InvalidPort(String),
    #[error("PRODE_STORAGE must be 'file' or 'table', got '{0}'")]
    UnknownStorage(String),
    #[error("DATABASE_URL must be set when PRODE_STORAGE=table")]
    MissingDatabaseUrl,
    #[error("PRODE_TABLE is not a valid table name: {0}")]
    InvalidTableName(String),
    #[error("PRODE_TABLE_BOOTSTRAP must be true or false, got '{0}'")]
    InvalidFlag(String),
}

/// Where predictions are persisted
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    /// A single pretty-printed JSON array inside `data_dir`
    File { data_dir: PathBuf },
    /// A hosted relational table reached through `database_url`
    Table {
        database_url: String,
        table_name: String,
        bootstrap: bool,
    },
}

impl StorageConfig {
    pub fn describe(&self) -> String {
        match self {
            StorageConfig::File { data_dir } => {
                format!("json file {}", data_dir.join(DATA_FILE_NAME).display())
            }
            StorageConfig::Table { table_name, .. } => format!("table '{}'", table_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub storage: StorageConfig,
    pub cors_origins: Vec<String>,
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load `.env` if present, then resolve from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host_raw = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let host: IpAddr = host_raw
            .parse()
            .map_err(|_| ConfigError::InvalidHost(host_raw.clone()))?;

        let port_raw = var("PORT").unwrap_or_else(|| "3000".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        let storage_kind = var("PRODE_STORAGE").unwrap_or_else(|| "file".to_string());
        let storage = match storage_kind.to_lowercase().as_str() {
            "file" | "json" => StorageConfig::File {
                data_dir: resolve_data_dir(var("PRODE_DATA_PATH"), var("VERCEL").is_some()),
            },
            "table" | "hosted" => {
                let database_url = var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
                let table_name =
                    var("PRODE_TABLE").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
                if !is_valid_identifier(&table_name) {
                    return Err(ConfigError::InvalidTableName(table_name));
                }
                let bootstrap = match var("PRODE_TABLE_BOOTSTRAP") {
                    None => false,
                    Some(flag) => parse_flag(&flag).ok_or(ConfigError::InvalidFlag(flag))?,
                };
                StorageConfig::Table {
                    database_url,
                    table_name,
                    bootstrap,
                }
            }
            _ => return Err(ConfigError::UnknownStorage(storage_kind)),
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:8080".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let static_dir =
            PathBuf::from(var("PRODE_STATIC_DIR").unwrap_or_else(|| "frontend/dist".to_string()));

        Ok(Self {
            host,
            port,
            storage,
            cors_origins,
            static_dir,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Explicit path wins; read-only deployments fall back to an ephemeral temp dir
/// that does not survive a redeploy; otherwise `./data`.
fn resolve_data_dir(explicit: Option<String>, read_only_platform: bool) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(path),
        None if read_only_platform => std::env::temp_dir().join("prode-data"),
        None => PathBuf::from("data"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Table names are interpolated into SQL, so only plain identifiers are allowed
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
