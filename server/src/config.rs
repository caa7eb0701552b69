//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name}: invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which document store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite { path: PathBuf, busy_timeout: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub base_path: String,
    pub store: StoreBackend,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            base_path: "/api".to_string(),
            store: StoreBackend::Sqlite {
                path: PathBuf::from("todos.db"),
                busy_timeout: Duration::from_millis(5000),
            },
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment, after applying any `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind = match (lookup("TODO_BIND"), lookup("PORT")) {
            (Some(bind), _) => parse("TODO_BIND", bind)?,
            (None, Some(port)) => parse("PORT", format!("127.0.0.1:{port}"))?,
            (None, None) => defaults.bind,
        };

        let base_path = match lookup("TODO_BASE_PATH") {
            Some(path) => base_path(path)?,
            None => defaults.base_path,
        };

        let store = match lookup("TODO_STORE").as_deref() {
            None | Some("sqlite") => StoreBackend::Sqlite {
                path: lookup("TODO_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("todos.db")),
                busy_timeout: match lookup("TODO_DB_BUSY_TIMEOUT_MS") {
                    Some(ms) => Duration::from_millis(parse("TODO_DB_BUSY_TIMEOUT_MS", ms)?),
                    None => Duration::from_millis(5000),
                },
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "TODO_STORE",
                    value: other.to_string(),
                    reason: "expected `sqlite` or `memory`".to_string(),
                })
            }
        };

        let log_json = match lookup("TODO_LOG_JSON") {
            Some(value) => env_bool("TODO_LOG_JSON", value)?,
            None => defaults.log_json,
        };

        Ok(Self {
            bind,
            base_path,
            store,
            log_json,
        })
    }
}

fn parse<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

fn env_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.as_str() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

/// Normalise the route prefix: leading slash required, trailing slash dropped.
fn base_path(value: String) -> Result<String, ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid {
            name: "TODO_BASE_PATH",
            value,
            reason: "must start with `/`".to_string(),
        });
    }
    Ok(value.trim_end_matches('/').to_string())
}
