use std::fmt;

use actix_web::cookie::Key;

use crate::api::Credentials;
use crate::models::grid::{DEFAULT_MAX_COLUMNS_PER_PAGE, DEFAULT_MAX_EMPLOYEES_PER_COLUMN, GridLimits};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_BACKEND_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_APP_NAME: &str = "Attendance Board";
const MIN_SESSION_KEY_BYTES: usize = 64;

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}={:?}: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// What the dashboard handlers need from the configuration.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub app_name: String,
    pub grid: GridLimits,
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub app_name: String,
    pub backend_base_url: String,
    pub feed_url: String,
    pub credentials: Credentials,
    pub session_key: Key,
    pub grid: GridLimits,
}

impl AppConfig {
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings { app_name: self.app_name.clone(), grid: self.grid }
    }

    /// Read configuration from the process environment, after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend_base_url = non_empty("BACKEND_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let feed_url = non_empty("FEED_URL")
            .unwrap_or_else(|| format!("{backend_base_url}/user/dashboardlist"));

        let max_columns = parse_count(&lookup, "GRID_MAX_COLUMNS", DEFAULT_MAX_COLUMNS_PER_PAGE)?;
        let max_rows = parse_count(&lookup, "GRID_MAX_ROWS", DEFAULT_MAX_EMPLOYEES_PER_COLUMN)?;
        let grid = GridLimits::new(max_columns, max_rows).map_err(|e| ConfigError {
            key: "GRID_MAX_COLUMNS/GRID_MAX_ROWS",
            value: format!("{max_columns}/{max_rows}"),
            reason: e.to_string(),
        })?;

        Ok(AppConfig {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            app_name: non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            backend_base_url,
            feed_url,
            credentials: Credentials {
                access_token: non_empty("ACCESS_TOKEN"),
                refresh_token: non_empty("REFRESH_TOKEN"),
            },
            session_key: session_key(lookup("SESSION_KEY")),
            grid,
        })
    }
}

fn parse_count<F>(lookup: &F, key: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse::<usize>().map_err(|e| ConfigError {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Session encryption key; a short or missing SESSION_KEY falls back to a
/// random key, which loses sessions on restart.
fn session_key(value: Option<String>) -> Key {
    match value {
        Some(val) if val.len() >= MIN_SESSION_KEY_BYTES => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_BYTES}+), generating random key",
                val.len()
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.feed_url, "http://127.0.0.1:8000/api/v1/user/dashboardlist");
        assert_eq!(cfg.grid, GridLimits::default());
        assert!(cfg.credentials.access_token.is_none());
    }

    #[test]
    fn feed_url_follows_backend_base_url() {
        let cfg = config(&[("BACKEND_BASE_URL", "https://hr.example.com/api/")]).unwrap();
        assert_eq!(cfg.backend_base_url, "https://hr.example.com/api");
        assert_eq!(cfg.feed_url, "https://hr.example.com/api/user/dashboardlist");
    }

    #[test]
    fn grid_limits_are_parsed() {
        let cfg = config(&[("GRID_MAX_COLUMNS", "6"), ("GRID_MAX_ROWS", " 15 ")]).unwrap();
        assert_eq!(cfg.grid.max_columns_per_page(), 6);
        assert_eq!(cfg.grid.max_employees_per_column(), 15);
    }

    #[test]
    fn bad_grid_limits_are_rejected() {
        let err = config(&[("GRID_MAX_ROWS", "lots")]).err().unwrap();
        assert_eq!(err.key, "GRID_MAX_ROWS");
        assert!(config(&[("GRID_MAX_COLUMNS", "0")]).is_err());
    }
}
