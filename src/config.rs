use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::{env, fmt::Display, str::FromStr};
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// MySQL connection string. When absent the in-memory store is used.
    pub database_url: Option<String>,
    /// Shared secret checked against the `x-admin-key` header and the login password.
    pub admin_key: String,
    pub api_prefix: String,
    pub default_batch: String,

    // Logging
    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let admin_key = env::var("ADMIN_KEY").context("ADMIN_KEY must be set")?;
        if admin_key.is_empty() {
            bail!("ADMIN_KEY must not be empty");
        }

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:8080"),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            admin_key,
            api_prefix: normalize_prefix(&var_or("API_PREFIX", "/api")),
            default_batch: var_or("DEFAULT_BATCH", "JNU MIT 1st Year"),
            log_dir: var_or("LOG_DIR", "logs"),
            log_level: parse_var("LOG_LEVEL", "debug")?,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = var_or(key, default);
    raw.parse()
        .map_err(|e| anyhow::anyhow!("invalid {key} value {raw:?}: {e}"))
}

/// "/api/" and "api" both become "/api"; "" and "/" mean no prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("api/"), "/api");
        assert_eq!(normalize_prefix("/v1/api/"), "/v1/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn test_log_level_parses() {
        let level: Level = "info".parse().unwrap();
        assert_eq!(level, Level::INFO);
        assert!("loud".parse::<Level>().is_err());
    }
}
