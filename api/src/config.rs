use std::error::Error;

use chrono::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://sample_customer.db";
const DEFAULT_SECRET: &str = "secretkey";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TTL_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub token_ttl: Duration,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Box<dyn Error>> {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the built-in development secret");
            DEFAULT_SECRET.to_string()
        });

        let ttl_minutes = match lookup("TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| format!("TOKEN_TTL_MINUTES must be an integer: {e}"))?,
            None => DEFAULT_TTL_MINUTES,
        };
        if ttl_minutes <= 0 {
            return Err("TOKEN_TTL_MINUTES must be positive".into());
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            token_ttl: Duration::minutes(ttl_minutes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.jwt_secret, DEFAULT_SECRET);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.token_ttl, Duration::minutes(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("TOKEN_TTL_MINUTES", "5"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.token_ttl, Duration::minutes(5));
    }

    #[test]
    fn test_rejects_bad_ttl() {
        assert!(Config::from_lookup(lookup_from(&[("TOKEN_TTL_MINUTES", "soon")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("TOKEN_TTL_MINUTES", "0")])).is_err());
    }
}
