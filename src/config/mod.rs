use std::env;
use std::time::Duration;

use chrono_tz::Tz;

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Unknown reporting timezone: {0}")]
    InvalidTimezone(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub jwt_refresh_token_expiry_secs: i64,
    pub frontend_url: String,
    pub reporting_timezone: Tz,
    pub dashboard_timeout: Duration,
    pub session_cookie_secure: bool,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let parsed = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timezone_name = parsed("REPORTING_TIMEZONE", "UTC");
        let reporting_timezone: Tz = timezone_name
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(timezone_name.clone()))?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .unwrap_or(10),
            host: parsed("BACKEND_HOST", "0.0.0.0"),
            port: parsed("BACKEND_PORT", "3000").parse().unwrap_or(3000),
            jwt_secret: required("JWT_SECRET")?,
            jwt_access_token_expiry_secs: parsed("JWT_ACCESS_TOKEN_EXPIRY_SECS", "900")
                .parse()
                .unwrap_or(900),
            jwt_refresh_token_expiry_secs: parsed("JWT_REFRESH_TOKEN_EXPIRY_SECS", "604800")
                .parse()
                .unwrap_or(604800),
            frontend_url: parsed("FRONTEND_URL", "https://localhost:5173"),
            reporting_timezone,
            dashboard_timeout: Duration::from_millis(
                parsed("DASHBOARD_TIMEOUT_MS", "10000")
                    .parse()
                    .unwrap_or(10_000),
            ),
            session_cookie_secure: parsed("SESSION_COOKIE_SECURE", "true")
                .parse()
                .unwrap_or(true),
            tls_cert_path: lookup("TLS_CERT_PATH"),
            tls_key_path: lookup("TLS_KEY_PATH"),
        })
    }

    /// Certificate and key paths, when both are configured.
    pub fn tls_paths(&self) -> Option<(&str, &str)> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/villahub"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.reporting_timezone, Tz::UTC);
        assert_eq!(config.dashboard_timeout, Duration::from_secs(10));
        assert!(config.session_cookie_secure);
        assert!(config.tls_paths().is_none());
    }

    #[test]
    fn missing_secret_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/villahub",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn reporting_timezone_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/villahub"),
            ("JWT_SECRET", "secret"),
            ("REPORTING_TIMEZONE", "Asia/Makassar"),
            ("DASHBOARD_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.reporting_timezone, chrono_tz::Asia::Makassar);
        assert_eq!(config.dashboard_timeout, Duration::from_millis(250));
    }

    #[test]
    fn unknown_timezone_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/villahub"),
            ("JWT_SECRET", "secret"),
            ("REPORTING_TIMEZONE", "Mars/Olympus"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimezone(_)));
    }

    #[test]
    fn tls_requires_both_paths() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/villahub"),
            ("JWT_SECRET", "secret"),
            ("TLS_CERT_PATH", "/etc/villahub/cert.pem"),
        ]))
        .unwrap();
        assert!(config.tls_paths().is_none());
    }
}
