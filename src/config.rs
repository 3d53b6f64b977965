//! Service configuration.
//!
//! Loaded from environment variables (with `.env` support via dotenvy),
//! falling back to compiled defaults. Fetch cadence and the accepted
//! email domain are product configuration, not code.

use std::env;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::fetch::RosterSource;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default seconds between roster refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Default seconds before the single retry after a failed refresh.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Runtime configuration for the service and CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered candidate roster sources.
    pub sources: Vec<RosterSource>,
    /// Time between roster refreshes.
    pub refresh_interval: Duration,
    /// Delay before the one retry following a failed refresh.
    pub retry_delay: Duration,
    /// Institutional email domain accepted by signup validation.
    pub email_domain: String,
    /// HTTP port to listen on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            email_domain: crate::validation::DEFAULT_EMAIL_DOMAIN.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `ROSTER_URLS` (semicolon-separated, in
    /// fallback order), `REFRESH_INTERVAL_SECS`, `RETRY_DELAY_SECS`,
    /// `SIGNUP_EMAIL_DOMAIN`, `PORT`. Unset variables keep their
    /// defaults; set-but-unparseable ones are errors.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let sources = env::var("ROSTER_URLS")
            .map(|raw| parse_sources(&raw))
            .unwrap_or_default();

        let refresh_interval = secs_var("REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?;
        let retry_delay = secs_var("RETRY_DELAY_SECS", DEFAULT_RETRY_DELAY_SECS)?;

        let email_domain = env::var("SIGNUP_EMAIL_DOMAIN")
            .unwrap_or_else(|_| crate::validation::DEFAULT_EMAIL_DOMAIN.to_string());

        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "PORT",
                value,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            sources,
            refresh_interval,
            retry_delay,
            email_domain,
            port,
        })
    }
}

/// Parse a semicolon-separated URL list into ordered sources.
pub fn parse_sources(raw: &str) -> Vec<RosterSource> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RosterSource::from_url)
        .collect()
}

/// Read a seconds value, keeping `default` when the variable is unset.
fn secs_var(var: &'static str, default: u64) -> ConfigResult<Duration> {
    match env::var(var) {
        Ok(value) => {
            let secs = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var, value })?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.sources.is_empty());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.email_domain, "rit.edu");
    }

    #[test]
    fn test_parse_sources_ordered() {
        let sources = parse_sources(
            "https://docs.google.com/spreadsheets/d/abc/pub?output=csv; https://mirror.example.org/roster.csv",
        );
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "docs.google.com");
        assert_eq!(sources[1].name, "mirror.example.org");
    }

    #[test]
    fn test_parse_sources_skips_blank_entries() {
        let sources = parse_sources(";;https://example.org/a.csv;;");
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn test_parse_sources_empty_string() {
        assert!(parse_sources("").is_empty());
    }
}
