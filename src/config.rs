use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::constants::DEFAULT_API_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Scraper configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    // Discord API
    pub api_base_url: String,
    pub token: String,
    pub channel_id: String,
    pub http_timeout: Duration,

    // Pagination
    pub fetch_base_delay: Duration,

    // Output
    pub json_output_path: PathBuf,
    pub csv_output_path: PathBuf,
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("http_timeout", &self.http_timeout)
            .field("fetch_base_delay", &self.fetch_base_delay)
            .field("json_output_path", &self.json_output_path)
            .field("csv_output_path", &self.csv_output_path)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Discord API
            api_base_url: env_or_default("DISCORD_API_BASE_URL", DEFAULT_API_BASE_URL),
            token: required_env("DISCORD_TOKEN")?,
            channel_id: required_env("CHANNEL_ID")?,
            http_timeout: Duration::from_secs(parse_env_u64("HTTP_TIMEOUT_SECS", 30)?),

            // Pagination
            fetch_base_delay: Duration::from_millis(parse_env_u64("FETCH_BASE_DELAY_MS", 100)?),

            // Output
            json_output_path: PathBuf::from(env_or_default("JSON_OUTPUT_PATH", "threads.json")),
            csv_output_path: PathBuf::from(env_or_default("CSV_OUTPUT_PATH", "threads.csv")),
        })
    }

    /// Configuration pointing at `api_base_url` with test-friendly defaults.
    #[must_use]
    pub fn for_testing(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            token: "test-token".to_string(),
            channel_id: "1263394639524921414".to_string(),
            http_timeout: Duration::from_secs(10),
            fetch_base_delay: Duration::from_millis(100),
            json_output_path: PathBuf::from("threads.json"),
            csv_output_path: PathBuf::from("threads.csv"),
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "DISCORD_TOKEN".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.channel_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "CHANNEL_ID".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.http_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "HTTP_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        match url::Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    name: "DISCORD_API_BASE_URL".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    name: "DISCORD_API_BASE_URL".to_string(),
                    message: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64_default() {
        assert_eq!(parse_env_u64("NONEXISTENT_SCRAPER_VAR", 100).unwrap(), 100);
    }

    #[test]
    fn test_validate_accepts_testing_config() {
        assert!(Config::for_testing("http://127.0.0.1:8080").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let config = Config {
            token: "  ".to_string(),
            ..Config::for_testing("https://discord.com/api/v9")
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name, .. }) if name == "DISCORD_TOKEN"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = Config::for_testing("not a url");
        assert!(config.validate().is_err());

        let config = Config::for_testing("ftp://discord.com/api");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            token: "super-secret".to_string(),
            ..Config::for_testing("https://discord.com/api/v9")
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
