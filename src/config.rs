use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::AppError;
use crate::riot::catalog::is_valid_locale;

pub const API_KEY_VAR: &str = "RIOT_API_KEY";
pub const DEBUG_VAR: &str = "RIOT_DEBUG";

const DEFAULT_LANGUAGE: &str = "en_US";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRY_COUNT: u32 = 3;
const DEFAULT_RATE_LIMIT_RETRIES: u32 = 5;
const DEFAULT_MAX_WORKERS: usize = 4;
const DEFAULT_APP_REQUESTS_PER_MINUTE: u32 = 100;
const DEFAULT_APP_BURST: u32 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    /// Sent as `Accept-Language` on every request.
    pub language: String,
    pub request_timeout: Duration,
    /// Retries after the first attempt for network and server failures.
    pub retry_count: u32,
    /// Retries granted to 429 responses, on top of `retry_count`.
    pub rate_limit_retries: u32,
    /// Backoff before retry `n` is `2^n` times this unit.
    pub backoff_unit: Duration,
    /// Concurrent match detail fetches in a batch.
    pub max_workers: usize,
    pub app_requests_per_minute: NonZeroU32,
    pub app_burst: NonZeroU32,
    pub debug: bool,
    /// Send every request to this host instead of the Riot clusters.
    pub base_url: Option<String>,
}

impl Config {
    /// Configuration with default settings for the given API key.
    pub fn new(riot_api_key: impl Into<String>) -> Self {
        Self {
            riot_api_key: riot_api_key.into(),
            language: DEFAULT_LANGUAGE.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry_count: DEFAULT_RETRY_COUNT,
            rate_limit_retries: DEFAULT_RATE_LIMIT_RETRIES,
            backoff_unit: Duration::from_secs(1),
            max_workers: DEFAULT_MAX_WORKERS,
            app_requests_per_minute: NonZeroU32::new(DEFAULT_APP_REQUESTS_PER_MINUTE)
                .unwrap_or(NonZeroU32::MIN),
            app_burst: NonZeroU32::new(DEFAULT_APP_BURST).unwrap_or(NonZeroU32::MIN),
            debug: false,
            base_url: None,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let key = resolve_credential(&default_credential_sources(None))?;
        Self::from_lookup(key, |name| env::var(name).ok())
    }

    /// Build a configuration from `key` and the optional settings returned by `lookup`.
    pub fn from_lookup(
        riot_api_key: String,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let defaults = Self::new(riot_api_key);

        let language = lookup("RIOT_LANGUAGE").unwrap_or(defaults.language);
        if !is_valid_locale(&language) {
            return Err(AppError::Config(format!(
                "RIOT_LANGUAGE `{language}` is not a supported locale (e.g. en_US, ko_KR)"
            )));
        }

        let request_timeout = lookup("RIOT_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let retry_count = lookup("RIOT_RETRY_COUNT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.retry_count);

        let rate_limit_retries = lookup("RIOT_RATE_LIMIT_RETRIES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_retries);

        let max_workers = lookup("RIOT_MAX_WORKERS")
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_workers);

        let app_requests_per_minute = lookup("RIOT_APP_REQUESTS_PER_MINUTE")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(defaults.app_requests_per_minute);

        let app_burst = lookup("RIOT_APP_BURST")
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(defaults.app_burst);

        let debug = lookup(DEBUG_VAR)
            .map(|v| is_enabled(&v))
            .unwrap_or(defaults.debug);

        let base_url = lookup("RIOT_BASE_URL").filter(|v| !v.is_empty());

        Ok(Self {
            language,
            request_timeout,
            retry_count,
            rate_limit_retries,
            max_workers,
            app_requests_per_minute,
            app_burst,
            debug,
            base_url,
            ..defaults
        })
    }
}

/// Truthy values of a boolean setting: `1`, `true`, `yes`, `on`.
pub fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// A place the API key may come from, tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit(String),
    Env(&'static str),
    DotEnvFile(PathBuf),
}

impl CredentialSource {
    fn describe(&self) -> String {
        match self {
            Self::Explicit(_) => "command line".to_string(),
            Self::Env(var) => format!("${var}"),
            Self::DotEnvFile(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Option<String> {
        let value = match self {
            Self::Explicit(key) => Some(key.clone()),
            Self::Env(var) => env::var(var).ok(),
            Self::DotEnvFile(path) => dotenvy::from_path_iter(path)
                .ok()?
                .filter_map(Result::ok)
                .find(|(name, _)| name == API_KEY_VAR)
                .map(|(_, value)| value),
        };

        value.filter(|key| !key.trim().is_empty())
    }
}

/// Explicit key, then `RIOT_API_KEY`, then `.env` files near the working directory
/// and in the user configuration directory.
pub fn default_credential_sources(explicit: Option<String>) -> Vec<CredentialSource> {
    let mut sources = Vec::new();

    if let Some(key) = explicit {
        sources.push(CredentialSource::Explicit(key));
    }
    sources.push(CredentialSource::Env(API_KEY_VAR));

    for candidate in [".env", "../.env", "../../.env"] {
        sources.push(CredentialSource::DotEnvFile(PathBuf::from(candidate)));
    }
    if let Some(dir) = dirs::config_dir() {
        sources.push(CredentialSource::DotEnvFile(dir.join("riftscout").join(".env")));
    }

    sources
}

pub fn resolve_credential(sources: &[CredentialSource]) -> Result<String, AppError> {
    for source in sources {
        if let Some(key) = source.read() {
            debug!(source = %source.describe(), "🔑 using Riot API key");
            return Ok(key);
        }
    }

    Err(AppError::MissingCredential {
        var: API_KEY_VAR,
        searched: sources
            .iter()
            .map(CredentialSource::describe)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup("KEY".into(), lookup_from(&[])).unwrap();

        assert_eq!(config.riot_api_key, "KEY");
        assert_eq!(config.language, "en_US");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry_count, 3);
        assert_eq!(config.max_workers, 4);
        assert!(!config.debug);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(
            "KEY".into(),
            lookup_from(&[
                ("RIOT_LANGUAGE", "ko_KR"),
                ("RIOT_REQUEST_TIMEOUT_SECS", "5"),
                ("RIOT_RETRY_COUNT", "1"),
                ("RIOT_MAX_WORKERS", "8"),
                ("RIOT_DEBUG", "true"),
                ("RIOT_BASE_URL", "http://localhost:8080"),
            ]),
        )
        .unwrap();

        assert_eq!(config.language, "ko_KR");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.retry_count, 1);
        assert_eq!(config.max_workers, 8);
        assert!(config.debug);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let config = Config::from_lookup(
            "KEY".into(),
            lookup_from(&[("RIOT_RETRY_COUNT", "many"), ("RIOT_MAX_WORKERS", "0")]),
        )
        .unwrap();

        assert_eq!(config.retry_count, 3);
        assert_eq!(config.max_workers, 4);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = Config::from_lookup("KEY".into(), lookup_from(&[("RIOT_LANGUAGE", "xx_XX")]))
            .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn boolean_settings() {
        assert!(is_enabled("1"));
        assert!(is_enabled(" TRUE "));
        assert!(is_enabled("on"));
        assert!(!is_enabled("0"));
        assert!(!is_enabled(""));
    }

    #[test]
    fn explicit_key_wins() {
        let sources = vec![
            CredentialSource::Explicit("FROM_CLI".into()),
            CredentialSource::DotEnvFile(PathBuf::from("/nonexistent/.env")),
        ];

        assert_eq!(resolve_credential(&sources).unwrap(), "FROM_CLI");
    }

    #[test]
    fn key_is_read_from_dotenv_file() {
        let dir = env::temp_dir().join(format!("riftscout-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        fs::write(&path, "OTHER=1\nRIOT_API_KEY=RGAPI-from-file\n").unwrap();

        let sources = vec![
            CredentialSource::DotEnvFile(PathBuf::from("/nonexistent/.env")),
            CredentialSource::DotEnvFile(path),
        ];
        let key = resolve_credential(&sources);
        fs::remove_dir_all(&dir).ok();

        assert_eq!(key.unwrap(), "RGAPI-from-file");
    }

    #[test]
    fn missing_key_lists_every_location() {
        let sources = vec![
            CredentialSource::Explicit("   ".into()),
            CredentialSource::DotEnvFile(PathBuf::from("/nonexistent/.env")),
        ];

        let err = resolve_credential(&sources).unwrap_err();
        let message = err.to_string();

        assert!(matches!(err, AppError::MissingCredential { .. }));
        assert!(message.contains("RIOT_API_KEY"));
        assert!(message.contains("/nonexistent/.env"));
        assert!(message.contains("developer.riotgames.com"));
    }
}
