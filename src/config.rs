//! Runtime configuration
//!
//! Settings are resolved once at start-up and passed by reference into every
//! operation. Sources, highest precedence first:
//!
//! 1. CLI flags (applied by the runner on top of the resolved config)
//! 2. Environment variables prefixed with `TICKETWALK_`
//! 3. A `.env` file in the working directory (via dotenvy)
//! 4. An optional YAML config file
//!
//! Example config file:
//! ```yaml
//! base_url: https://example.atlassian.net
//! user: ops@example.com
//! token: ATATT3x...        # or TICKETWALK_TOKEN
//! max_roundtrips: 500
//! advance: page_capacity   # or received_count
//! timeout_secs: 30         # no timeout unless set
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{OffsetAdvance, WalkOptions};
use crate::types::OptionStringExt;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Prefix shared by every environment variable
pub const ENV_PREFIX: &str = "TICKETWALK";

/// Default upper bound on page fetches per walk
pub const DEFAULT_MAX_ROUNDTRIPS: u32 = 10_000;

/// Build the environment variable name for a setting
pub fn env_key(name: &str) -> String {
    format!("{ENV_PREFIX}_{}", name.to_uppercase())
}

// ============================================================================
// Config File
// ============================================================================

/// Settings as read from a YAML config file (all optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub user: Option<String>,
    pub token: Option<String>,
    pub max_roundtrips: Option<u32>,
    pub advance: Option<OffsetAdvance>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse config file content
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

// ============================================================================
// Resolved Config
// ============================================================================

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL without trailing slash (e.g. `https://example.atlassian.net`)
    pub base_url: String,
    /// Basic-auth credentials
    pub credentials: Credentials,
    /// Upper bound on page fetches per walk
    pub max_roundtrips: u32,
    /// How the walker advances `startAt` between pages
    pub offset_advance: OffsetAdvance,
    /// Request timeout; transport default when unset
    pub timeout: Option<Duration>,
}

impl Config {
    /// Resolve from `.env`, the optional config file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();
        let file = match path {
            Some(path) => ConfigFile::from_path(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(&file, |key| std::env::var(key).ok())
    }

    /// Resolve from the process environment only
    pub fn from_env() -> Result<Self> {
        Self::resolve(&ConfigFile::default(), |key| std::env::var(key).ok())
    }

    /// Resolve settings from a config file and an environment lookup.
    ///
    /// Environment values win over file values. Empty values count as
    /// missing; every missing required setting is named in the error.
    pub fn resolve<F>(file: &ConfigFile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &str, fallback: &Option<String>| {
            lookup(&env_key(name))
                .none_if_empty()
                .or_else(|| fallback.clone().none_if_empty())
        };

        let (base_url, user, token) = match (
            pick("base_url", &file.base_url),
            pick("user", &file.user),
            pick("token", &file.token),
        ) {
            (Some(base_url), Some(user), Some(token)) => (base_url, user, token),
            (base_url, user, token) => {
                let missing: Vec<String> = [
                    ("base_url", base_url.is_none()),
                    ("user", user.is_none()),
                    ("token", token.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| env_key(name))
                .collect();
                return Err(Error::missing_field(missing.join(", ")));
            }
        };

        let base_url = validate_base_url(&base_url)?;

        let max_roundtrips = match lookup(&env_key("max_roundtrips")).none_if_empty() {
            Some(raw) => parse_number::<u32>("max_roundtrips", &raw)?,
            None => file.max_roundtrips.unwrap_or(DEFAULT_MAX_ROUNDTRIPS),
        };
        if max_roundtrips == 0 {
            return Err(Error::invalid_config(
                env_key("max_roundtrips"),
                "must be at least 1",
            ));
        }

        let timeout_secs = match lookup(&env_key("timeout_secs")).none_if_empty() {
            Some(raw) => Some(parse_number::<u64>("timeout_secs", &raw)?),
            None => file.timeout_secs,
        };

        Ok(Self {
            base_url,
            credentials: Credentials::new(user, token),
            max_roundtrips,
            offset_advance: file.advance.unwrap_or_default(),
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    /// Pagination options derived from this config
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_roundtrips: self.max_roundtrips,
            advance: self.offset_advance,
            ..WalkOptions::default()
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::invalid_config(env_key(name), format!("expected a number, got '{raw}'")))
}

fn validate_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| Error::invalid_config(env_key("base_url"), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_config(
            env_key("base_url"),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("TICKETWALK_BASE_URL", "https://example.atlassian.net/"),
            ("TICKETWALK_USER", "ops@example.com"),
            ("TICKETWALK_TOKEN", "secret-token-value"),
        ]
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("base_url"), "TICKETWALK_BASE_URL");
    }

    #[test]
    fn test_resolve_from_env() {
        let config = Config::resolve(&ConfigFile::default(), env(&full_env())).unwrap();
        assert_eq!(config.base_url, "https://example.atlassian.net");
        assert_eq!(config.credentials.user, "ops@example.com");
        assert_eq!(config.credentials.token.expose(), "secret-token-value");
        assert_eq!(config.max_roundtrips, DEFAULT_MAX_ROUNDTRIPS);
        assert_eq!(config.offset_advance, OffsetAdvance::PageCapacity);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let err = Config::resolve(
            &ConfigFile::default(),
            env(&[("TICKETWALK_USER", "ops@example.com")]),
        )
        .unwrap_err();

        match err {
            Error::MissingConfigField { field } => {
                assert_eq!(field, "TICKETWALK_BASE_URL, TICKETWALK_TOKEN");
            }
            other => panic!("Expected MissingConfigField, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut pairs = full_env();
        pairs[2] = ("TICKETWALK_TOKEN", "");
        let err = Config::resolve(&ConfigFile::default(), env(&pairs)).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "TICKETWALK_TOKEN"));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut pairs = full_env();
        pairs[0] = ("TICKETWALK_BASE_URL", "ftp://example.com");
        let err = Config::resolve(&ConfigFile::default(), env(&pairs)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));

        pairs[0] = ("TICKETWALK_BASE_URL", "not a url");
        let err = Config::resolve(&ConfigFile::default(), env(&pairs)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_max_roundtrips_from_env() {
        let mut pairs = full_env();
        pairs.push(("TICKETWALK_MAX_ROUNDTRIPS", "25"));
        let config = Config::resolve(&ConfigFile::default(), env(&pairs)).unwrap();
        assert_eq!(config.max_roundtrips, 25);
        assert_eq!(config.walk_options().max_roundtrips, 25);
    }

    #[test]
    fn test_max_roundtrips_rejects_zero_and_garbage() {
        let mut pairs = full_env();
        pairs.push(("TICKETWALK_MAX_ROUNDTRIPS", "0"));
        assert!(Config::resolve(&ConfigFile::default(), env(&pairs)).is_err());

        let mut pairs = full_env();
        pairs.push(("TICKETWALK_MAX_ROUNDTRIPS", "lots"));
        let err = Config::resolve(&ConfigFile::default(), env(&pairs)).unwrap_err();
        assert!(err.to_string().contains("TICKETWALK_MAX_ROUNDTRIPS"));
    }

    #[test]
    fn test_file_values_used_when_env_absent() {
        let file = ConfigFile::from_yaml(
            r"
base_url: https://tickets.internal
user: bot
token: file-token
max_roundtrips: 7
advance: received_count
timeout_secs: 30
",
        )
        .unwrap();

        let config = Config::resolve(&file, env(&[])).unwrap();
        assert_eq!(config.base_url, "https://tickets.internal");
        assert_eq!(config.credentials.user, "bot");
        assert_eq!(config.max_roundtrips, 7);
        assert_eq!(config.offset_advance, OffsetAdvance::ReceivedCount);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            base_url: Some("https://tickets.internal".to_string()),
            user: Some("bot".to_string()),
            token: Some("file-token".to_string()),
            ..ConfigFile::default()
        };

        let config = Config::resolve(&file, env(&[("TICKETWALK_USER", "human")])).unwrap();
        assert_eq!(config.credentials.user, "human");
        assert_eq!(config.credentials.token.expose(), "file-token");
    }

    #[test]
    fn test_config_file_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user: from-disk").unwrap();

        let parsed = ConfigFile::from_path(file.path()).unwrap();
        assert_eq!(parsed.user.as_deref(), Some("from-disk"));
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        assert!(ConfigFile::from_yaml("password: nope").is_err());
    }

    #[test]
    fn test_config_file_missing_path() {
        let err = ConfigFile::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
