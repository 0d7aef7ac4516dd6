//! Client configuration and its resolution from arguments and environment.
//!
//! Resolution order for each setting:
//! 1. Explicit builder value (empty strings count as unset)
//! 2. The first non-empty environment variable from an ordered list
//! 3. A default, where one exists
//!
//! There is no default API key.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{CredentialPolicy, Protocol};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.atriumn.ai";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["ATRIUMN_API_KEY", "ATRIUMN_AI_API_KEY", "API_KEY"];

/// Environment variables consulted for the base URL, in order.
pub const BASE_URL_ENV_VARS: &[&str] = &["ATRIUMN_API_URL", "ATRIUMN_BASE_URL"];

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Passed to the builder.
    Explicit,
    /// Environment variable.
    EnvVar(String),
    /// Built-in default.
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Explicit => write!(f, "explicit argument"),
            Source::EnvVar(var) => write!(f, "env var {}", var),
            Source::Default => write!(f, "default"),
        }
    }
}

/// Values supplied directly by the caller, before resolution.
#[derive(Clone, Default)]
pub struct Overrides {
    /// API key; empty strings fall through to the environment.
    pub api_key: Option<String>,
    /// Service URL; empty strings fall through to the environment.
    pub base_url: Option<String>,
    /// Request timeout. Defaults to the protocol's timeout.
    pub timeout: Option<Duration>,
    /// User-Agent header. Defaults to `atriumn-client/<version>`.
    pub user_agent: Option<String>,
    /// Endpoint, auth scheme and credential policy.
    pub protocol: Protocol,
    /// Caller options kept on the config and never sent.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("protocol", &self.protocol)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Fully resolved client configuration. Immutable once built.
#[derive(Clone)]
pub struct Config {
    api_key: Option<String>,
    api_key_source: Option<Source>,
    base_url: String,
    base_url_source: Source,
    timeout: Duration,
    user_agent: String,
    protocol: Protocol,
    extra: BTreeMap<String, serde_json::Value>,
}

impl Config {
    /// Resolve against the process environment.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with<F>(overrides: Overrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Overrides {
            api_key,
            base_url,
            timeout,
            user_agent,
            protocol,
            extra,
        } = overrides;
        let strict = protocol.credentials == CredentialPolicy::Required;

        let (raw_url, base_url_source) = match first_set(base_url, BASE_URL_ENV_VARS, &lookup) {
            Some(found) => found,
            None if strict => {
                return Err(Error::Validation(format!(
                    "base_url is required. Set {} or pass base_url",
                    BASE_URL_ENV_VARS.join(" or ")
                )));
            }
            None => (DEFAULT_BASE_URL.to_string(), Source::Default),
        };
        let base_url = normalize_base_url(&raw_url)?;

        let api_key = first_set(api_key, API_KEY_ENV_VARS, &lookup);
        if strict && api_key.is_none() {
            return Err(Error::Authentication(format!(
                "api_key is required. Set {} or pass api_key",
                API_KEY_ENV_VARS[0]
            )));
        }
        let (api_key, api_key_source) = api_key.unzip();

        tracing::debug!(
            base_url = %base_url,
            base_url_source = %base_url_source,
            api_key_source = api_key_source.as_ref().map(|s| s.to_string()),
            protocol = %protocol,
            "resolved atriumn client configuration"
        );

        Ok(Self {
            api_key,
            api_key_source,
            base_url,
            base_url_source,
            timeout: timeout.unwrap_or_else(|| protocol.default_timeout()),
            user_agent: user_agent
                .unwrap_or_else(|| format!("atriumn-client/{}", env!("CARGO_PKG_VERSION"))),
            protocol,
            extra,
        })
    }

    /// The API key, if one resolved.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Where the API key came from.
    pub fn api_key_source(&self) -> Option<&Source> {
        self.api_key_source.as_ref()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where the base URL came from.
    pub fn base_url_source(&self) -> &Source {
        &self.base_url_source
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// URL each task is posted to.
    pub fn execute_url(&self) -> String {
        self.protocol.execute_url(&self.base_url)
    }

    /// Look up an additional named option.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// All additional named options.
    pub fn extras(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_source", &self.api_key_source)
            .field("base_url", &self.base_url)
            .field("base_url_source", &self.base_url_source)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("protocol", &self.protocol)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Explicit value if non-empty, else the first non-empty variable in `vars`.
fn first_set<F>(explicit: Option<String>, vars: &[&str], lookup: &F) -> Option<(String, Source)>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return Some((value, Source::Explicit));
    }
    vars.iter().find_map(|var| {
        lookup(var)
            .filter(|v| !v.is_empty())
            .map(|v| (v, Source::EnvVar((*var).to_string())))
    })
}

/// Strip trailing slashes and check the result is an absolute URL.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::Validation(format!("invalid base_url '{}': {}", raw, e)))?;
    if parsed.cannot_be_a_base() {
        return Err(Error::Validation(format!(
            "invalid base_url '{}': not a base URL",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn no_env() -> impl Fn(&str) -> Option<String> {
        |_: &str| None
    }

    #[test]
    fn test_explicit_beats_env() {
        let overrides = Overrides {
            api_key: Some("explicit-key".into()),
            base_url: Some("https://explicit.example.com".into()),
            ..Default::default()
        };
        let config = Config::resolve_with(
            overrides,
            env(&[
                ("ATRIUMN_API_KEY", "env-key"),
                ("ATRIUMN_API_URL", "https://env.example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key(), Some("explicit-key"));
        assert_eq!(config.api_key_source(), Some(&Source::Explicit));
        assert_eq!(config.base_url(), "https://explicit.example.com");
        assert_eq!(config.base_url_source(), &Source::Explicit);
    }

    #[test]
    fn test_env_precedence_order() {
        let config = Config::resolve_with(
            Overrides::default(),
            env(&[
                ("API_KEY", "generic"),
                ("ATRIUMN_AI_API_KEY", "namespaced"),
                ("ATRIUMN_BASE_URL", "https://alias.example.com"),
                ("ATRIUMN_API_URL", "https://primary.example.com"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key(), Some("namespaced"));
        assert_eq!(
            config.api_key_source(),
            Some(&Source::EnvVar("ATRIUMN_AI_API_KEY".into()))
        );
        assert_eq!(config.base_url(), "https://primary.example.com");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let overrides = Overrides {
            api_key: Some(String::new()),
            ..Default::default()
        };
        let config = Config::resolve_with(
            overrides,
            env(&[("ATRIUMN_API_KEY", ""), ("API_KEY", "fallback")]),
        )
        .unwrap();
        assert_eq!(config.api_key(), Some("fallback"));
    }

    #[test]
    fn test_defaults_under_deferred_policy() {
        let config = Config::resolve_with(Overrides::default(), no_env()).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.base_url_source(), &Source::Default);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent().starts_with("atriumn-client/"));
        assert_eq!(
            config.execute_url(),
            "https://api.atriumn.ai/tasks/execute"
        );
    }

    #[test]
    fn test_required_policy_needs_base_url() {
        let overrides = Overrides {
            api_key: Some("key".into()),
            protocol: Protocol::PROMPT,
            ..Default::default()
        };
        let err = Config::resolve_with(overrides, no_env()).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("base_url is required"));
    }

    #[test]
    fn test_required_policy_needs_api_key() {
        let overrides = Overrides {
            base_url: Some("https://test.example.com".into()),
            protocol: Protocol::PROMPT,
            ..Default::default()
        };
        let err = Config::resolve_with(overrides, no_env()).unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("api_key is required"));
    }

    #[test]
    fn test_required_policy_reports_base_url_first() {
        let overrides = Overrides {
            protocol: Protocol::PROMPT,
            ..Default::default()
        };
        let err = Config::resolve_with(overrides, no_env()).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_required_policy_from_env() {
        let overrides = Overrides {
            protocol: Protocol::PROMPT,
            ..Default::default()
        };
        let config = Config::resolve_with(
            overrides,
            env(&[
                ("ATRIUMN_BASE_URL", "https://env.test.com"),
                ("ATRIUMN_API_KEY", "env-key"),
            ]),
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://env.test.com");
        assert_eq!(config.api_key(), Some("env-key"));
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let overrides = Overrides {
            base_url: Some("https://api.test.atriumn.com/gateway//".into()),
            ..Default::default()
        };
        let config = Config::resolve_with(overrides, no_env()).unwrap();
        assert_eq!(config.base_url(), "https://api.test.atriumn.com/gateway");
        assert_eq!(
            config.execute_url(),
            "https://api.test.atriumn.com/gateway/tasks/execute"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let overrides = Overrides {
            base_url: Some("not a url".into()),
            ..Default::default()
        };
        let err = Config::resolve_with(overrides, no_env()).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_extra_options_and_redaction() {
        let mut extra = BTreeMap::new();
        extra.insert("region".to_string(), serde_json::json!("eu-west-1"));
        let overrides = Overrides {
            api_key: Some("super-secret".into()),
            extra,
            ..Default::default()
        };
        let config = Config::resolve_with(overrides, no_env()).unwrap();

        assert_eq!(config.extra("region"), Some(&serde_json::json!("eu-west-1")));
        assert_eq!(config.extra("missing"), None);

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
