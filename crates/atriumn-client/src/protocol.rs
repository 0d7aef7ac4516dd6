//! Wire conventions for talking to an orchestration deployment.
//!
//! Two generations of the service are in use. They differ in the execute
//! path, in how the API key travels, and in whether the client insists on
//! credentials up front. [`Protocol`] bundles those three choices.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Header carrying the key under [`AuthScheme::ApiKeyHeader`].
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path the task is posted to, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /tasks/execute`
    TasksExecute,
    /// `POST /v1/prompt`
    Prompt,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TasksExecute => "/tasks/execute",
            Endpoint::Prompt => "/v1/prompt",
        }
    }
}

/// How the API key is attached to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// `x-api-key: <key>`
    ApiKeyHeader,
    /// `Authorization: Bearer <key>`
    Bearer,
}

/// When missing credentials are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialPolicy {
    /// Send without a key and let the server answer 401. A default base URL applies.
    Deferred,
    /// Base URL and API key must both resolve when the client is built.
    Required,
}

/// Endpoint, auth scheme and credential policy for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protocol {
    /// Path requests are posted to.
    pub endpoint: Endpoint,
    /// How the API key travels.
    pub auth: AuthScheme,
    /// When missing settings are an error.
    pub credentials: CredentialPolicy,
}

impl Protocol {
    /// `/tasks/execute` with `x-api-key`, credentials checked by the server.
    pub const TASKS: Protocol = Protocol {
        endpoint: Endpoint::TasksExecute,
        auth: AuthScheme::ApiKeyHeader,
        credentials: CredentialPolicy::Deferred,
    };

    /// `/v1/prompt` with a bearer token, credentials required at build time.
    pub const PROMPT: Protocol = Protocol {
        endpoint: Endpoint::Prompt,
        auth: AuthScheme::Bearer,
        credentials: CredentialPolicy::Required,
    };

    /// Request timeout used when the caller does not set one.
    pub fn default_timeout(&self) -> Duration {
        match self.endpoint {
            Endpoint::TasksExecute => Duration::from_secs(30),
            Endpoint::Prompt => Duration::from_secs(60),
        }
    }

    /// Full execute URL for a normalized base URL.
    pub fn execute_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.endpoint.path())
    }

    /// Default headers sent with every request.
    pub(crate) fn headers(&self, api_key: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let Some(key) = api_key else {
            return Ok(headers);
        };

        let (name, value) = match self.auth {
            AuthScheme::ApiKeyHeader => (HeaderName::from_static(API_KEY_HEADER), key.to_string()),
            AuthScheme::Bearer => (AUTHORIZATION, format!("Bearer {}", key)),
        };
        let mut value = HeaderValue::from_str(&value).map_err(|_| {
            Error::Authentication("api_key contains characters not allowed in a header".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(name, value);

        Ok(headers)
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Protocol::TASKS
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Protocol::TASKS => write!(f, "tasks"),
            Protocol::PROMPT => write!(f, "prompt"),
            other => write!(
                f,
                "custom({:?}, {:?}, {:?})",
                other.endpoint, other.auth, other.credentials
            ),
        }
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" | "tasks-execute" => Ok(Protocol::TASKS),
            "prompt" | "v1-prompt" => Ok(Protocol::PROMPT),
            other => Err(Error::Validation(format!(
                "unknown protocol '{}' (expected 'tasks' or 'prompt')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_url() {
        assert_eq!(
            Protocol::TASKS.execute_url("https://api.atriumn.ai"),
            "https://api.atriumn.ai/tasks/execute"
        );
        assert_eq!(
            Protocol::PROMPT.execute_url("http://localhost:9000/base"),
            "http://localhost:9000/base/v1/prompt"
        );
    }

    #[test]
    fn test_api_key_header() {
        let headers = Protocol::TASKS.headers(Some("secret")).unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "secret");
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_bearer_header() {
        let headers = Protocol::PROMPT.headers(Some("secret")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert!(headers.get(API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_no_key_sends_no_auth_header() {
        let headers = Protocol::TASKS.headers(None).unwrap();
        assert!(headers.get(API_KEY_HEADER).is_none());
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_invalid_key_is_auth_error() {
        let err = Protocol::TASKS.headers(Some("bad\nkey")).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_parse() {
        assert_eq!("tasks".parse::<Protocol>().unwrap(), Protocol::TASKS);
        assert_eq!("PROMPT".parse::<Protocol>().unwrap(), Protocol::PROMPT);
        assert!("grpc".parse::<Protocol>().unwrap_err().is_validation_error());
        assert_eq!(Protocol::PROMPT.to_string(), "prompt");
    }

    #[test]
    fn test_default_timeouts() {
        assert_eq!(Protocol::TASKS.default_timeout(), Duration::from_secs(30));
        assert_eq!(Protocol::PROMPT.default_timeout(), Duration::from_secs(60));
    }
}
