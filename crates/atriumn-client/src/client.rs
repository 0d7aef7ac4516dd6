//! Async client implementation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde_json::Value;

use crate::config::{Config, Overrides};
use crate::error::{Error, Result};
use crate::protocol::Protocol;
use crate::request::{Input, TaskRequest};
use crate::tasks::{
    ExtractTraitsDocument, ExtractTraitsStory, RecommendModel, SummarizeFit, SynthesizeIdentity,
    TailorResume, Task,
};
use crate::translate::{TaskResult, translate};

/// Async client for the Atriumn orchestration service.
///
/// Cheap to clone; clones share one connection pool and one configuration,
/// so tasks can be issued concurrently from independent futures.
///
/// # Example
///
/// ```no_run
/// use atriumn_client::AtriumnClient;
/// use serde_json::json;
///
/// # async fn example() -> atriumn_client::Result<()> {
/// let client = AtriumnClient::builder()
///     .base_url("https://api.atriumn.ai")
///     .api_key("secret")
///     .build()?;
///
/// let result = client
///     .run_task("recommend_model", "axiomiq", json!({"priority": "lowest_cost"}))
///     .await?;
/// println!("{:?}", result.get("model"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AtriumnClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// `None` once closed.
    http: RwLock<Option<reqwest::Client>>,
    config: Config,
}

impl AtriumnClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client from an already resolved configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let headers = config.protocol().headers(config.api_key())?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: RwLock::new(Some(http)),
                config,
            }),
        })
    }

    /// The resolved configuration. Readable after close.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Release the connection pool. Idempotent; later calls fail with [`Error::Closed`].
    pub fn close(&self) {
        if self.inner.http.write().take().is_some() {
            tracing::debug!(base_url = %self.inner.config.base_url(), "atriumn client closed");
        }
    }

    /// Whether [`close`](Self::close) has run on this client or any clone of it.
    pub fn is_closed(&self) -> bool {
        self.inner.http.read().is_none()
    }

    fn http(&self) -> Result<reqwest::Client> {
        self.inner.http.read().clone().ok_or(Error::Closed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Core invocation
    // ─────────────────────────────────────────────────────────────────────────

    /// Run `task` for `app`. `input` must be a JSON object.
    pub async fn run_task(
        &self,
        task: impl Into<String>,
        app: impl Into<String>,
        input: Value,
    ) -> Result<TaskResult> {
        self.execute(TaskRequest::from_value(task, app, input)?).await
    }

    /// Run `task` with per-call options; `None` or `null` sends no `options` key.
    pub async fn run_task_with_options(
        &self,
        task: impl Into<String>,
        app: impl Into<String>,
        input: Value,
        options: Option<Value>,
    ) -> Result<TaskResult> {
        let request = TaskRequest::from_value(task, app, input)?
            .with_options_value(options.unwrap_or(Value::Null))?;
        self.execute(request).await
    }

    /// Send a request and translate the response.
    pub async fn execute(&self, request: TaskRequest) -> Result<TaskResult> {
        let response = self.execute_raw(&request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(task = %request.task, app = %request.app, status, "task response received");
        translate(status, &body)
    }

    /// Send a request and return the untranslated response.
    ///
    /// Only transport failures are reported as errors; every status code,
    /// including 4xx and 5xx, is handed back as-is.
    pub async fn execute_raw(&self, request: &TaskRequest) -> Result<reqwest::Response> {
        let http = self.http()?;
        let url = self.inner.config.execute_url();

        tracing::debug!(task = %request.task, app = %request.app, url = %url, "sending task");
        let response = http.post(url).json(request).send().await?;
        Ok(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Named tasks
    // ─────────────────────────────────────────────────────────────────────────

    /// Run any named task.
    pub async fn run<T: Task>(&self, app: impl Into<String>, task: T) -> Result<TaskResult> {
        self.execute(task.into_request(app)).await
    }

    /// Get a model recommendation.
    pub async fn recommend_model(
        &self,
        app: impl Into<String>,
        params: RecommendModel,
    ) -> Result<TaskResult> {
        self.run(app, params).await
    }

    /// Extract traits from story text.
    pub async fn extract_traits_story(
        &self,
        app: impl Into<String>,
        params: ExtractTraitsStory,
    ) -> Result<TaskResult> {
        self.run(app, params).await
    }

    /// Extract traits from a document.
    pub async fn extract_traits_document(
        &self,
        app: impl Into<String>,
        input: Input,
    ) -> Result<TaskResult> {
        self.run(app, ExtractTraitsDocument::new(input)).await
    }

    /// Run `tailor_resume`; `input` is forwarded as given.
    pub async fn tailor_resume(&self, app: impl Into<String>, input: Input) -> Result<TaskResult> {
        self.run(app, TailorResume::new(input)).await
    }

    /// Run `synthesize_identity`; `input` is forwarded as given.
    pub async fn synthesize_identity(
        &self,
        app: impl Into<String>,
        input: Input,
    ) -> Result<TaskResult> {
        self.run(app, SynthesizeIdentity::new(input)).await
    }

    /// Run `summarize_fit`; `input` is forwarded as given.
    pub async fn summarize_fit(&self, app: impl Into<String>, input: Input) -> Result<TaskResult> {
        self.run(app, SummarizeFit::new(input)).await
    }
}

impl std::fmt::Debug for AtriumnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtriumnClient")
            .field("config", &self.inner.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Builder for [`AtriumnClient`] (and the blocking client, with the `blocking` feature).
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    overrides: Overrides,
    use_env: bool,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            overrides: Overrides::default(),
            use_env: true,
        }
    }

    /// Set the base URL. Takes precedence over the environment.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.base_url = Some(url.into());
        self
    }

    /// Set the API key. Takes precedence over the environment.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.overrides.api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.overrides.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.overrides.user_agent = Some(agent.into());
        self
    }

    /// Select the wire protocol. Defaults to [`Protocol::TASKS`].
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.overrides.protocol = protocol;
        self
    }

    /// Store an additional named option on the configuration.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.extra.insert(key.into(), value.into());
        self
    }

    /// Whether to consult environment variables. On by default.
    pub fn use_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Resolve the configuration without creating a client.
    pub fn resolve(self) -> Result<Config> {
        if self.use_env {
            Config::resolve(self.overrides)
        } else {
            Config::resolve_with(self.overrides, |_| None)
        }
    }

    /// Build the async client.
    pub fn build(self) -> Result<AtriumnClient> {
        AtriumnClient::from_config(self.resolve()?)
    }

    /// Build the blocking client.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<crate::blocking::AtriumnClient> {
        crate::blocking::AtriumnClient::from_config(self.resolve()?)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
