//! Blocking client.
//!
//! Same contract as [`crate::AtriumnClient`], but every call blocks the
//! calling thread for the full round trip. Must not be used from inside an
//! async runtime.

use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::{Input, TaskRequest};
use crate::tasks::{
    ExtractTraitsDocument, ExtractTraitsStory, RecommendModel, SummarizeFit, SynthesizeIdentity,
    TailorResume, Task,
};
use crate::translate::{TaskResult, translate};

/// Synchronous client for the Atriumn orchestration service.
///
/// # Example
///
/// ```no_run
/// use atriumn_client::{ClientBuilder, RecommendModel};
///
/// # fn example() -> atriumn_client::Result<()> {
/// let mut client = ClientBuilder::new().api_key("secret").build_blocking()?;
/// let result = client.recommend_model("axiomiq", RecommendModel::new().priority("fastest"))?;
/// println!("{:?}", result);
/// client.close();
/// # Ok(())
/// # }
/// ```
pub struct AtriumnClient {
    /// `None` once closed.
    http: Option<reqwest::blocking::Client>,
    config: Config,
}

impl AtriumnClient {
    /// Create a client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        crate::ClientBuilder::new().build_blocking()
    }

    /// Create a client from an already resolved configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let headers = config.protocol().headers(config.api_key())?;
        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http: Some(http),
            config,
        })
    }

    /// The resolved configuration. Readable after close.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the connection pool. Idempotent; later calls fail with [`Error::Closed`].
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!(base_url = %self.config.base_url(), "atriumn blocking client closed");
        }
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Run `task` for `app`. `input` must be a JSON object.
    pub fn run_task(
        &self,
        task: impl Into<String>,
        app: impl Into<String>,
        input: Value,
    ) -> Result<TaskResult> {
        self.execute(TaskRequest::from_value(task, app, input)?)
    }

    /// Run `task` with per-call options; `None` or `null` sends no `options` key.
    pub fn run_task_with_options(
        &self,
        task: impl Into<String>,
        app: impl Into<String>,
        input: Value,
        options: Option<Value>,
    ) -> Result<TaskResult> {
        let request = TaskRequest::from_value(task, app, input)?
            .with_options_value(options.unwrap_or(Value::Null))?;
        self.execute(request)
    }

    /// Send a request and translate the response.
    pub fn execute(&self, request: TaskRequest) -> Result<TaskResult> {
        let response = self.execute_raw(&request)?;
        let status = response.status().as_u16();
        let body = response.text()?;

        tracing::debug!(task = %request.task, app = %request.app, status, "task response received");
        translate(status, &body)
    }

    /// Send a request and return the untranslated response.
    pub fn execute_raw(&self, request: &TaskRequest) -> Result<reqwest::blocking::Response> {
        let http = self.http.as_ref().ok_or(Error::Closed)?;
        let url = self.config.execute_url();

        tracing::debug!(task = %request.task, app = %request.app, url = %url, "sending task");
        Ok(http.post(url).json(request).send()?)
    }

    /// Run any named task.
    pub fn run<T: Task>(&self, app: impl Into<String>, task: T) -> Result<TaskResult> {
        self.execute(task.into_request(app))
    }

    /// Run `recommend_model`.
    pub fn recommend_model(
        &self,
        app: impl Into<String>,
        params: RecommendModel,
    ) -> Result<TaskResult> {
        self.run(app, params)
    }

    /// Run `extract_traits_story` over a narrative.
    pub fn extract_traits_story(
        &self,
        app: impl Into<String>,
        params: ExtractTraitsStory,
    ) -> Result<TaskResult> {
        self.run(app, params)
    }

    /// Run `extract_traits_document`; `input` is forwarded as given.
    pub fn extract_traits_document(
        &self,
        app: impl Into<String>,
        input: Input,
    ) -> Result<TaskResult> {
        self.run(app, ExtractTraitsDocument::new(input))
    }

    /// Run `tailor_resume`; `input` is forwarded as given.
    pub fn tailor_resume(&self, app: impl Into<String>, input: Input) -> Result<TaskResult> {
        self.run(app, TailorResume::new(input))
    }

    /// Run `synthesize_identity`; `input` is forwarded as given.
    pub fn synthesize_identity(&self, app: impl Into<String>, input: Input) -> Result<TaskResult> {
        self.run(app, SynthesizeIdentity::new(input))
    }

    /// Run `summarize_fit`; `input` is forwarded as given.
    pub fn summarize_fit(&self, app: impl Into<String>, input: Input) -> Result<TaskResult> {
        self.run(app, SummarizeFit::new(input))
    }
}

impl std::fmt::Debug for AtriumnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::AtriumnClient")
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish()
    }
}
