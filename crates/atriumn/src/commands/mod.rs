//! CLI command handlers.

pub mod config;
pub mod recommend;
pub mod run;
pub mod traits;

use std::time::Duration;

use anyhow::{Context as _, Result};
use atriumn_client::{AtriumnClient, ClientBuilder, Protocol, TaskResult};
use clap::ValueEnum;
use serde_json::Value;

/// Wire protocol selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    /// POST /tasks/execute with an x-api-key header
    Tasks,
    /// POST /v1/prompt with a Bearer token; URL and key are required
    Prompt,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Tasks => Protocol::TASKS,
            ProtocolArg::Prompt => Protocol::PROMPT,
        }
    }
}

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API key from the command line, if any.
    pub api_key: Option<String>,
    /// Service URL from the command line, if any.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
    /// Wire protocol.
    pub protocol: ProtocolArg,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Builder seeded from the global flags; the environment fills the gaps.
    pub fn builder(&self) -> Result<ClientBuilder> {
        let mut builder = ClientBuilder::new().protocol(self.protocol.into());
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key);
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(secs) = self.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    pub fn client(&self) -> Result<AtriumnClient> {
        let client = self.builder()?.build()?;
        tracing::debug!(url = %client.config().execute_url(), "client ready");
        Ok(client)
    }

    /// Print a task result, pretty unless `--json`.
    pub fn print_result(&self, result: TaskResult) -> Result<()> {
        self.print_value(&Value::Object(result))
    }

    pub fn print_value(&self, value: &Value) -> Result<()> {
        let rendered = if self.json_output {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{}", rendered);
        Ok(())
    }
}

/// Parse a JSON command-line argument.
pub fn parse_json(flag: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--{} is not valid JSON", flag))
}

/// Parse `key=value` pairs; values are JSON when they parse as JSON, strings otherwise.
pub fn parse_fields(pairs: &[String]) -> Result<atriumn_client::Input> {
    let mut fields = atriumn_client::Input::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("expected key=value, got '{}'", pair))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}
