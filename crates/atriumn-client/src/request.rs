//! Outbound task payload.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Task-specific key/value payload.
pub type Input = serde_json::Map<String, Value>;

/// One task invocation as sent to the orchestration service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRequest {
    /// Operation to run (e.g. `recommend_model`).
    pub task: String,
    /// Calling application / tenant (e.g. `axiomiq`).
    pub app: String,
    /// Task-specific input.
    pub input: Input,
    /// Per-call configuration overrides. Omitted from the payload when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Input>,
}

impl TaskRequest {
    pub fn new(task: impl Into<String>, app: impl Into<String>, input: Input) -> Self {
        Self {
            task: task.into(),
            app: app.into(),
            input,
            options: None,
        }
    }

    /// Build from loosely-typed JSON. `input` must be an object; `null` means empty.
    pub fn from_value(task: impl Into<String>, app: impl Into<String>, input: Value) -> Result<Self> {
        Ok(Self::new(task, app, object("input", input)?.unwrap_or_default()))
    }

    /// Attach options. `None` leaves the payload without an `options` key.
    pub fn with_options(mut self, options: impl Into<Option<Input>>) -> Self {
        self.options = options.into();
        self
    }

    /// Attach options from loosely-typed JSON; `null` counts as absent.
    pub fn with_options_value(self, options: Value) -> Result<Self> {
        let options = object("options", options)?;
        Ok(self.with_options(options))
    }

    /// Add one field to `input`, replacing any previous value for `key`.
    pub fn with_input_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// The JSON body that goes on the wire.
    pub fn to_payload(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::Validation(format!("failed to serialize request: {}", e)))
    }
}

/// Unwrap a JSON object, treating `null` as absent.
fn object(field: &str, value: Value) -> Result<Option<Input>> {
    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(Error::Validation(format!(
            "{} must be a JSON object, got {}",
            field,
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
