//! Named tasks.
//!
//! Each type fixes a task name and shapes `input`. Fields in `extra` are
//! forwarded verbatim and win over typed fields on key collision.

use serde_json::Value;

use crate::request::{Input, TaskRequest};

/// A task with a fixed name and a way to build its input.
pub trait Task {
    /// Task name sent in the payload.
    const NAME: &'static str;

    /// Consume the parameters into the `input` mapping.
    fn into_input(self) -> Input;

    /// Build the full request for `app`.
    fn into_request(self, app: impl Into<String>) -> TaskRequest
    where
        Self: Sized,
    {
        TaskRequest::new(Self::NAME, app, self.into_input())
    }
}

fn merge(mut input: Input, extra: Input) -> Input {
    input.extend(extra);
    input
}

/// Ask the service which model fits a workload.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendModel {
    /// Optimization target, e.g. `lowest_cost` or `fastest`.
    pub priority: String,
    /// Expected prompt size.
    pub input_tokens: u64,
    /// Expected completion size.
    pub output_tokens: u64,
    /// Additional input fields; these win over the typed fields on collision.
    pub extra: Input,
}

impl RecommendModel {
    /// `lowest_cost` with 1000 input and 500 output tokens.
    pub fn new() -> Self {
        Self {
            priority: "lowest_cost".to_string(),
            input_tokens: 1000,
            output_tokens: 500,
            extra: Input::new(),
        }
    }

    /// Set the optimization target.
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Set the expected prompt size.
    pub fn input_tokens(mut self, tokens: u64) -> Self {
        self.input_tokens = tokens;
        self
    }

    /// Set the expected completion size.
    pub fn output_tokens(mut self, tokens: u64) -> Self {
        self.output_tokens = tokens;
        self
    }

    /// Forward an extra field into `input`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Default for RecommendModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for RecommendModel {
    const NAME: &'static str = "recommend_model";

    fn into_input(self) -> Input {
        let mut input = Input::new();
        input.insert("priority".into(), Value::from(self.priority));
        input.insert("input_tokens".into(), Value::from(self.input_tokens));
        input.insert("output_tokens".into(), Value::from(self.output_tokens));
        merge(input, self.extra)
    }
}

/// Extract hard and soft traits from a personal story.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractTraitsStory {
    /// The narrative to analyse.
    pub story_text: String,
    /// Additional input fields; these win over `story_text` on collision.
    pub extra: Input,
}

impl ExtractTraitsStory {
    pub fn new(story_text: impl Into<String>) -> Self {
        Self {
            story_text: story_text.into(),
            extra: Input::new(),
        }
    }

    /// Forward an extra field into `input`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Task for ExtractTraitsStory {
    const NAME: &'static str = "extract_traits_story";

    fn into_input(self) -> Input {
        let mut input = Input::new();
        input.insert("story_text".into(), Value::from(self.story_text));
        merge(input, self.extra)
    }
}

/// Tasks whose input schema lives entirely on the server side.
macro_rules! passthrough_task {
    ($(#[$doc:meta])* $name:ident => $task:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            /// Sent as the request's `input` unchanged.
            pub input: Input,
        }

        impl $name {
            /// Wrap a prepared input object.
            pub fn new(input: Input) -> Self {
                Self { input }
            }

            /// Add a field to `input`.
            pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.input.insert(key.into(), value.into());
                self
            }
        }

        impl From<Input> for $name {
            fn from(input: Input) -> Self {
                Self::new(input)
            }
        }

        impl Task for $name {
            const NAME: &'static str = $task;

            fn into_input(self) -> Input {
                self.input
            }
        }
    };
}

passthrough_task!(
    /// Extract traits from a document such as a resume.
    ExtractTraitsDocument => "extract_traits_document"
);
passthrough_task!(
    /// Tailor a resume to a target role.
    TailorResume => "tailor_resume"
);
passthrough_task!(
    /// Synthesize an identity profile from extracted traits.
    SynthesizeIdentity => "synthesize_identity"
);
passthrough_task!(
    /// Summarize how a candidate fits a role.
    SummarizeFit => "summarize_fit"
);
