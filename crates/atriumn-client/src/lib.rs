//! HTTP client SDK for the Atriumn AI orchestration service.
//!
//! Every call builds a `{task, app, input, [options]}` payload, performs one
//! POST, and maps the response to either the decoded JSON object or one
//! [`Error`] kind. There is no retry, batching or caching.
//!
//! # Example
//!
//! ```no_run
//! use atriumn_client::{AtriumnClient, ExtractTraitsStory, Protocol, Result};
//! use serde_json::json;
//!
//! # async fn example() -> Result<()> {
//! // Key and URL fall back to ATRIUMN_API_KEY / ATRIUMN_API_URL and friends.
//! let client = AtriumnClient::builder()
//!     .protocol(Protocol::PROMPT)
//!     .base_url("https://api.atriumn.ai")
//!     .api_key("secret")
//!     .build()?;
//!
//! let result = client
//!     .run_task_with_options(
//!         "extract_traits_story",
//!         "idynic",
//!         json!({"story": "I led a team through a product launch."}),
//!         Some(json!({"model": "gpt-4", "temperature": 0.7})),
//!     )
//!     .await?;
//! println!("{}", serde_json::Value::Object(result));
//!
//! let traits = client
//!     .extract_traits_story("idynic", ExtractTraitsStory::new("I learned to climb."))
//!     .await?;
//! println!("{:?}", traits.get("hard_traits"));
//! # Ok(())
//! # }
//! ```
//!
//! # Protocols
//!
//! - [`Protocol::TASKS`]: `POST /tasks/execute`, `x-api-key` header, missing
//!   key reported by the server. Default.
//! - [`Protocol::PROMPT`]: `POST /v1/prompt`, bearer token, base URL and key
//!   required when the client is built.
//!
//! # Features
//!
//! - `blocking` (default): [`blocking::AtriumnClient`], a synchronous client.

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod request;
pub mod tasks;
pub mod translate;

pub use client::{AtriumnClient, ClientBuilder};
pub use config::{
    API_KEY_ENV_VARS, BASE_URL_ENV_VARS, Config, DEFAULT_BASE_URL, Overrides, Source,
};
pub use error::{Error, ErrorKind, Result};
pub use protocol::{AuthScheme, CredentialPolicy, Endpoint, Protocol};
pub use request::{Input, TaskRequest};
pub use tasks::{
    ExtractTraitsDocument, ExtractTraitsStory, RecommendModel, SummarizeFit, SynthesizeIdentity,
    TailorResume, Task,
};
pub use translate::{TaskResult, translate};
