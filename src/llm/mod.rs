//! Completion service seam and the Gemini implementation behind it.

mod error;
mod gemini;

use std::future::Future;

pub use error::LlmError;
pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// A hosted model that turns a prompt into JSON text shaped by a schema.
pub trait CompletionClient: Send + Sync {
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
