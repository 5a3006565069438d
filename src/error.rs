use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Completion service error: {0}")]
    Llm(#[from] LlmError),

    #[error("Response does not match the meal plan contract: {0}")]
    Contract(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    GenerationFailed(String),

    #[error("Missing API key: set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, PlateError>;
