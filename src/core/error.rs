use thiserror::Error;

use crate::backends::BackendError;

#[derive(Error, Debug)]
pub enum NutriqError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Web search error: {0}")]
    WebSearch(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, NutriqError>;
