//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt enhancement error: {0}")]
    EnhancementService(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("API error {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A single image in a batch failed; `index` is 1-based.
    #[error("Error generating image {index}: {source}")]
    ImageGeneration {
        index: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
