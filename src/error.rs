//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Please provide an OpenAI API key (--api-key or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
