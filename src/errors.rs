/*!
 * Error types for the chunkwise application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Note that the translation pipeline itself never returns an error: provider
 * failures are recovered per segment. These types describe what went wrong
 * below and around it.
 */

use thiserror::Error;

/// Errors that can occur when calling a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when sending the request fails (network, timeout, DNS)
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails or the payload has no translation
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP or payload status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The service refused because source and target resolve to the same language
    #[error("Source and target language are the same: {0}")]
    SameLanguage(String),
}

impl ProviderError {
    /// Whether another attempt at the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::ParseError(_) | Self::SameLanguage(_) => false,
        }
    }
}

/// Errors found while validating configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Unknown or malformed language code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// Segment length must be positive
    #[error("Invalid maximum segment length: {0}")]
    InvalidSegmentLength(usize),

    /// At least one sentence terminator is required
    #[error("Sentence terminator set cannot be empty")]
    EmptyTerminators,

    /// Endpoint is not a usable URL
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        /// The configured endpoint
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
