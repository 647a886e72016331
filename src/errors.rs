//! Error types for adkit
//!
//! Splits failures into configuration errors, which are fatal before any
//! network activity, and API errors, which the batch loops recover from
//! per campaign.

use thiserror::Error;

/// Main error type for adkit operations
#[derive(Error, Debug)]
pub enum AdsError {
    /// Configuration file or flag errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Access token missing from the environment and .env
    #[error("FACEBOOK_ACCESS_TOKEN not found in environment or .env")]
    MissingCredential,

    /// Budget adjustment magnitude above the allowed maximum
    #[error("Adjustment {requested}% exceeds maximum of {max}%")]
    AdjustmentOutOfRange { requested: i32, max: u32 },

    /// Malformed ad account identifier
    #[error("Invalid account id: {0}")]
    InvalidAccountId(String),

    /// Error envelope returned by the Graph API
    #[error("Graph API error (code {code}): {message}")]
    ApiError { code: i64, message: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for adkit operations
pub type Result<T> = std::result::Result<T, AdsError>;
