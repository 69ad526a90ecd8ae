use thiserror::Error;

use crate::converters::pdf::PdfRenderError;

/// Errors surfaced by the carousel tools outside the pure rendering functions.
#[derive(Error, Debug)]
pub enum CarouselError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Error occurred while (de)serializing JSON.
    #[error("Failed to process JSON: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// An error reported by the remote API itself (e.g., 4xx or 5xx status code).
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The document could not be rendered.
    #[error("Rendering failed: {0}")]
    Render(#[from] PdfRenderError),

    #[error("Carousel not found: {0}")]
    NotFound(String),

    #[error("No active workspace for this request")]
    NoActiveWorkspace,

    /// The carousel exists but belongs to a different workspace than the caller's.
    #[error("Carousel {carousel_id} does not belong to the active workspace")]
    WorkspaceMismatch { carousel_id: String },

    /// An error indicating invalid input was provided to a function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not allowed in the carousel's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An error related to reading environment variables.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The carousel store failed to read or write.
    #[error("Storage error: {0}")]
    Store(String),
}

/// A type alias for `Result<T, CarouselError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, CarouselError>;
