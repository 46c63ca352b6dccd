//! # Error Handling
//!
//! This module defines the service's error type and how each variant becomes an HTTP response.
//!
//! ## Key Rust Concepts for Error Handling:
//!
//! ### Enums for Error Types
//! - **Variants**: Each enum variant represents a different kind of failure
//! - **Data**: Each variant carries the message the client will see
//! - **Pattern matching**: `match` maps every variant to a status code, and the compiler
//!   complains if a new variant is added without a mapping
//!
//! ### Traits for Error Conversion
//! - **From trait**: Lets `?` convert library errors into `AppError` automatically
//! - **ResponseError trait**: actix-web calls this to turn a handler's `Err` into a response
//! - **Display trait**: Defines how errors are formatted in logs
//!
//! ## Response body:
//! Interview clients only look at a single `error` key, so every error renders as
//! `{"error": "<message>"}` regardless of variant.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Body returned when an answer could not be written to disk.
/// The underlying IO error is logged, never sent to the client.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save answer";

/// Custom error types for the application.
///
/// ## Error Categories:
/// - **Internal**: Server-side problems such as a failed upload write (500)
/// - **BadRequest**: Body could not be parsed at all (400)
/// - **NotFound**: Unknown session id (404)
/// - **ValidationError**: A required field is missing or empty (400)
/// - **AlreadyCompleted**: Answer sent after the last question while that is disallowed (409)
///
/// ## Usage Example:
/// ```rust
/// return Err(AppError::ValidationError("Name is required".to_string()));
/// ```
#[derive(Debug)]
pub enum AppError {
    /// Internal server errors (upload writes, unexpected failures)
    Internal(String),

    /// Client sent malformed data
    BadRequest(String),

    /// Requested session was not found
    NotFound(String),

    /// A required input was absent or empty
    ValidationError(String),

    /// The session has already moved past its final question
    AlreadyCompleted(String),
}

impl AppError {
    /// Client-facing message carried by the variant.
    pub fn message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::AlreadyCompleted(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::AlreadyCompleted(msg) => write!(f, "Already completed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Implementation of the ResponseError trait for AppError.
///
/// ## HTTP Status Code Mapping:
/// - Internal → 500 (Internal Server Error)
/// - BadRequest/ValidationError → 400 (Bad Request)
/// - NotFound → 404 (Not Found)
/// - AlreadyCompleted → 409 (Conflict)
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyCompleted(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

/// Filesystem failures are server-side problems. The client gets the generic
/// save message; callers log the original error before converting.
impl From<std::io::Error> for AppError {
    fn from(_: std::io::Error) -> Self {
        AppError::Internal(SAVE_FAILED_MESSAGE.to_string())
    }
}

/// Body extraction failures (malformed JSON, wrong content type) are the client's
/// fault, so they map to 400. Registered through `JsonConfig::error_handler`.
impl From<actix_web::error::JsonPayloadError> for AppError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", err))
    }
}

/// Multipart stream failures mean the upload itself was malformed.
impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Multipart error: {}", err))
    }
}

/// Type alias for Results that use our custom error type.
///
/// ## Usage Example:
/// ```rust
/// fn find(id: &str) -> AppResult<SessionHandle> {
///     // Equivalent to: Result<SessionHandle, AppError>
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
