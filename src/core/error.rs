//! Typed error handling for the waitlist service
//!
//! Service traits return `anyhow::Result` so storage implementations stay
//! simple; at the HTTP boundary those errors are mapped into
//! [`WaitlistError`], which carries a status code and a stable error code.
//!
//! # Error Categories
//!
//! - [`ApplicantError`]: Errors related to applicant lookups and mutations
//! - [`ValidationError`]: Errors related to input validation
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//! - [`StorageError`]: Errors related to the storage backend
//!
//! The filter evaluator and tree builder never produce errors: malformed
//! trees simply fail to match.

use crate::core::bulk::BulkActionError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the waitlist service
#[derive(Debug)]
pub enum WaitlistError {
    /// Applicant-related errors
    Applicant(ApplicantError),

    /// Validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for WaitlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitlistError::Applicant(e) => write!(f, "{}", e),
            WaitlistError::Validation(e) => write!(f, "{}", e),
            WaitlistError::Config(e) => write!(f, "{}", e),
            WaitlistError::Storage(e) => write!(f, "{}", e),
            WaitlistError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WaitlistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaitlistError::Applicant(e) => Some(e),
            WaitlistError::Validation(e) => Some(e),
            WaitlistError::Config(e) => Some(e),
            WaitlistError::Storage(e) => Some(e),
            WaitlistError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl WaitlistError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::Applicant(e) => e.status_code(),
            WaitlistError::Validation(_) => StatusCode::BAD_REQUEST,
            WaitlistError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WaitlistError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WaitlistError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            WaitlistError::Applicant(e) => e.error_code(),
            WaitlistError::Validation(_) => "VALIDATION_ERROR",
            WaitlistError::Config(_) => "CONFIG_ERROR",
            WaitlistError::Storage(_) => "STORAGE_ERROR",
            WaitlistError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Map an error returned by a service, keeping typed errors intact
    pub fn from_service(err: anyhow::Error) -> Self {
        match err.downcast::<WaitlistError>() {
            Ok(typed) => typed,
            Err(err) => match err.downcast::<StorageError>() {
                Ok(storage) => WaitlistError::Storage(storage),
                Err(err) => WaitlistError::Storage(StorageError::OperationFailed {
                    message: err.to_string(),
                }),
            },
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            WaitlistError::Applicant(ApplicantError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            WaitlistError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Applicant Errors
// =============================================================================

/// Errors related to applicant operations
#[derive(Debug)]
pub enum ApplicantError {
    /// Applicant was not found
    NotFound { id: Uuid },

    /// Applicant already exists (conflict)
    AlreadyExists { id: Uuid },
}

impl fmt::Display for ApplicantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicantError::NotFound { id } => {
                write!(f, "applicant with id '{}' not found", id)
            }
            ApplicantError::AlreadyExists { id } => {
                write!(f, "applicant with id '{}' already exists", id)
            }
        }
    }
}

impl std::error::Error for ApplicantError {}

impl ApplicantError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApplicantError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApplicantError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicantError::NotFound { .. } => "APPLICANT_NOT_FOUND",
            ApplicantError::AlreadyExists { .. } => "APPLICANT_ALREADY_EXISTS",
        }
    }
}

impl From<ApplicantError> for WaitlistError {
    fn from(err: ApplicantError) -> Self {
        WaitlistError::Applicant(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    InvalidJson { message: String },

    /// Stage text matching no known alias
    UnknownStage { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::UnknownStage { value } => {
                write!(f, "Unknown stage: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for WaitlistError {
    fn from(err: ValidationError) -> Self {
        WaitlistError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for WaitlistError {
    fn from(errors: validator::ValidationErrors) -> Self {
        WaitlistError::Validation(errors.into())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue { field: String, message: String },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for field '{}': {}", field, message)
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for WaitlistError {
    fn from(err: ConfigError) -> Self {
        WaitlistError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the storage backend
#[derive(Debug)]
pub enum StorageError {
    /// A lock guarding in-memory state was poisoned
    LockPoisoned { message: String },

    /// Storage operation failed
    OperationFailed { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire lock: {}", message)
            }
            StorageError::OperationFailed { message } => {
                write!(f, "Storage operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for WaitlistError {
    fn from(err: StorageError) -> Self {
        WaitlistError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<BulkActionError> for WaitlistError {
    fn from(err: BulkActionError) -> Self {
        match err {
            BulkActionError::EmptySelection => {
                WaitlistError::Validation(ValidationError::FieldError {
                    field: "ids".to_string(),
                    message: err.to_string(),
                })
            }
            BulkActionError::NothingPending => WaitlistError::Internal(err.to_string()),
            BulkActionError::Mutation(inner) => WaitlistError::from_service(inner),
        }
    }
}

impl From<serde_json::Error> for WaitlistError {
    fn from(err: serde_json::Error) -> Self {
        WaitlistError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for WaitlistError {
    fn from(err: std::io::Error) -> Self {
        WaitlistError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for WaitlistError {
    fn from(err: serde_yaml::Error) -> Self {
        WaitlistError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for waitlist operations
pub type WaitlistResult<T> = Result<T, WaitlistError>;

// =============================================================================
// Tests
// =============================================================================
