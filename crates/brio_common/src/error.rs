use std::fmt;
use thiserror::Error;

/// The base error type for the Brio service.
///
/// Each crate keeps its own error enum and implements `From<CrateError> for BrioError`
/// so handlers can answer with a consistent JSON error body.
#[derive(Error, Debug)]
pub enum BrioError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid input from the caller
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during a database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// An upstream service could not be reached or answered garbage
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    #[error("Timeout: {0}")]
    TimeoutError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BrioError {
    fn status_code(&self) -> u16 {
        match self {
            BrioError::ConfigError(_) => 500,
            BrioError::ValidationError(_) => 400,
            BrioError::DatabaseError(_) => 500,
            BrioError::ExternalServiceError { .. } => 502,
            BrioError::TimeoutError(_) => 504,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BrioError {
    BrioError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> BrioError {
    BrioError::ValidationError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> BrioError {
    BrioError::DatabaseError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BrioError {
    BrioError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
