//! Custom error types and handling
//!
//! Every fault the harness can observe maps onto one `AppError` variant.
//! Faults raised by a solution under test are caught by the runner and the
//! analyzer and recorded; they never escape those boundaries.

use std::time::Duration;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Solution faults
    #[error("Time limit exceeded: {0:?}")]
    TimeLimitExceeded(Duration),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Solution panicked: {0}")]
    SolutionPanicked(String),

    // Input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid test case: {0}")]
    InvalidTestCase(String),

    #[error("Unknown solution: {0}")]
    UnknownSolution(String),

    // Test-case file errors
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TimeLimitExceeded(_) => "TIME_LIMIT_EXCEEDED",
            Self::RuntimeError(_) => "RUNTIME_ERROR",
            Self::SolutionPanicked(_) => "SOLUTION_PANICKED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidTestCase(_) => "INVALID_TEST_CASE",
            Self::UnknownSolution(_) => "UNKNOWN_SOLUTION",
            Self::File(_) => "FILE_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error originated in the solution under test
    pub fn is_solution_fault(&self) -> bool {
        matches!(
            self,
            Self::TimeLimitExceeded(_)
                | Self::RuntimeError(_)
                | Self::SolutionPanicked(_)
                | Self::InvalidInput(_)
        )
    }

    /// Build a `SolutionPanicked` error from a caught panic payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::SolutionPanicked(message)
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
