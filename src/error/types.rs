// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure talking to the catalog or the backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("{service} returned status {status}: {message}")]
    Remote {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Rejection from the identity provider, carrying its message.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("This email is already registered")]
    AlreadyRegistered,

    /// A signed-in identity is required for this operation.
    #[error("Not signed in")]
    NoIdentity,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Build an auth error from a provider message, recognising the
    /// "already registered" condition so callers can switch to sign-in.
    pub fn from_auth_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("user_already_exists") || lower.contains("already registered") {
            AppError::AlreadyRegistered
        } else {
            AppError::Auth { message }
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
