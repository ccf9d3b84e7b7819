/**
 * API Error Types
 *
 * `ApiError` is the single error type every handler returns. The variant is
 * chosen where the failure is raised, and each variant carries its own
 * status rule.
 *
 * # Status Code Mapping
 *
 * - `NotFound` - 404
 * - `Validation` - 400
 * - `Http` - the explicit status when it is a 4xx/5xx code, otherwise 500
 * - `Upstream` - 503 (not configured), 504 (timeout), otherwise 502
 * - `Persistence` - 409 (conflict), 404 (missing record), otherwise 500
 * - `Unknown` - 500
 */

use axum::http::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;

use crate::backend::persistence::PersistenceError;
use crate::backend::providers::ProviderError;
use crate::shared::error::ValidationError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that can reach the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// A route or business entity does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// One or more request fields failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An error raised with an explicit HTTP status
    #[error("{message}")]
    Http {
        /// Requested status; invalid or missing values resolve to 500
        status: Option<u16>,
        message: String,
    },

    /// An AI provider call failed
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    /// The user store failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Anything else
    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an error with an explicit status
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status.as_u16()),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::FORBIDDEN, message)
    }

    /// An unexpected failure with a client-safe message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an unexpected error; its details go to the log only
    pub fn unexpected<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Unknown {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Http { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Upstream(err) => err.status_code(),
            Self::Persistence(err) => match err {
                PersistenceError::Conflict { .. } => StatusCode::CONFLICT,
                PersistenceError::NotFound => StatusCode::NOT_FOUND,
                PersistenceError::InvalidRecord(_)
                | PersistenceError::CounterOverflow
                | PersistenceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unknown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    ///
    /// Validation failures are joined into one line. The result may be empty;
    /// the error boundary substitutes the default message in that case.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err.render(),
            other => other.to_string(),
        }
    }

    /// The error and every source below it, for the operator log
    pub fn diagnostic(&self) -> String {
        let mut chain = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            chain.push_str(" | caused by: ");
            chain.push_str(&err.to_string());
            source = err.source();
        }
        chain
    }
}
