//! Backend Error Module
//!
//! This module is the error boundary of the gateway. Handlers return
//! `Result<_, ApiError>`; the boundary turns any error into a status code and
//! a `{ "success": false, "message": ... }` envelope.
//!
//! # Architecture
//!
//! - **`types`** - `ApiError`, its variants and per-variant status rules
//! - **`conversion`** - `normalize`, `IntoResponse`, rejection and panic conversion
//! - **`stream`** - streamed bodies that respect the "already committed" rule
//!
//! # Example
//!
//! ```rust
//! use assistant_gateway::backend::error::{normalize, ApiError};
//! use axum::http::StatusCode;
//!
//! let (status, envelope) = normalize(&ApiError::not_found("Requested URL Not Found"));
//! assert_eq!(status, StatusCode::NOT_FOUND);
//! assert!(!envelope.success);
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// Streamed response helper
pub mod stream;

// Re-export commonly used types
pub use conversion::{normalize, panic_response, ErrorEnvelope, NormalizedError, DEFAULT_ERROR_MESSAGE};
pub use stream::stream_response;
pub use types::ApiError;

/// Result alias used by handlers
pub type ApiResult<T> = Result<T, ApiError>;
