//! Shared Validation Types
//!
//! This module defines the field-level validation failures that request
//! payloads and domain values report before anything touches storage or an
//! AI provider.
//!
//! # Rendering
//!
//! A [`ValidationError`] always renders to a single human-readable string:
//! each failure becomes `"<dotted path>: <message>"` and failures are joined
//! with `"; "`.
//!
//! ```rust
//! use assistant_gateway::shared::error::ValidationError;
//!
//! let error = ValidationError::new()
//!     .field(["email"], "Required")
//!     .field(["age"], "Must be positive");
//! assert_eq!(error.render(), "email: Required; age: Must be positive");
//! ```
use serde::Serialize;
use std::fmt;

/// A single failed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the field, outermost segment first
    pub path: Vec<String>,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    /// Create a new field failure
    pub fn new<P, S>(path: P, message: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Render as `"<dotted path>: <message>"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.path.join("."), self.message)
    }
}

/// A collection of field failures raised together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    failures: Vec<FieldError>,
}

impl ValidationError {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of failures
    pub fn from_failures(failures: Vec<FieldError>) -> Self {
        Self { failures }
    }

    /// Builder-style variant of [`push`](Self::push)
    pub fn field<P, S>(mut self, path: P, message: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(path, message);
        self
    }

    /// Record a failure for `path`
    pub fn push<P, S>(&mut self, path: P, message: impl Into<String>) -> &mut Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failures.push(FieldError::new(path, message));
        self
    }

    /// Recorded failures, in the order they were raised
    pub fn failures(&self) -> &[FieldError] {
        &self.failures
    }

    /// True when nothing failed
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Join all failures into one message
    pub fn render(&self) -> String {
        self.failures
            .iter()
            .map(FieldError::render)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when no failure was recorded, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ValidationError {}

/// Types that can check their own field-level invariants
pub trait Validate {
    /// Return every failed field at once rather than stopping at the first
    fn validate(&self) -> Result<(), ValidationError>;
}
