//! Shared Module
//!
//! This module contains types that do not depend on the HTTP layer: the user
//! entity, field validation and application configuration. The backend
//! builds on them, and tests can use them without starting a server.

/// Field-level validation errors
pub mod error;

/// User entity and its invariants
pub mod user;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldError, Validate, ValidationError};
pub use user::{AccountStatus, LoginMethod, NewUser, Role, Subscription, User, UserPatch, UserResponse};
