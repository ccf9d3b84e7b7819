//! Authentication Module
//!
//! This module handles user registration, login and session management.
//!
//! # Architecture
//!
//! - **`sessions`** - JWT access/refresh token generation and validation
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens are short-lived; refresh tokens are stored on the user so
//!   logout revokes them
//! - Invalid credentials return 401 without saying which part was wrong

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, refresh_token, register};
pub use sessions::{Claims, SessionError, SessionKeys, TokenKind};
