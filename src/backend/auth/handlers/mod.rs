//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── refresh.rs   - Access token refresh
//! └── me.rs        - Current user and logout
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /v1/api/auth/register
//! - **`login`** - POST /v1/api/auth/login
//! - **`refresh_token`** - POST /v1/api/auth/refresh-token
//! - **`logout`** - POST /v1/api/auth/logout
//! - **`get_me`** - GET /v1/api/auth/me
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → tokens returned
//! 2. **Login**: email and password → credentials verified → tokens returned
//! 3. **Refresh**: stored refresh token → new access token
//! 4. **Logout**: stored refresh token cleared

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Refresh handler
pub mod refresh;

/// Current user and logout handlers
pub mod me;

pub use types::{AccessTokenResponse, AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};

pub use login::login;
pub use me::{get_me, logout};
pub use refresh::refresh_token;
pub use register::register;
