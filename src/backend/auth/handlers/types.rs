/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Request types implement `Validate` so they can be extracted with `ValidJson`.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::{Validate, ValidationError};
use crate::shared::user::{is_valid_email, UserResponse};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Plain text; hashed before storage
    pub password: String,
    pub phone: Option<String>,
    /// Falls back to the configured default picture
    pub profile_picture: Option<String>,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        if self.name.trim().is_empty() {
            error.push(["name"], "Required");
        }
        if self.email.trim().is_empty() {
            error.push(["email"], "Required");
        } else if !is_valid_email(self.email.trim()) {
            error.push(["email"], "Invalid email address");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            error.push(["password"], format!("Must be at least {MIN_PASSWORD_LEN} characters"));
        }
        error.into_result()
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        if self.email.trim().is_empty() {
            error.push(["email"], "Required");
        }
        if self.password.is_empty() {
            error.push(["password"], "Required");
        }
        error.into_result()
    }
}

/// Refresh request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

impl Validate for RefreshRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.refresh_token.trim().is_empty() {
            return Err(ValidationError::new().field(["refreshToken"], "Required"));
        }
        Ok(())
    }
}

/// Returned by register and login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Returned by refresh-token
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}
