//! User Account Module
//!
//! Profile management for the signed-in user, mounted at `/v1/api/user`.
//!
//! - `GET /profile` - the current profile
//! - `PATCH /profile` - update name, phone or profile picture
//! - `PATCH /deactivate` - soft-delete the account (`status = inactive`)
//!
//! Accounts are never removed. Deactivation also clears the stored refresh
//! token, so the user is signed out everywhere.

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::backend::error::ApiResult;
use crate::backend::middleware::{AuthUser, ValidJson};
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::error::{Validate, ValidationError};
use crate::shared::user::{AccountStatus, UserPatch, UserResponse};

/// Profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Digits with optional `+`, spaces and dashes, 6 to 20 characters
fn is_valid_phone(phone: &str) -> bool {
    let len = phone.chars().count();
    (6..=20).contains(&len)
        && phone.chars().any(|c| c.is_ascii_digit())
        && phone
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (i == 0 && c == '+'))
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            error.push(["name"], "Must not be empty");
        }
        if matches!(&self.phone, Some(phone) if !is_valid_phone(phone.trim())) {
            error.push(["phone"], "Invalid phone number");
        }
        if matches!(&self.profile_picture, Some(picture) if picture.trim().is_empty()) {
            error.push(["profile_picture"], "Must not be empty");
        }
        error.into_result()
    }
}

impl From<UpdateProfileRequest> for UserPatch {
    fn from(request: UpdateProfileRequest) -> Self {
        UserPatch {
            name: request.name.map(|name| name.trim().to_string()),
            phone: request.phone.map(|phone| phone.trim().to_string()),
            profile_picture: request.profile_picture.map(|p| p.trim().to_string()),
            ..UserPatch::default()
        }
    }
}

pub async fn get_profile(AuthUser(user): AuthUser) -> ApiResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok("Profile retrieved successfully", UserResponse::from(&user)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidJson(request): ValidJson<UpdateProfileRequest>,
) -> ApiResult<ApiResponse<UserResponse>> {
    let updated = state.users.update(user.id, request.into()).await?;
    tracing::info!(user_id = %updated.id, "Profile updated");
    Ok(ApiResponse::ok("Profile updated successfully", UserResponse::from(&updated)))
}

pub async fn deactivate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<ApiResponse<UserResponse>> {
    let patch = UserPatch {
        status: Some(AccountStatus::Inactive),
        refresh_token: Some(None),
        ..UserPatch::default()
    };
    let updated = state.users.update(user.id, patch).await?;
    tracing::info!(user_id = %updated.id, "Account deactivated");
    Ok(ApiResponse::ok("Account deactivated", UserResponse::from(&updated)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+880 1711-000000"));
        assert!(is_valid_phone("0123456"));
        assert!(!is_valid_phone("12"));
        assert!(!is_valid_phone("phone-number"));
        assert!(!is_valid_phone("12+34567"));
    }

    #[test]
    fn test_update_profile_validation() {
        let request = UpdateProfileRequest {
            name: Some("  ".to_string()),
            phone: Some("abc".to_string()),
            profile_picture: None,
        };
        assert_eq!(
            request.validate().unwrap_err().render(),
            "name: Must not be empty; phone: Invalid phone number"
        );
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }

    #[test]
    fn test_patch_trims_values() {
        let patch: UserPatch = UpdateProfileRequest {
            name: Some(" Grace ".to_string()),
            ..UpdateProfileRequest::default()
        }
        .into();
        assert_eq!(patch.name.as_deref(), Some("Grace"));
        assert_eq!(patch.phone, None);
    }
}
