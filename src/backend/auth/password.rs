//! bcrypt hashing, run off the async executor.

use crate::backend::error::ApiError;

/// Hash a password with the configured bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::unexpected("Internal Server Error!", e))?
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            ApiError::unexpected("Internal Server Error!", e)
        })
}

/// Check a password against a stored hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::unexpected("Internal Server Error!", e))?
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification error");
            ApiError::unexpected("Internal Server Error!", e)
        })
}
