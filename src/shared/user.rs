//! User Model
//!
//! The persisted user entity and the values used to create and modify it.
//! Storage itself lives in `backend::persistence`; this module only knows the
//! shape of a user and its field-level invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::error::{Validate, ValidationError};

/// Returned when a stored enum column holds an unknown value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(
    /// Authorization role
    Role, "role" { User => "user", Admin => "admin" }
);

string_enum!(
    /// Billing plan
    Subscription, "subscription" { Free => "free", Pro => "pro" }
);

string_enum!(
    /// Soft lifecycle state; accounts are never hard-deleted
    AccountStatus, "status" { Active => "active", Inactive => "inactive" }
);

string_enum!(
    /// How the account signs in
    LoginMethod, "login_method" { Email => "email", Google => "google", Facebook => "facebook" }
);

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::Free
    }
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for LoginMethod {
    fn default() -> Self {
        Self::Email
    }
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique across all users, stored trimmed and lower-cased
    pub email: String,
    /// bcrypt hash; `None` for OAuth accounts
    pub password: Option<String>,
    pub role: Role,
    pub subscription: Subscription,
    pub phone: Option<String>,
    pub token_used: u64,
    pub word_used: u64,
    pub refresh_token: Option<String>,
    pub status: AccountStatus,
    pub profile_picture: String,
    pub login_method: LoginMethod,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Values required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub subscription: Subscription,
    pub phone: Option<String>,
    pub profile_picture: String,
    pub login_method: LoginMethod,
    pub email_verified: bool,
}

impl NewUser {
    /// A new account with every optional field at its default
    pub fn new(
        name: impl Into<String>,
        email: impl AsRef<str>,
        profile_picture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: normalize_email(email.as_ref()),
            password: None,
            role: Role::default(),
            subscription: Subscription::default(),
            phone: None,
            profile_picture: profile_picture.into(),
            login_method: LoginMethod::default(),
            email_verified: false,
        }
    }

    /// Materialize the stored record
    pub fn into_user(self, id: Uuid, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            subscription: self.subscription,
            phone: self.phone,
            token_used: 0,
            word_used: 0,
            refresh_token: None,
            status: AccountStatus::default(),
            profile_picture: self.profile_picture,
            login_method: self.login_method,
            email_verified: self.email_verified,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut error = ValidationError::new();
        if self.name.trim().is_empty() {
            error.push(["name"], "Required");
        }
        if !is_valid_email(&self.email) {
            error.push(["email"], "Invalid email address");
        }
        if self.profile_picture.trim().is_empty() {
            error.push(["profile_picture"], "Required");
        }
        if self.login_method == LoginMethod::Email && self.password.is_none() {
            error.push(["password"], "Required for email sign-in");
        }
        error.into_result()
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub subscription: Option<Subscription>,
    pub status: Option<AccountStatus>,
    pub email_verified: Option<bool>,
    /// `Some(None)` clears the stored token
    pub refresh_token: Option<Option<String>>,
}

impl UserPatch {
    /// Apply the patch in place
    pub fn apply(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(picture) = self.profile_picture {
            user.profile_picture = picture;
        }
        if let Some(subscription) = self.subscription {
            user.subscription = subscription;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(verified) = self.email_verified {
            user.email_verified = verified;
        }
        if let Some(token) = self.refresh_token {
            user.refresh_token = token;
        }
        user.updated_at = now;
    }
}

/// User response (without sensitive data)
///
/// Never includes the password hash or the refresh token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub subscription: Subscription,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(rename = "tokenUsed")]
    pub token_used: u64,
    #[serde(rename = "wordUsed")]
    pub word_used: u64,
    pub status: AccountStatus,
    pub profile_picture: String,
    pub login_method: LoginMethod,
    pub email_verified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            subscription: user.subscription,
            phone: user.phone.clone(),
            token_used: user.token_used,
            word_used: user.word_used,
            status: user.status,
            profile_picture: user.profile_picture.clone(),
            login_method: user.login_method,
            email_verified: user.email_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic shape check: one `@`, a non-empty local part and a dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
