//! Persistence Module
//!
//! User storage behind the [`UserStore`] trait.
//!
//! # Implementations
//!
//! - **`postgres`** - [`PgUserStore`], sqlx over PostgreSQL (selected when
//!   `DATABASE_URL` is set and reachable)
//! - **`memory`** - [`InMemoryUserStore`], used when no database is configured
//!   and by the test suite
//!
//! Both enforce the same invariants: `email` is unique, usage counters never
//! go below zero, and users are never removed.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::user::{NewUser, ParseEnumError, User, UserPatch};

/// In-memory user store
pub mod memory;

/// PostgreSQL user store
pub mod postgres;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;

/// Storage failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A unique constraint rejected the write
    #[error("A user with this {field} already exists")]
    Conflict { field: &'static str },

    /// The addressed record does not exist
    #[error("User not found")]
    NotFound,

    /// A stored row could not be mapped back to a [`User`]
    #[error("Stored user record is invalid")]
    InvalidRecord(#[source] ParseEnumError),

    /// A counter left the range the schema allows
    #[error("Usage counter out of range")]
    CounterOverflow,

    /// Any other database failure
    #[error("Database operation failed")]
    Database(#[from] sqlx::Error),
}

/// Create/read/update access to users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; a taken email is [`PersistenceError::Conflict`]
    async fn create(&self, new_user: NewUser) -> Result<User, PersistenceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PersistenceError>;

    /// Look up by email (normalized the same way as on create)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, PersistenceError>;

    /// Add to the usage counters of a user after a billed AI call
    async fn record_usage(&self, id: Uuid, tokens: u64, words: u64) -> Result<User, PersistenceError>;
}
