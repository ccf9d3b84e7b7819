/**
 * PostgreSQL User Store
 *
 * sqlx-backed implementation of `UserStore`. Enum columns are stored as
 * TEXT guarded by CHECK constraints (see `migrations/`), and usage counters
 * as non-negative BIGINT.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{PersistenceError, UserStore};
use crate::shared::user::{normalize_email, NewUser, User, UserPatch};

const USER_COLUMNS: &str = "id, name, email, password, role, subscription, phone, token_used, \
     word_used, refresh_token, status, profile_picture, login_method, email_verified, \
     created_at, updated_at";

/// Row as stored; converted into [`User`] after reading
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: Option<String>,
    role: String,
    subscription: String,
    phone: Option<String>,
    token_used: i64,
    word_used: i64,
    refresh_token: Option<String>,
    status: String,
    profile_picture: String,
    login_method: String,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            role: row.role.parse().map_err(PersistenceError::InvalidRecord)?,
            subscription: row.subscription.parse().map_err(PersistenceError::InvalidRecord)?,
            phone: row.phone,
            token_used: u64::try_from(row.token_used).map_err(|_| PersistenceError::CounterOverflow)?,
            word_used: u64::try_from(row.word_used).map_err(|_| PersistenceError::CounterOverflow)?,
            refresh_token: row.refresh_token,
            status: row.status.parse().map_err(PersistenceError::InvalidRecord)?,
            profile_picture: row.profile_picture,
            login_method: row.login_method.parse().map_err(PersistenceError::InvalidRecord)?,
            email_verified: row.email_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Map unique violations to a conflict, everything else to `Database`
fn map_write_error(error: sqlx::Error) -> PersistenceError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PersistenceError::Conflict { field: "email" }
        }
        _ => PersistenceError::Database(error),
    }
}

fn counter_delta(value: u64) -> Result<i64, PersistenceError> {
    i64::try_from(value).map_err(|_| PersistenceError::CounterOverflow)
}

/// User store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, PersistenceError> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO users (id, name, email, password, role, subscription, phone,
                               profile_picture, login_method, email_verified, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::new_v4())
            .bind(&new_user.name)
            .bind(&new_user.email)
            .bind(&new_user.password)
            .bind(new_user.role.as_str())
            .bind(new_user.subscription.as_str())
            .bind(&new_user.phone)
            .bind(&new_user.profile_picture)
            .bind(new_user.login_method.as_str())
            .bind(new_user.email_verified)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PersistenceError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PersistenceError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, PersistenceError> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                profile_picture = COALESCE($4, profile_picture),
                subscription = COALESCE($5, subscription),
                status = COALESCE($6, status),
                email_verified = COALESCE($7, email_verified),
                refresh_token = CASE WHEN $8 THEN $9 ELSE refresh_token END,
                updated_at = $10
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let set_refresh_token = patch.refresh_token.is_some();
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(patch.name)
            .bind(patch.phone)
            .bind(patch.profile_picture)
            .bind(patch.subscription.map(|s| s.as_str()))
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.email_verified)
            .bind(set_refresh_token)
            .bind(patch.refresh_token.flatten())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or(PersistenceError::NotFound)?;

        row.try_into()
    }

    async fn record_usage(&self, id: Uuid, tokens: u64, words: u64) -> Result<User, PersistenceError> {
        let query = format!(
            r#"
            UPDATE users
            SET token_used = token_used + $2,
                word_used = word_used + $3,
                updated_at = $4
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(counter_delta(tokens)?)
            .bind(counter_delta(words)?)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PersistenceError::NotFound)?;

        row.try_into()
    }
}
