//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CredentialStore` and `SessionStore` ports from the `core` crate.
//! It handles all interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prompt_architect_core::domain::{AuthSession, User};
use prompt_architect_core::ports::{CredentialStore, PortError, PortResult, SessionStore};
use sqlx::{FromRow, PgPool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the credential and session store ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct AuthSessionRecord {
    id: String,
    email: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    permanent: bool,
}
impl AuthSessionRecord {
    fn to_domain(self) -> AuthSession {
        AuthSession {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
            expires_at: self.expires_at,
            permanent: self.permanent,
        }
    }
}

//=========================================================================================
// `CredentialStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CredentialStore for DbAdapter {
    async fn find_by_email(&self, email: &str) -> PortResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT email, name, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(UserRecord::to_domain))
    }

    async fn insert_if_absent(&self, user: User) -> PortResult<bool> {
        // ON CONFLICT DO NOTHING makes the uniqueness check and the insert
        // one atomic statement; rows_affected tells us which way it went.
        let result = sqlx::query(
            "INSERT INTO users (email, name, password_hash, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(result.rows_affected() == 1)
    }
}

//=========================================================================================
// `SessionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStore for DbAdapter {
    async fn insert(&self, session: AuthSession) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO auth_sessions (id, email, created_at, expires_at, permanent)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&session.id)
        .bind(&session.email)
        .bind(session.created_at)
        .bind(session.expires_at)
        .bind(session.permanent)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    async fn get(&self, token: &str) -> PortResult<Option<AuthSession>> {
        let record = sqlx::query_as::<_, AuthSessionRecord>(
            "SELECT id, email, created_at, expires_at, permanent
             FROM auth_sessions WHERE id = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(AuthSessionRecord::to_domain))
    }

    async fn extend(&self, token: &str, expires_at: DateTime<Utc>) -> PortResult<()> {
        // Single-statement update so concurrent renewals of the same token
        // cannot lose writes. A vanished row is not an error; the next
        // validation will report the missing session.
        sqlx::query("UPDATE auth_sessions SET expires_at = $2 WHERE id = $1")
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }

    async fn delete(&self, token: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }
}
