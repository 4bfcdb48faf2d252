//! crates/prompt_architect_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AuthSession, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persists user credential records keyed by email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> PortResult<Option<User>>;

    /// Inserts the user unless the email is already taken. Returns `false`
    /// when a record with the same email exists; the store must make the
    /// check-and-insert atomic.
    async fn insert_if_absent(&self, user: User) -> PortResult<bool>;
}

/// Persists login sessions keyed by their opaque token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: AuthSession) -> PortResult<()>;

    async fn get(&self, token: &str) -> PortResult<Option<AuthSession>>;

    /// Moves the session's expiry forward. Must be a single atomic update
    /// per token so concurrent renewals cannot lose writes.
    async fn extend(&self, token: &str, expires_at: DateTime<Utc>) -> PortResult<()>;

    /// Removes the session. Deleting a token with no stored session is not
    /// an error.
    async fn delete(&self, token: &str) -> PortResult<()>;
}

/// One-way password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> PortResult<String>;

    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// The opaque external text-generation engine.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Sends one generation request and returns the engine's text verbatim.
    /// Provider or transport failures surface as `PortError::Unavailable`
    /// and are not retried.
    async fn generate(&self, system_instruction: &str, user_text: &str) -> PortResult<String>;
}
