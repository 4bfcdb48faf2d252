//! crates/prompt_architect_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A registered user. Created once at signup and immutable thereafter.
///
/// The email is the unique identifier and is stored exactly as submitted,
/// with no case normalization.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    pub name: String,
    /// One-way password verifier. Never holds the cleartext password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A browser login session bound to a user's email.
///
/// The session identifies the user but does not own the user record.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Opaque session token handed to the client as a cookie value.
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// When set, every successful validation renews `expires_at` from the
    /// validation instant (sliding idle window).
    pub permanent: bool,
}

/// The identity resolved from a validated session, handed to protected
/// handlers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
}

/// A user's request for an engineered prompt. Transient, never persisted.
///
/// Only `user_request` is required. The optional fields are each
/// independently present or absent; an empty string counts as absent.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub user_request: String,
    pub tone: Option<String>,
    pub context: Option<String>,
    pub prompt_size: Option<String>,
    pub negative_aspects: Option<String>,
    pub country_language: Option<String>,
    pub industry: Option<String>,
    pub output_format: Option<String>,
}

/// The fully assembled input for the generation engine.
#[derive(Debug, Clone)]
pub struct ComposedPayload {
    /// The fixed meta-prompt methodology document, attached verbatim.
    pub system_instruction: Arc<str>,
    /// The user request header plus the labeled optional-parameter block.
    pub user_text: String,
}
