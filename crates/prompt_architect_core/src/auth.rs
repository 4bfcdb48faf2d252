//! crates/prompt_architect_core/src/auth.rs
//!
//! The session manager: signup, login, session validation and logout,
//! built on the credential/session store ports.

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AuthSession, Identity, User};
use crate::ports::{CredentialStore, PasswordHasher, PortError, SessionStore};

/// Idle lifetime of a session. A `permanent` session is renewed for this
/// long on every successful validation.
const SESSION_IDLE_MINUTES: i64 = 10;

//=========================================================================================
// Error Types
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("A user with that email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    Store(#[from] PortError),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Covers both an unknown email and a rejected password. The two cases
    /// must stay indistinguishable to the caller.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] PortError),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No session")]
    NoSession,
    #[error("Session expired")]
    SessionExpired,
    #[error(transparent)]
    Store(#[from] PortError),
}

//=========================================================================================
// SessionManager
//=========================================================================================

/// Issues, validates and destroys login sessions.
#[derive(Clone)]
pub struct SessionManager {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SessionManager {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            credentials,
            sessions,
            hasher,
        }
    }

    fn idle_lifetime() -> Duration {
        Duration::minutes(SESSION_IDLE_MINUTES)
    }

    /// Creates a new user record. The email uniqueness check rides on the
    /// store's atomic insert-if-absent.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SignupError> {
        let user = User {
            email: email.to_string(),
            name: name.to_string(),
            password_hash: self.hasher.hash(password)?,
            created_at: Utc::now(),
        };

        if self.credentials.insert_if_absent(user).await? {
            Ok(())
        } else {
            Err(SignupError::DuplicateEmail)
        }
    }

    /// Verifies the credentials and issues a fresh session.
    ///
    /// An unknown email and a wrong password both return
    /// `AuthError::InvalidCredentials`.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let user = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let session = AuthSession {
            id: Uuid::new_v4().to_string(),
            email: user.email,
            created_at: now,
            expires_at: now + Self::idle_lifetime(),
            permanent: true,
        };
        self.sessions.insert(session.clone()).await?;

        Ok(session)
    }

    /// Resolves a session token to the identity it was issued for.
    ///
    /// Expiry is checked lazily here; an expired row is deleted on sight.
    /// A `permanent` session that validates gets its expiry renewed from
    /// now, so active use keeps it alive indefinitely while idle sessions
    /// die after the idle lifetime.
    pub async fn validate(&self, token: Option<&str>) -> Result<Identity, SessionError> {
        let token = token.ok_or(SessionError::NoSession)?;
        let session = self
            .sessions
            .get(token)
            .await?
            .ok_or(SessionError::NoSession)?;

        let now = Utc::now();
        if now > session.expires_at {
            self.sessions.delete(token).await?;
            return Err(SessionError::SessionExpired);
        }

        if session.permanent {
            self.sessions
                .extend(token, now + Self::idle_lifetime())
                .await?;
        }

        Ok(Identity {
            email: session.email,
        })
    }

    /// Destroys the session. Invalidating a token that has no session is
    /// not an error.
    pub async fn invalidate(&self, token: &str) -> Result<(), PortError> {
        self.sessions.delete(token).await
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortResult;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryCredentials {
        users: Mutex<HashMap<String, User>>,
    }

    #[async_trait]
    impl CredentialStore for InMemoryCredentials {
        async fn find_by_email(&self, email: &str) -> PortResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }

        async fn insert_if_absent(&self, user: User) -> PortResult<bool> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.email) {
                return Ok(false);
            }
            users.insert(user.email.clone(), user);
            Ok(true)
        }
    }

    #[derive(Default)]
    struct InMemorySessions {
        sessions: Mutex<HashMap<String, AuthSession>>,
    }

    impl InMemorySessions {
        fn expires_at(&self, token: &str) -> Option<DateTime<Utc>> {
            self.sessions
                .lock()
                .unwrap()
                .get(token)
                .map(|s| s.expires_at)
        }

        fn set_expires_at(&self, token: &str, expires_at: DateTime<Utc>) {
            self.sessions
                .lock()
                .unwrap()
                .get_mut(token)
                .expect("session should exist")
                .expires_at = expires_at;
        }
    }

    #[async_trait]
    impl SessionStore for InMemorySessions {
        async fn insert(&self, session: AuthSession) -> PortResult<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id.clone(), session);
            Ok(())
        }

        async fn get(&self, token: &str) -> PortResult<Option<AuthSession>> {
            Ok(self.sessions.lock().unwrap().get(token).cloned())
        }

        async fn extend(&self, token: &str, expires_at: DateTime<Utc>) -> PortResult<()> {
            if let Some(session) = self.sessions.lock().unwrap().get_mut(token) {
                session.expires_at = expires_at;
            }
            Ok(())
        }

        async fn delete(&self, token: &str) -> PortResult<()> {
            self.sessions.lock().unwrap().remove(token);
            Ok(())
        }
    }

    /// A transparent stand-in for the real password hasher.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, plaintext: &str) -> PortResult<String> {
            Ok(format!("hashed${plaintext}"))
        }

        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            hash == format!("hashed${plaintext}")
        }
    }

    fn manager() -> (
        SessionManager,
        Arc<InMemoryCredentials>,
        Arc<InMemorySessions>,
    ) {
        let credentials = Arc::new(InMemoryCredentials::default());
        let sessions = Arc::new(InMemorySessions::default());
        let manager = SessionManager::new(
            credentials.clone(),
            sessions.clone(),
            Arc::new(PlainHasher),
        );
        (manager, credentials, sessions)
    }

    #[tokio::test]
    async fn register_stores_verifier_not_plaintext() {
        let (manager, credentials, _) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();

        let user = credentials
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(user.name, "Ada");
        assert_ne!(user.password_hash, "hunter2");
    }

    #[tokio::test]
    async fn duplicate_signup_reports_duplicate_without_mutating() {
        let (manager, credentials, _) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();

        let err = manager
            .register("Impostor", "ada@example.com", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, SignupError::DuplicateEmail));

        let user = credentials
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn authenticate_fails_uniformly_for_unknown_email_and_bad_password() {
        let (manager, _, _) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();

        let unknown = manager
            .authenticate("nobody@example.com", "hunter2")
            .await
            .unwrap_err();
        let wrong_password = manager
            .authenticate("ada@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn fresh_session_validates() {
        let (manager, _, _) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();

        let session = manager
            .authenticate("ada@example.com", "hunter2")
            .await
            .unwrap();
        assert!(session.permanent);

        let identity = manager.validate(Some(&session.id)).await.unwrap();
        assert_eq!(identity.email, "ada@example.com");
    }

    #[tokio::test]
    async fn missing_and_unknown_tokens_are_no_session() {
        let (manager, _, _) = manager();

        assert!(matches!(
            manager.validate(None).await.unwrap_err(),
            SessionError::NoSession
        ));
        assert!(matches!(
            manager.validate(Some("no-such-token")).await.unwrap_err(),
            SessionError::NoSession
        ));
    }

    #[tokio::test]
    async fn expired_session_is_rejected_and_removed() {
        let (manager, _, sessions) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();
        let session = manager
            .authenticate("ada@example.com", "hunter2")
            .await
            .unwrap();

        // Pretend the idle window passed with no validation in between.
        sessions.set_expires_at(&session.id, Utc::now() - Duration::seconds(1));

        let err = manager.validate(Some(&session.id)).await.unwrap_err();
        assert!(matches!(err, SessionError::SessionExpired));

        // The dead row was swept; a retry now reports no session at all.
        let err = manager.validate(Some(&session.id)).await.unwrap_err();
        assert!(matches!(err, SessionError::NoSession));
    }

    #[tokio::test]
    async fn validation_slides_the_expiry_window() {
        let (manager, _, sessions) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();
        let session = manager
            .authenticate("ada@example.com", "hunter2")
            .await
            .unwrap();

        // Nine minutes in: one minute left on the clock.
        sessions.set_expires_at(&session.id, Utc::now() + Duration::minutes(1));

        manager.validate(Some(&session.id)).await.unwrap();

        // The validation renewed the window to a full idle lifetime, so the
        // session now outlives its original deadline.
        let renewed = sessions.expires_at(&session.id).unwrap();
        assert!(renewed > Utc::now() + Duration::minutes(9));
    }

    #[tokio::test]
    async fn invalidate_is_idempotent() {
        let (manager, _, _) = manager();
        manager
            .register("Ada", "ada@example.com", "hunter2")
            .await
            .unwrap();
        let session = manager
            .authenticate("ada@example.com", "hunter2")
            .await
            .unwrap();

        manager.invalidate(&session.id).await.unwrap();
        manager.invalidate(&session.id).await.unwrap();

        assert!(matches!(
            manager.validate(Some(&session.id)).await.unwrap_err(),
            SessionError::NoSession
        ));
    }
}
