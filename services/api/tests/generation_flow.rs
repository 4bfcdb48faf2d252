//! services/api/tests/generation_flow.rs
//!
//! Exercises the login-then-generate flow end to end against in-memory
//! stores and a failing generation engine, without a database or network.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api_lib::web::generate::{GeneratePromptRequest, GeneratePromptResponse};
use prompt_architect_core::domain::{AuthSession, GenerationRequest, User};
use prompt_architect_core::ports::{
    CredentialStore, GenerationGateway, PasswordHasher, PortError, PortResult, SessionStore,
};
use prompt_architect_core::{Composer, SessionManager};

//=========================================================================================
// In-Memory Test Doubles
//=========================================================================================

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

struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> PortResult<String> {
        Ok(format!("hashed${plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash == format!("hashed${plaintext}")
    }
}

/// A generation engine that is always down, counting how often it is asked.
#[derive(Default)]
struct FailingGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl GenerationGateway for FailingGateway {
    async fn generate(&self, _system_instruction: &str, _user_text: &str) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PortError::Unavailable("quota exceeded".to_string()))
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[tokio::test]
async fn gateway_failure_leaves_session_and_credentials_untouched() {
    let credentials = Arc::new(InMemoryCredentials::default());
    let sessions = Arc::new(InMemorySessions::default());
    let manager = SessionManager::new(
        credentials.clone(),
        sessions.clone(),
        Arc::new(PlainHasher),
    );
    let gateway = Arc::new(FailingGateway::default());
    let composer = Composer::new("methodology");

    manager
        .register("Ada", "ada@example.com", "hunter2")
        .await
        .unwrap();
    let session = manager
        .authenticate("ada@example.com", "hunter2")
        .await
        .unwrap();

    let request = GenerationRequest {
        user_request: "Write a tweet".to_string(),
        tone: Some("formal".to_string()),
        ..Default::default()
    };
    let payload = composer.compose(&request);

    let err = gateway
        .generate(&payload.system_instruction, &payload.user_text)
        .await
        .unwrap_err();
    assert!(matches!(err, PortError::Unavailable(_)));

    // Exactly one attempt: the failure is reported, never retried.
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);

    // The failed generation mutated nothing: the session still validates
    // and the credential record is intact.
    let identity = manager.validate(Some(&session.id)).await.unwrap();
    assert_eq!(identity.email, "ada@example.com");
    let user = credentials
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Ada");
}

#[test]
fn request_body_uses_the_wire_field_names() {
    let body = serde_json::json!({
        "user_request": "Write a tweet",
        "user_tone": "formal",
        "country_lang": "UK English"
    });

    let parsed: GeneratePromptRequest = serde_json::from_value(body).unwrap();
    let request = GenerationRequest::from(parsed);

    assert_eq!(request.user_request, "Write a tweet");
    assert_eq!(request.tone.as_deref(), Some("formal"));
    assert_eq!(request.country_language.as_deref(), Some("UK English"));
    assert_eq!(request.context, None);
}

#[test]
fn response_body_carries_generated_output() {
    let response = GeneratePromptResponse {
        generated_output: "An engineered prompt".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["generated_output"], "An engineered prompt");
}
