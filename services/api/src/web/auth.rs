//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use prompt_architect_core::auth::{AuthError, SignupError};

use crate::web::middleware::{session_token, SESSION_COOKIE};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub email: String,
}

/// A user-visible notice, the JSON stand-in for a flash message.
#[derive(Serialize, ToSchema)]
pub struct NoticeResponse {
    pub message: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /signup - Create a new user account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = NoticeResponse),
        (status = 400, description = "Missing fields or mismatched confirmation"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Reject incomplete forms before touching any state.
    if req.name.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "All fields are required.".to_string(),
        ));
    }

    if req.password != req.confirm_password {
        return Err((
            StatusCode::BAD_REQUEST,
            "Passwords do not match. Please try again.".to_string(),
        ));
    }

    // 2. Create the user; the store enforces email uniqueness atomically.
    state
        .sessions
        .register(&req.name, &req.email, &req.password)
        .await
        .map_err(|e| match e {
            SignupError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "A user with that email already exists. Please log in.".to_string(),
            ),
            SignupError::Store(e) => {
                error!("Failed to create user: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create user".to_string(),
                )
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(NoticeResponse {
            message: "Account created successfully! Please log in.".to_string(),
        }),
    ))
}

/// POST /login - Login with existing account
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Verify the credentials and issue a session. Unknown email and
    //    wrong password surface as the same notice.
    let session = state
        .sessions
        .authenticate(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password. Please try again.".to_string(),
            ),
            AuthError::Store(e) => {
                error!("Failed to authenticate: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Authentication error".to_string(),
                )
            }
        })?;

    // 2. Hand the token to the client. No Max-Age: the server-side expiry
    //    slides with activity, so the cookie lives as long as the browser
    //    session and validation decides the rest.
    let cookie = format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/",
        SESSION_COOKIE, session.id
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            email: session.email,
        }),
    ))
}

/// GET /logout - Logout and invalidate the session
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Logout successful", body = NoticeResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Invalidation is idempotent; logging out without a session is fine.
    if let Some(token) = session_token(&headers) {
        state.sessions.invalidate(token).await.map_err(|e| {
            error!("Failed to delete session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to logout".to_string(),
            )
        })?;
    }

    let cookie = format!(
        "{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(NoticeResponse {
            message: "You have been logged out.".to_string(),
        }),
    ))
}
