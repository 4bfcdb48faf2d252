//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use prompt_architect_core::auth::SessionError;
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Pulls the session token out of the request's `Cookie` header, if any.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
}

/// Middleware that validates the session cookie and resolves the identity.
///
/// If valid, inserts the `Identity` into request extensions for handlers to
/// use and renews the session's idle window as a side effect of validation.
/// If invalid or missing, short-circuits with 401 and a notice the client
/// can show on its login page; the wrapped handler never runs.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let token = session_token(req.headers());

    let identity = state.sessions.validate(token).await.map_err(|e| {
        if let SessionError::Store(e) = &e {
            error!("Failed to validate session: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication error".to_string(),
            );
        }
        (
            StatusCode::UNAUTHORIZED,
            "Please log in to access this page.".to_string(),
        )
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
