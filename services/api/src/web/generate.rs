//! services/api/src/web/generate.rs
//!
//! Contains the Axum handler for the prompt-generation endpoint and the
//! master definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use prompt_architect_core::domain::{GenerationRequest, Identity};
use prompt_architect_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        generate_prompt_handler,
    ),
    components(
        schemas(
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            crate::web::auth::NoticeResponse,
            GeneratePromptRequest,
            GeneratePromptResponse,
        )
    ),
    tags(
        (name = "Prompt Architect API", description = "API endpoints for turning natural-language requests into engineered prompts.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// The body of a generation request. Only `user_request` is required; the
/// optional fields arrive under their wire names and an empty string counts
/// as absent.
#[derive(Deserialize, ToSchema)]
pub struct GeneratePromptRequest {
    pub user_request: String,
    #[serde(default)]
    pub user_tone: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub prompt_size: Option<String>,
    #[serde(default)]
    pub negative_aspects: Option<String>,
    #[serde(default)]
    pub country_lang: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub output_format: Option<String>,
}

impl From<GeneratePromptRequest> for GenerationRequest {
    fn from(req: GeneratePromptRequest) -> Self {
        GenerationRequest {
            user_request: req.user_request,
            tone: req.user_tone,
            context: req.context,
            prompt_size: req.prompt_size,
            negative_aspects: req.negative_aspects,
            country_language: req.country_lang,
            industry: req.industry,
            output_format: req.output_format,
        }
    }
}

/// The response payload carrying the engineered prompt, verbatim from the
/// generation engine.
#[derive(Serialize, ToSchema)]
pub struct GeneratePromptResponse {
    pub generated_output: String,
}

//=========================================================================================
// Handler
//=========================================================================================

/// POST /generate - Turn a natural-language request into an engineered prompt.
///
/// Requires a valid session; the auth middleware resolves the identity
/// before this handler runs.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GeneratePromptRequest,
    responses(
        (status = 200, description = "Prompt generated", body = GeneratePromptResponse),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "Generation engine unavailable"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn generate_prompt_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<GeneratePromptRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    info!(user = %identity.email, "Generating prompt");

    let payload = state.composer.compose(&req.into());

    // Single shot: a failed generation is reported, never retried.
    let generated_output = state
        .gateway
        .generate(&payload.system_instruction, &payload.user_text)
        .await
        .map_err(|e| match e {
            PortError::Unavailable(reason) => {
                error!("Generation engine unavailable: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "The prompt generation service is currently unavailable. Please try again later."
                        .to_string(),
                )
            }
            e => {
                error!("Failed to generate prompt: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate prompt".to_string(),
                )
            }
        })?;

    Ok(Json(GeneratePromptResponse { generated_output }))
}
