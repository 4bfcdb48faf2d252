//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use prompt_architect_core::composer::Composer;
use prompt_architect_core::ports::GenerationGateway;
use prompt_architect_core::SessionManager;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub composer: Composer,
    pub gateway: Arc<dyn GenerationGateway>,
    pub config: Arc<Config>,
}
