pub mod auth;
pub mod generate;
pub mod middleware;
pub mod state;

// Re-export the handlers and guard to make them easily accessible
// to the binary that will build the web server router.
pub use generate::{generate_prompt_handler, ApiDoc};
pub use middleware::require_auth;
