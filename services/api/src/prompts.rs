//! services/api/src/prompts.rs
//!
//! Loads the system instruction (the "meta-prompt") at startup.
//!
//! The document is configuration data, not logic: a copy ships with the
//! binary, and an operator can override it by placing `meta_prompt.txt`
//! under `PROMPTS_PATH`.

use std::io;
use std::path::Path;
use tracing::info;

/// The compiled-in copy of the prompt-engineering methodology document.
const DEFAULT_META_PROMPT: &str = include_str!("../prompts/meta_prompt.txt");

/// Returns the meta-prompt text, preferring `{prompts_path}/meta_prompt.txt`
/// and falling back to the compiled-in copy when the file is absent.
pub fn load_meta_prompt(prompts_path: &Path) -> io::Result<String> {
    let file = prompts_path.join("meta_prompt.txt");
    match std::fs::read_to_string(&file) {
        Ok(text) => {
            info!("Loaded meta-prompt from {}", file.display());
            Ok(text)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No meta-prompt override found, using the built-in copy");
            Ok(DEFAULT_META_PROMPT.to_string())
        }
        Err(e) => Err(e),
    }
}
