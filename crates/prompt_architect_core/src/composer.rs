//! crates/prompt_architect_core/src/composer.rs
//!
//! Deterministically assembles the generation-engine input from a user's
//! request and its optional structured parameters.

use std::sync::Arc;

use crate::domain::{ComposedPayload, GenerationRequest};

/// Builds `ComposedPayload`s around a fixed system instruction.
///
/// The system instruction is the long-form prompt-engineering methodology
/// document. It is loaded once at startup and attached verbatim to every
/// payload; its wording is data, not logic.
#[derive(Clone)]
pub struct Composer {
    system_instruction: Arc<str>,
}

/// Labels for the optional parameters, in the order they appear in the
/// composed text. Submission order never changes this.
fn optional_fields(req: &GenerationRequest) -> [(&'static str, Option<&str>); 7] {
    [
        ("Tone", req.tone.as_deref()),
        ("Context", req.context.as_deref()),
        ("Prompt Size", req.prompt_size.as_deref()),
        ("Negative Aspects", req.negative_aspects.as_deref()),
        ("Country/Language", req.country_language.as_deref()),
        ("Industry", req.industry.as_deref()),
        ("Output Format", req.output_format.as_deref()),
    ]
}

impl Composer {
    pub fn new(system_instruction: impl Into<Arc<str>>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
        }
    }

    /// Assembles the payload for one generation request.
    ///
    /// Pure and total: absent or empty optional fields are skipped, never
    /// treated as errors, and never produce an empty line.
    pub fn compose(&self, req: &GenerationRequest) -> ComposedPayload {
        let mut user_text = format!("User Request {}\n\n", req.user_request);

        let lines: Vec<String> = optional_fields(req)
            .into_iter()
            .filter_map(|(label, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{label}: {v}"))
            })
            .collect();

        if !lines.is_empty() {
            user_text.push_str("Optional Parameters By User\n");
            user_text.push_str(&lines.join("\n"));
        }

        ComposedPayload {
            system_instruction: self.system_instruction.clone(),
            user_text,
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================
