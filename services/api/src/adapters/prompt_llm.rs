//! services/api/src/adapters/prompt_llm.rs
//!
//! This module contains the adapter for the prompt-generating LLM.
//! It implements the `GenerationGateway` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use prompt_architect_core::ports::{GenerationGateway, PortError, PortResult};
use std::time::Duration;
use tokio::time::timeout;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `GenerationGateway` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiPromptAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiPromptAdapter {
    /// Creates a new `OpenAiPromptAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, request_timeout: Duration) -> Self {
        Self {
            client,
            model,
            request_timeout,
        }
    }
}

//=========================================================================================
// `GenerationGateway` Trait Implementation
//=========================================================================================

#[async_trait]
impl GenerationGateway for OpenAiPromptAdapter {
    /// Sends a single chat-completion request: the methodology document as
    /// the system message, the composed user text as the user message.
    /// Failures are not retried.
    async fn generate(&self, system_instruction: &str, user_text: &str) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_instruction)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_text)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // The engine has no timeout contract of its own; bound the call so a
        // hung provider cannot block the request forever.
        let response = timeout(self.request_timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                PortError::Unavailable(format!(
                    "Generation request timed out after {}s",
                    self.request_timeout.as_secs()
                ))
            })?
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Generation LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Generation LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}
