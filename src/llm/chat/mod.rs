pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;
use super::LlmConfig;
use self::openai::OpenAIChatClient;
use crate::error::CompletionError;
use crate::models::chat::ChatMessage;

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// A single, non-streaming chat completion call.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<CompletionResponse, CompletionError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, CompletionError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
