use crate::config::RelayConfig;
use crate::error::{ CompletionError, RelayError };
use crate::history::{ history_window, initialize_history_store, HistoryStore };
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::llm::LlmConfig;
use crate::models::chat::{ ChatMessage, ChatRecord };

use log::{ error, info };
use std::sync::Arc;

/// Builds the prompt for one completion: the system instruction, the
/// retained history as alternating user/assistant turns, then `new_message`.
pub fn build_messages(
    system_instruction: &str,
    history: &[ChatRecord],
    new_message: &str
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system_instruction));
    for record in history {
        messages.push(ChatMessage::user(record.message.as_str()));
        messages.push(ChatMessage::assistant(record.response.as_str()));
    }
    messages.push(ChatMessage::user(new_message));
    messages
}

#[derive(Clone)]
pub struct RelayAgent {
    chat_client: Arc<dyn ChatClient>,
    history_store: Arc<dyn HistoryStore>,
    system_instruction: String,
    history_window: usize,
}

impl RelayAgent {
    pub async fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let llm_config = LlmConfig::from_relay(config);
        let chat_client = new_chat_client(&llm_config)?;
        info!(
            "Chat client configured: Model={}, BaseURL={}",
            chat_client.get_model(),
            chat_client.get_base_url()
        );
        let history_store = initialize_history_store(config).await?;

        Ok(Self::with_parts(chat_client, history_store, config))
    }

    pub fn with_parts(
        chat_client: Arc<dyn ChatClient>,
        history_store: Arc<dyn HistoryStore>,
        config: &RelayConfig
    ) -> Self {
        Self {
            chat_client,
            history_store,
            system_instruction: config.system_instruction.clone(),
            history_window: config.history_window,
        }
    }

    /// Answers `message` for `user_id` and records the exchange.
    ///
    /// Nothing is stored when the completion call fails.
    pub async fn process_message(&self, user_id: i64, message: &str) -> Result<String, RelayError> {
        let records = self.history_store.fetch_ordered(user_id).await?;
        let window = history_window(&records, self.history_window);
        let messages = build_messages(&self.system_instruction, window, message);
        info!(
            "User {}: sending {} history pairs ({} stored)",
            user_id,
            window.len(),
            records.len()
        );

        let answer = self.chat_client
            .complete(&messages).await
            .map_err(|e: CompletionError| {
                error!("LLM interaction error: {}", e);
                e
            })?
            .response;

        self.history_store.append(user_id, message, &answer).await?;

        Ok(answer)
    }

    pub async fn clear_history(&self, user_id: i64) -> Result<(), RelayError> {
        self.history_store.clear(user_id).await?;
        Ok(())
    }
}
