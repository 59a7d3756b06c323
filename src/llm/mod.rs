pub mod chat;

use crate::config::RelayConfig;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub completion_model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl LlmConfig {
    pub fn from_relay(config: &RelayConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            completion_model: config.model.clone(),
            base_url: config.base_url.clone(),
            max_tokens: config.max_tokens,
        }
    }
}
