pub mod prompt;

use crate::cli::Args;
use std::path::PathBuf;

pub const BASE_URL: &str = "https://api.novita.ai/v3/openai";
pub const MODEL: &str = "deepseek/deepseek-r1-turbo";
pub const MAX_TOKENS: u32 = 1500;
pub const DATABASE_PATH: &str = "bot_data.db";
pub const HISTORY_FOR_PROMPT_LEN: usize = 10;
pub const MAX_MESSAGE_LENGTH: usize = 4096;
pub const LONG_RESPONSE_LIMIT: usize = 3500;
pub const DOWNLOADS_DIR: &str = "downloads";
pub const SOURCE_EXTENSIONS: [&str; 5] = [".py", ".js", ".java", ".c", ".cpp"];

/// Everything the relay needs at runtime. Built once in `run` and shared
/// read-only between the agent and the bot handlers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bot_token: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub system_instruction: String,
    pub history_window: usize,
    pub database_path: PathBuf,
    pub max_message_length: usize,
    pub long_response_limit: usize,
    pub downloads_dir: PathBuf,
    pub output_dir: PathBuf,
    pub source_extensions: Vec<String>,
}

impl RelayConfig {
    pub fn new(bot_token: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            system_instruction: prompt::SYSTEM_INSTRUCTION.to_string(),
            history_window: HISTORY_FOR_PROMPT_LEN,
            database_path: PathBuf::from(DATABASE_PATH),
            max_message_length: MAX_MESSAGE_LENGTH,
            long_response_limit: LONG_RESPONSE_LIMIT,
            downloads_dir: PathBuf::from(DOWNLOADS_DIR),
            output_dir: PathBuf::from("."),
            source_extensions: SOURCE_EXTENSIONS.iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(args.bot_token.clone(), args.api_key.clone())
    }
}

/// Keeps the first few characters of a secret for log output.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}
