pub mod agent;
pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;

use agent::RelayAgent;
use cli::Args;
use config::{ mask_secret, RelayConfig };
use error::RelayError;
use log::info;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), RelayError> {
    let config = Arc::new(RelayConfig::from_args(&args));

    info!("--- Core Configuration ---");
    info!("Bot Token: {}", mask_secret(&config.bot_token));
    info!("API Key: {}", mask_secret(&config.api_key));
    info!("Completion Base URL: {}", config.base_url);
    info!("Model: {}", config.model);
    info!("Max Tokens: {}", config.max_tokens);
    info!("History Window: {} pairs", config.history_window);
    info!("Database: {}", config.database_path.display());
    info!("Downloads Dir: {}", config.downloads_dir.display());
    info!("-------------------------");

    let agent = Arc::new(RelayAgent::new(&config).await?);
    info!("Starting Telegram bot");
    bot::run_bot(config, agent).await?;

    Ok(())
}
