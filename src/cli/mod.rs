use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Credentials ---
    /// Telegram bot token issued by BotFather.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Bearer credential for the chat completion API.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_credentials_from_flags() {
        let args = Args::try_parse_from([
            "chat-relay",
            "--bot-token",
            "123:abc",
            "--api-key",
            "sk-test",
        ]).unwrap();
        assert_eq!(args.bot_token, "123:abc");
        assert_eq!(args.api_key, "sk-test");
    }
}
