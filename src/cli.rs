//! Command-line interface definitions.
//!
//! Every option can be supplied as a flag or an environment variable, so
//! the binary works equally well interactively and from a scheduler
//! (cron, CI). Credentials are env-only by convention but accept flags
//! for local testing.

use clap::Parser;

/// Command-line arguments for the digest pipeline.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Brave Search API subscription token
    #[arg(long, env = "BRAVE_API_KEY", hide_env_values = true)]
    pub brave_api_key: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Telegram bot token (requires --telegram-chat-id)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    /// Telegram chat id to send the digest to (requires --telegram-bot-token)
    // group chat ids are negative, so a leading hyphen must parse as a
    // value rather than a flag
    #[arg(long, env = "TELEGRAM_CHAT_ID", allow_hyphen_values = true)]
    pub telegram_chat_id: Option<String>,

    /// IANA timezone used to compute the post date
    #[arg(long, env = "SITE_TZ", default_value = "America/Chicago")]
    pub timezone: String,

    /// Search query sent to the provider
    #[arg(
        long,
        env = "SEARCH_QUERY",
        default_value = "AI news research launch model safety policy"
    )]
    pub query: String,

    /// Model identifier for summarization
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Output directory for post files
    #[arg(short, long, default_value = "src/posts")]
    pub posts_dir: String,

    /// Run the pipeline even if today's post already exists
    #[arg(long)]
    pub force_run: bool,

    /// Replace today's post file if it already exists (implies --force-run)
    #[arg(long)]
    pub force_overwrite: bool,

    /// Maximum number of admitted candidates sharing one host
    #[arg(long, default_value_t = 2)]
    pub max_per_host: usize,

    /// Number of candidates to collect for extraction (overshoot above
    /// the target so extraction failures don't starve the run)
    #[arg(long, default_value_t = 10)]
    pub candidate_limit: usize,

    /// Number of items to publish
    #[arg(long, default_value_t = 5)]
    pub target_items: usize,

    /// Minimum successful items below which the run aborts unpublished
    #[arg(long, default_value_t = 3)]
    pub min_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ai_news_digest"]);
        assert_eq!(cli.posts_dir, "src/posts");
        assert_eq!(cli.max_per_host, 2);
        assert_eq!(cli.candidate_limit, 10);
        assert_eq!(cli.target_items, 5);
        assert_eq!(cli.min_items, 3);
        assert!(!cli.force_run);
        assert!(!cli.force_overwrite);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "--query",
            "robotics funding",
            "--max-per-host",
            "1",
            "--force-overwrite",
            "-p",
            "/tmp/posts",
        ]);
        assert_eq!(cli.query, "robotics funding");
        assert_eq!(cli.max_per_host, 1);
        assert!(cli.force_overwrite);
        assert_eq!(cli.posts_dir, "/tmp/posts");
    }

    #[test]
    fn test_negative_chat_id_parses_space_separated() {
        let cli = Cli::parse_from([
            "ai_news_digest",
            "--telegram-bot-token",
            "123:abc",
            "--telegram-chat-id",
            "-100200300",
        ]);
        assert_eq!(cli.telegram_chat_id.as_deref(), Some("-100200300"));
    }
}
