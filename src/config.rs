//! Runtime configuration, built once from the CLI and passed by
//! reference into every component constructor.
//!
//! No module reads ambient environment state on its own; everything the
//! run needs is validated here, up front, so a missing credential fails
//! before any network call.

use chrono_tz::Tz;

use crate::cli::Cli;
use crate::error::DigestError;

/// Paired messaging credentials. Only constructed when both halves are
/// present.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Validated runtime configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    pub brave_api_key: String,
    pub openai_api_key: String,
    pub notifier: Option<NotifierConfig>,
    pub timezone: Tz,
    pub query: String,
    pub model: String,
    pub posts_dir: String,
    pub force_run: bool,
    pub force_overwrite: bool,
    pub max_per_host: usize,
    pub candidate_limit: usize,
    pub target_items: usize,
    pub min_items: usize,
}

impl Config {
    /// Validate CLI arguments into a usable configuration.
    ///
    /// Fails on a missing required credential, an unknown timezone name,
    /// a half-configured notifier, or tunables that cannot produce a
    /// publishable run (target below minimum, zero limits).
    pub fn from_cli(cli: Cli) -> Result<Self, DigestError> {
        let brave_api_key = cli
            .brave_api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DigestError::Config("BRAVE_API_KEY is not set".to_string()))?;
        let openai_api_key = cli
            .openai_api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DigestError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let notifier = match (cli.telegram_bot_token, cli.telegram_chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(NotifierConfig { bot_token, chat_id }),
            (None, None) => None,
            _ => return Err(DigestError::MisconfiguredNotifier),
        };

        let timezone: Tz = cli
            .timezone
            .parse()
            .map_err(|_| DigestError::Config(format!("unknown timezone: {}", cli.timezone)))?;

        if cli.target_items == 0 || cli.candidate_limit == 0 || cli.max_per_host == 0 {
            return Err(DigestError::Config(
                "target-items, candidate-limit, and max-per-host must be positive".to_string(),
            ));
        }
        if cli.min_items > cli.target_items {
            return Err(DigestError::Config(format!(
                "min-items ({}) cannot exceed target-items ({})",
                cli.min_items, cli.target_items
            )));
        }

        Ok(Self {
            brave_api_key,
            openai_api_key,
            notifier,
            timezone,
            query: cli.query,
            model: cli.model,
            posts_dir: cli.posts_dir,
            force_run: cli.force_run || cli.force_overwrite,
            force_overwrite: cli.force_overwrite,
            max_per_host: cli.max_per_host,
            candidate_limit: cli.candidate_limit,
            target_items: cli.target_items,
            min_items: cli.min_items,
        })
    }
}
