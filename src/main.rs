//! # AI News Digest
//!
//! A daily content-curation pipeline: query a web-search API for recent
//! AI news, rank and deduplicate the hits, extract readable article
//! text, summarize each article into a structured snippet with a
//! language model, write the result as a static-site post, and push a
//! digest to a Telegram chat.
//!
//! ## Usage
//!
//! ```sh
//! BRAVE_API_KEY=... OPENAI_API_KEY=... ai_news_digest -p ./src/posts
//! ```
//!
//! ## Architecture
//!
//! One run walks an explicit stage sequence:
//! 1. **Search**: one keyed query against the search provider
//! 2. **Rank/Select**: heuristic scoring, dedup, per-host caps
//! 3. **Accumulate**: extract + summarize candidates in score order,
//!    skipping failures, until the target item count is reached
//! 4. **Publish**: write the dated markdown post with YAML front matter
//! 5. **Notify**: send the digest to the configured chat
//!
//! Running twice on the same date is a no-op: the post file's existence
//! is the idempotency key.

use chrono::Utc;
use clap::Parser;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod models;
mod notify;
mod outputs;
mod pipeline;
mod rank;
mod search;
mod summarize;
mod utils;

use cli::Cli;
use config::Config;
use error::DigestError;
use extract::Extractor;
use models::DigestDocument;
use notify::TelegramNotifier;
use pipeline::Pipeline;
use search::SearchClient;
use summarize::Summarizer;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), DigestError> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_news_digest starting up");

    let args = Cli::parse();
    let config = Config::from_cli(args)?;

    // Today's date key, computed in the configured timezone.
    let today = Utc::now().with_timezone(&config.timezone).date_naive().to_string();
    info!(date = %today, tz = %config.timezone, "Resolved date key");

    // --- Idempotency guard, before any network call ---
    if outputs::post::post_exists(&config.posts_dir, &today) && !config.force_run {
        info!(
            date = %today,
            path = %outputs::post::post_path(&config.posts_dir, &today).display(),
            "Post for today already exists; nothing to do"
        );
        return Ok(());
    }

    // Early check: the run must not fail at publish time after spending
    // the whole API budget.
    if let Err(e) = ensure_writable_dir(&config.posts_dir).await {
        error!(path = %config.posts_dir, error = %e, "Posts directory is not writable");
        return Err(e);
    }

    // --- Run the pipeline ---
    let searcher = SearchClient::new(&config)?;
    let extractor = Extractor::new(&config)?;
    let summarizer = Summarizer::new(&config)?;
    let pipeline = Pipeline::new(&config, searcher, extractor, summarizer);

    let items = pipeline.run().await?;
    let doc = DigestDocument {
        date: today,
        items,
    };

    // --- Publish ---
    let path = outputs::post::write_post(&doc, &config.posts_dir, config.force_overwrite).await?;
    info!(path = %path.display(), "Post published");

    // --- Notify ---
    if let Some(notifier_config) = &config.notifier {
        let notifier = TelegramNotifier::new(notifier_config)?;
        notifier.send(&doc).await?;
    } else {
        info!("No notifier configured; skipping digest send");
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        items = doc.items.len(),
        date = %doc.date,
        "Execution complete"
    );

    Ok(())
}
