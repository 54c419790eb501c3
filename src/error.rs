//! Error taxonomy for the digest pipeline.
//!
//! Errors split into two tiers:
//! - [`DigestError`]: fatal; aborts the run and surfaces to `main` with a
//!   non-zero exit.
//! - [`CandidateError`]: scoped to a single candidate during the
//!   extract/summarize stage; the orchestrator logs it and moves on to the
//!   next candidate.

use reqwest::StatusCode;
use thiserror::Error;

/// Fatal pipeline errors. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum DigestError {
    /// A required credential or setting is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Exactly one of the two messaging credentials was set. Partial
    /// notifier configuration is always a mistake, never a feature.
    #[error(
        "misconfigured notifier: set both TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID, or neither"
    )]
    MisconfiguredNotifier,

    /// The search provider responded with a non-success status.
    #[error("search request failed with status {status}: {body}")]
    Search { status: StatusCode, body: String },

    /// The search provider returned zero hits.
    #[error("search returned no results")]
    NoResults,

    /// Scoring and deduplication left no viable candidates.
    #[error("no viable candidates after scoring and deduplication")]
    SelectionExhausted,

    /// Too few candidates survived extraction and summarization to
    /// publish a document worth reading.
    #[error("quality gate failed: only {got} item(s) succeeded, need at least {need}")]
    QualityGate { got: usize, need: usize },

    /// The digest message could not be delivered.
    #[error("digest notification failed: {0}")]
    Notify(String),

    /// The publisher refused to replace an existing post.
    #[error("post already exists at {0} (use --force-overwrite to replace it)")]
    PostExists(String),

    /// A previously written post file could not be parsed back.
    #[error("malformed post file: {0}")]
    MalformedPost(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("failed to serialize front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

/// Errors scoped to a single candidate. Recovered by skipping to the
/// next candidate, never fatal on their own.
#[derive(Debug, Error)]
pub enum CandidateError {
    /// The article URL answered with a non-success status.
    #[error("fetch of {url} failed with status {status}")]
    Fetch { url: String, status: StatusCode },

    /// The page parsed, but no meaningful article text was recovered.
    #[error("no readable text extracted from {url}")]
    Extraction { url: String },

    /// The language model returned a payload that does not decode into
    /// a well-formed item.
    #[error("summarization failed: {0}")]
    Summarization(String),

    /// Transport-level failure while talking to the article host or the
    /// model API.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
