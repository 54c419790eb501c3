//! Readable-text extraction from candidate URLs.
//!
//! Fetches a page (following redirects) and strips it down to article
//! text: paragraphs inside `<article>` or `<main>` when the page has
//! them, any `<p>` otherwise, with short boilerplate fragments dropped.
//! The result is truncated to a bounded length so a single sprawling
//! page can't blow the downstream token budget.

use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{CandidateError, DigestError};
use crate::models::Article;
use crate::utils::truncate_to_bytes;

/// Cap on extracted article text, in bytes.
pub const MAX_ARTICLE_BYTES: usize = 12_000;

/// Paragraph fragments shorter than this are almost always navigation,
/// bylines, or cookie banners.
const MIN_FRAGMENT_BYTES: usize = 60;

/// Minimum total text below which extraction is considered failed.
const MIN_ARTICLE_BYTES: usize = 200;

/// Trait seam so the orchestrator can be tested without the network.
pub trait ExtractArticle {
    async fn extract(&self, url: &str) -> Result<Article, CandidateError>;
}

/// HTTP-backed extractor.
pub struct Extractor {
    client: Client,
}

impl Extractor {
    pub fn new(_config: &Config) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ai_news_digest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ExtractArticle for Extractor {
    #[instrument(level = "info", skip(self))]
    async fn extract(&self, url: &str) -> Result<Article, CandidateError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CandidateError::Fetch {
                url: url.to_string(),
                status,
            });
        }
        let html = response.text().await?;
        readable_article(&html, url)
    }
}

/// Reduce an HTML document to title plus readable body text.
///
/// Pure so it can be tested against fixture markup.
pub fn readable_article(html: &str, url: &str) -> Result<Article, CandidateError> {
    let document = Html::parse_document(html);

    let article_p = Selector::parse("article p, main p").unwrap();
    let any_p = Selector::parse("p").unwrap();

    let mut paragraphs = collect_paragraphs(&document, &article_p);
    if paragraphs.is_empty() {
        paragraphs = collect_paragraphs(&document, &any_p);
    }

    let text = paragraphs.join("\n\n");
    if text.len() < MIN_ARTICLE_BYTES {
        return Err(CandidateError::Extraction {
            url: url.to_string(),
        });
    }

    let title = page_title(&document).unwrap_or_else(|| url.to_string());
    debug!(%url, title = %title, chars = text.len(), "Extracted article text");

    Ok(Article {
        title,
        text: truncate_to_bytes(&text, MAX_ARTICLE_BYTES).to_string(),
    })
}

fn collect_paragraphs(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|p| {
            p.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|t| t.len() >= MIN_FRAGMENT_BYTES)
        .collect()
}

fn page_title(document: &Html) -> Option<String> {
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    if let Some(meta) = document.select(&og_title).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    let title = Selector::parse("title").unwrap();
    document
        .select(&title)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
