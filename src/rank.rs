//! Heuristic scoring and diversity-aware selection of search hits.
//!
//! This is the editorial core of the pipeline. [`score_hit`] assigns each
//! hit an additive relevance score from its URL and recency; stable
//! sorting preserves provider order among ties. [`select_candidates`]
//! walks the sorted hits, deduplicates exact URLs, and caps how many
//! candidates any one host may contribute, so the published set never
//! collapses onto a single source.
//!
//! Scoring is a pure function of the hit. Same hit, same score, every
//! run.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};
use url::Url;

use crate::models::SearchHit;

/// Hosts that get a flat relevance boost: the major AI labs, primary
/// tech press, aggregator/community sites, and a little general press
/// for variety.
const TRUSTED_SOURCES: &[&str] = &[
    // labs
    "openai.com",
    "anthropic.com",
    "deepmind.google",
    "ai.meta.com",
    "mistral.ai",
    "huggingface.co",
    // papers & code
    "arxiv.org",
    "github.com",
    // tech press
    "techcrunch.com",
    "theverge.com",
    "arstechnica.com",
    "theinformation.com",
    "semianalysis.com",
    "stratechery.com",
    "simonwillison.net",
    // aggregators / community
    "news.ycombinator.com",
    "lobste.rs",
    // general press, for variety
    "reuters.com",
    "bloomberg.com",
    "ft.com",
];

/// Topical keywords worth a boost when they appear in the URL path or
/// query. `acquir` deliberately catches acquire/acquired/acquisition.
static TOPIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)agents?|bot|tool|startup|funding|seed|series|acquir|merger|m&a|launch|release|copilot|vibe",
    )
    .unwrap()
});

/// Recency marker in the provider's human-readable `age` field.
static RECENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)minute|hour").unwrap());

/// Parse and normalize a URL's host: lowercased, leading `www.` stripped.
///
/// Returns `None` for empty or unparseable URLs, which the selector
/// treats as unusable hits.
pub fn normalized_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

fn host_matches(host: &str, entry: &str) -> bool {
    host == entry || host.ends_with(&format!(".{entry}"))
}

/// Score one search hit. Pure and deterministic; additive, unclamped.
pub fn score_hit(hit: &SearchHit) -> f64 {
    let mut score = 0.0;
    let url_lower = hit.url.to_lowercase();

    if let Ok(parsed) = Url::parse(&hit.url) {
        if let Some(host) = parsed.host_str() {
            let host = host.to_lowercase();
            let host = host.strip_prefix("www.").unwrap_or(&host);

            if TRUSTED_SOURCES.iter().any(|s| host_matches(host, s)) {
                score += 3.0;
            }
            if host_matches(host, "twitter.com") || host_matches(host, "x.com") {
                score -= 2.0;
            }
            if host_matches(host, "youtube.com") || host_matches(host, "tiktok.com") {
                score -= 1.0;
            }
        }

        let mut path_and_query = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }
        if TOPIC_PATTERN.is_match(&path_and_query) {
            score += 2.0;
        }
    }

    if let Some(age) = &hit.age {
        if RECENT_PATTERN.is_match(age) {
            score += 1.0;
        }
    }

    // Tracking params and AMP mirrors tend to be syndicated junk.
    if url_lower.contains("utm_") || url_lower.contains("amp") {
        score -= 0.5;
    }

    score
}

/// Select an ordered candidate list from raw hits.
///
/// Sorts by descending score (stable, so equal scores keep provider
/// order), then admits hits in order subject to: a parseable non-empty
/// URL, no exact-URL repeats, and at most `max_per_host` hits per
/// normalized host. Stops once `limit` candidates are collected.
#[instrument(level = "debug", skip(hits), fields(hits = hits.len()))]
pub fn select_candidates(hits: &[SearchHit], max_per_host: usize, limit: usize) -> Vec<SearchHit> {
    let mut scored: Vec<(&SearchHit, f64)> = hits.iter().map(|h| (h, score_hit(h))).collect();
    // sort_by is stable; ties keep original provider order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<SearchHit> = Vec::new();
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut per_host: HashMap<String, usize> = HashMap::new();

    for (hit, score) in scored {
        if selected.len() >= limit {
            break;
        }
        let Some(host) = normalized_host(&hit.url) else {
            debug!(url = %hit.url, "Skipping hit with unusable URL");
            continue;
        };
        if !seen_urls.insert(hit.url.as_str()) {
            continue;
        }
        let count = per_host.entry(host.clone()).or_insert(0);
        if *count >= max_per_host {
            debug!(%host, url = %hit.url, "Host cap reached; skipping");
            continue;
        }
        *count += 1;
        debug!(%host, score, url = %hit.url, "Admitted candidate");
        selected.push(hit.clone());
    }

    selected
}
