//! Data models for search hits, extracted articles, and curated items.
//!
//! Everything here lives for a single pipeline run:
//! - [`SearchHit`]: one raw result from the search provider
//! - [`Article`]: readable text extracted from a candidate URL
//! - [`ItemDraft`]: the raw JSON payload returned by the language model
//! - [`Item`]: a validated, publishable curated unit
//! - [`DigestDocument`]: the finished item set for one date
//!
//! [`ItemDraft`] is deliberately separate from [`Item`]: the model's output
//! is decoded first, then validated into the typed shape. Anything that
//! fails validation is rejected before it can reach the publisher.

use serde::{Deserialize, Serialize};

/// A raw result from the web-search provider.
///
/// Mirrors one element of the provider's `web.results` array. `age` is a
/// human-readable recency string like `"2 hours ago"` and is not always
/// present.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age: Option<String>,
}

/// Readable article text extracted from a candidate URL.
#[derive(Debug, Clone)]
pub struct Article {
    /// Best-effort title: og:title, then `<title>`, then the URL itself.
    pub title: String,
    /// Boilerplate-free body text, truncated to a bounded length.
    pub text: String,
}

/// The raw JSON object the language model is instructed to return.
///
/// Field names match the prompt contract exactly; unknown keys are
/// rejected so a drifting model response fails loudly instead of being
/// silently accepted.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemDraft {
    pub title: String,
    pub dek: String,
    pub bullets: Vec<String>,
    pub take: String,
}

/// A finished curated item, validated and ready for publication.
///
/// Invariants, enforced by [`ItemDraft::into_item`]:
/// - `title`, `dek`, and `take` are non-empty after trimming
/// - `bullets` holds 3 to 5 non-empty entries, order preserved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub dek: String,
    pub bullets: Vec<String>,
    pub take: String,
    pub source_url: String,
}

impl ItemDraft {
    /// Validate this draft into a publishable [`Item`].
    ///
    /// Returns a human-readable rejection reason on failure; the caller
    /// wraps it into a summarization error.
    pub fn into_item(self, source_url: &str) -> Result<Item, String> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err("empty title".to_string());
        }
        let dek = self.dek.trim().to_string();
        if dek.is_empty() {
            return Err("empty dek".to_string());
        }
        let take = self.take.trim().to_string();
        if take.is_empty() {
            return Err("empty take".to_string());
        }

        let bullets: Vec<String> = self
            .bullets
            .iter()
            .map(|b| b.trim().to_string())
            .collect();
        if bullets.iter().any(|b| b.is_empty()) {
            return Err("blank bullet".to_string());
        }
        if !(3..=5).contains(&bullets.len()) {
            return Err(format!("expected 3-5 bullets, got {}", bullets.len()));
        }

        Ok(Item {
            title,
            dek,
            bullets,
            take,
            source_url: source_url.to_string(),
        })
    }
}

/// The finished item set for one run, keyed by its publication date.
///
/// The date key doubles as the idempotency key: a post file named after
/// it already existing means the day's digest was published.
#[derive(Debug)]
pub struct DigestDocument {
    /// ISO date in the configured timezone, e.g. `2026-08-29`.
    pub date: String,
    pub items: Vec<Item>,
}

/// YAML front-matter block written at the top of each post file.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostFrontMatter {
    pub layout: String,
    pub title: String,
    pub dek: String,
    pub date: String,
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(bullets: &[&str]) -> ItemDraft {
        ItemDraft {
            title: "Model launch".to_string(),
            dek: "A new model shipped".to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
            take: "Fine. Another one.".to_string(),
        }
    }

    #[test]
    fn test_draft_validates_into_item() {
        let item = draft(&["a", "b", "c", "d"])
            .into_item("https://example.com/post")
            .unwrap();
        assert_eq!(item.bullets.len(), 4);
        assert_eq!(item.source_url, "https://example.com/post");
    }

    #[test]
    fn test_draft_rejects_too_few_bullets() {
        let err = draft(&["a", "b"]).into_item("https://example.com").unwrap_err();
        assert!(err.contains("3-5 bullets"));
    }

    #[test]
    fn test_draft_rejects_too_many_bullets() {
        let err = draft(&["a", "b", "c", "d", "e", "f"])
            .into_item("https://example.com")
            .unwrap_err();
        assert!(err.contains("3-5 bullets"));
    }

    #[test]
    fn test_draft_rejects_blank_fields() {
        let mut d = draft(&["a", "b", "c"]);
        d.title = "   ".to_string();
        assert_eq!(d.into_item("https://example.com").unwrap_err(), "empty title");

        let mut d = draft(&["a", "b", "c"]);
        d.take = String::new();
        assert_eq!(d.into_item("https://example.com").unwrap_err(), "empty take");

        let err = draft(&["a", " ", "c"]).into_item("https://example.com").unwrap_err();
        assert_eq!(err, "blank bullet");
    }

    #[test]
    fn test_draft_trims_whitespace() {
        let mut d = draft(&[" one ", "two", "three"]);
        d.title = "  Spaced out  ".to_string();
        let item = d.into_item("https://example.com").unwrap();
        assert_eq!(item.title, "Spaced out");
        assert_eq!(item.bullets[0], "one");
    }

    #[test]
    fn test_draft_rejects_unknown_keys() {
        let json = r#"{"title":"t","dek":"d","bullets":["a","b","c"],"take":"t","extra":1}"#;
        assert!(serde_json::from_str::<ItemDraft>(json).is_err());
    }

    #[test]
    fn test_search_hit_tolerates_missing_age() {
        let json = r#"{"title":"t","url":"https://example.com","description":"d"}"#;
        let hit: SearchHit = serde_json::from_str(json).unwrap();
        assert!(hit.age.is_none());
    }

    #[test]
    fn test_front_matter_round_trip() {
        let fm = PostFrontMatter {
            layout: "post.njk".to_string(),
            title: "AI news".to_string(),
            dek: "Five stories".to_string(),
            date: "2026-08-29".to_string(),
            items: vec![Item {
                title: "t".to_string(),
                dek: "d".to_string(),
                bullets: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                take: "take".to_string(),
                source_url: "https://example.com".to_string(),
            }],
        };
        let yaml = serde_yaml::to_string(&fm).unwrap();
        let back: PostFrontMatter = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.items.len(), 1);
        assert_eq!(back.date, "2026-08-29");
    }
}
