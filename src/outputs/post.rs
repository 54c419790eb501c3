//! Markdown post writer with YAML front matter.
//!
//! One file per date: `{posts_dir}/{YYYY-MM-DD}.md`. The front-matter
//! block carries the structured item list for the site renderer; the
//! body repeats it as readable markdown. The file's existence is the
//! pipeline's idempotency key, so the writer refuses to replace an
//! existing post unless explicitly told to.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

use crate::error::DigestError;
use crate::models::{DigestDocument, PostFrontMatter};

/// Path of the post file for a given date key.
pub fn post_path(posts_dir: &str, date: &str) -> PathBuf {
    Path::new(posts_dir).join(format!("{date}.md"))
}

/// Whether a post already exists for the date key.
pub fn post_exists(posts_dir: &str, date: &str) -> bool {
    post_path(posts_dir, date).exists()
}

/// Render the complete post file contents.
pub fn render_post(doc: &DigestDocument) -> Result<String, DigestError> {
    let front_matter = PostFrontMatter {
        layout: "post.njk".to_string(),
        title: format!("AI news digest for {}", doc.date),
        dek: format!("{} curated stories from today's AI news", doc.items.len()),
        date: doc.date.clone(),
        items: doc.items.clone(),
    };
    let yaml = serde_yaml::to_string(&front_matter)?;

    let mut body = String::new();
    for item in &doc.items {
        body.push_str(&format!("## {}\n\n*{}*\n\n", item.title, item.dek));
        for bullet in &item.bullets {
            body.push_str(&format!("- {bullet}\n"));
        }
        body.push_str(&format!("\n{}\n\n[Source]({})\n\n", item.take, item.source_url));
    }

    Ok(format!("---\n{yaml}---\n\n{body}"))
}

/// Write the post file for the document's date.
///
/// Creates the posts directory if needed. An existing file is an error
/// unless `overwrite` is set.
#[instrument(level = "info", skip(doc), fields(date = %doc.date))]
pub async fn write_post(
    doc: &DigestDocument,
    posts_dir: &str,
    overwrite: bool,
) -> Result<PathBuf, DigestError> {
    let path = post_path(posts_dir, &doc.date);
    if path.exists() && !overwrite {
        return Err(DigestError::PostExists(path.display().to_string()));
    }

    fs::create_dir_all(posts_dir).await?;
    let content = render_post(doc)?;
    fs::write(&path, content).await?;
    info!(path = %path.display(), items = doc.items.len(), "Wrote post");
    Ok(path)
}

/// Parse the front-matter block back out of a post file's contents.
pub fn read_front_matter(content: &str) -> Result<PostFrontMatter, DigestError> {
    let rest = content
        .strip_prefix("---\n")
        .ok_or_else(|| DigestError::MalformedPost("missing opening front-matter fence".to_string()))?;
    let end = rest
        .find("\n---")
        .ok_or_else(|| DigestError::MalformedPost("missing closing front-matter fence".to_string()))?;
    Ok(serde_yaml::from_str(&rest[..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn sample_doc() -> DigestDocument {
        DigestDocument {
            date: "2026-08-29".to_string(),
            items: (0..3)
                .map(|n| Item {
                    title: format!("Story {n}"),
                    dek: format!("Dek {n}"),
                    bullets: vec![
                        "first point".to_string(),
                        "second point".to_string(),
                        "third point".to_string(),
                    ],
                    take: "A dry take.".to_string(),
                    source_url: format!("https://example.com/{n}"),
                })
                .collect(),
        }
    }

    fn temp_posts_dir(case: &str) -> String {
        let dir = std::env::temp_dir().join(format!(
            "ai_news_digest_test_{}_{case}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_str().unwrap().to_string()
    }

    #[test]
    fn test_post_path_is_date_keyed() {
        let path = post_path("src/posts", "2026-08-29");
        assert_eq!(path, Path::new("src/posts/2026-08-29.md"));
    }

    #[test]
    fn test_rendered_post_round_trips() {
        let content = render_post(&sample_doc()).unwrap();
        let fm = read_front_matter(&content).unwrap();
        assert_eq!(fm.date, "2026-08-29");
        assert_eq!(fm.items.len(), 3);
        for item in &fm.items {
            assert!(!item.title.is_empty());
            assert!(!item.dek.is_empty());
            assert!(!item.take.is_empty());
            assert!((3..=5).contains(&item.bullets.len()));
        }
    }

    #[test]
    fn test_rendered_body_lists_items() {
        let content = render_post(&sample_doc()).unwrap();
        assert!(content.contains("## Story 0"));
        assert!(content.contains("- first point"));
        assert!(content.contains("[Source](https://example.com/2)"));
    }

    #[test]
    fn test_read_front_matter_rejects_fenceless_file() {
        assert!(matches!(
            read_front_matter("# just markdown"),
            Err(DigestError::MalformedPost(_))
        ));
        assert!(matches!(
            read_front_matter("---\nlayout: post.njk\nno closing fence"),
            Err(DigestError::MalformedPost(_))
        ));
    }

    #[tokio::test]
    async fn test_write_post_creates_file_and_guards_overwrite() {
        let dir = temp_posts_dir("overwrite");
        let doc = sample_doc();

        let path = write_post(&doc, &dir, false).await.unwrap();
        assert!(path.exists());
        assert!(post_exists(&dir, &doc.date));

        let err = write_post(&doc, &dir, false).await.unwrap_err();
        assert!(matches!(err, DigestError::PostExists(_)));

        // forced overwrite succeeds
        write_post(&doc, &dir, true).await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_written_file_parses_back() {
        let dir = temp_posts_dir("roundtrip");
        let doc = sample_doc();
        let path = write_post(&doc, &dir, false).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let fm = read_front_matter(&content).unwrap();
        assert_eq!(fm.items.len(), doc.items.len());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
