//! Language-model summarization into strict-JSON curated items.
//!
//! Sends extracted article text to an OpenAI-compatible chat-completions
//! endpoint in JSON-object response mode, then decodes the payload
//! strictly into an [`ItemDraft`] and validates it into an [`Item`].
//! A malformed or ill-shaped response is a per-candidate failure; the
//! orchestrator skips the candidate and moves on. No retries happen
//! here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{CandidateError, DigestError};
use crate::models::{Article, Item, ItemDraft};
use crate::utils::truncate_for_log;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Trait seam so the orchestrator can be tested without the model API.
pub trait SummarizeArticle {
    async fn summarize(&self, source_url: &str, article: &Article) -> Result<Item, CandidateError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Build the fixed-instruction prompt for one article.
///
/// The contract the model must honor: strict JSON with exactly the keys
/// `title`, `dek`, `bullets`, `take`; truthful, no fabrication, no
/// emojis; a pragmatic, wry tone for the take.
pub fn build_prompt(source_url: &str, title: &str, text: &str) -> String {
    format!(
        "Return STRICT JSON with exactly these keys: title, dek, bullets (array of 4 short \
         bullets), take (2-3 sentences). No other keys.\n\n\
         Tone for take: realistic/pragmatic, humorous, sometimes snarky/salty, always \
         truthful, no fabrication, no emojis.\n\n\
         SOURCE URL: {source_url}\n\n\
         ARTICLE TITLE: {title}\n\n\
         ARTICLE TEXT:\n{text}"
    )
}

/// Client for the summarization model.
pub struct Summarizer {
    client: Client,
    api_key: String,
    model: String,
}

impl Summarizer {
    pub fn new(config: &Config) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl SummarizeArticle for Summarizer {
    #[instrument(level = "info", skip(self, article), fields(model = %self.model))]
    async fn summarize(&self, source_url: &str, article: &Article) -> Result<Item, CandidateError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(source_url, &article.title, &article.text),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CandidateError::Summarization(format!(
                "model API returned {status}: {}",
                truncate_for_log(&body, 300)
            )));
        }

        let decoded: ChatResponse = response.json().await?;
        let content = decoded
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| CandidateError::Summarization("response had no choices".to_string()))?;

        let item = parse_item(content, source_url)?;
        info!(title = %item.title, "Summarized article");
        Ok(item)
    }
}

/// Decode and validate a model payload into an [`Item`].
pub fn parse_item(payload: &str, source_url: &str) -> Result<Item, CandidateError> {
    let draft: ItemDraft = serde_json::from_str(payload).map_err(|e| {
        warn!(
            error = %e,
            payload_preview = %truncate_for_log(payload, 300),
            "Model returned non-conforming JSON"
        );
        CandidateError::Summarization(format!("non-JSON payload: {e}"))
    })?;

    draft
        .into_item(source_url)
        .map_err(CandidateError::Summarization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_contract_keys() {
        let prompt = build_prompt("https://example.com", "Title", "Body");
        for key in ["title", "dek", "bullets", "take"] {
            assert!(prompt.contains(key));
        }
        assert!(prompt.contains("no emojis"));
        assert!(prompt.contains("STRICT JSON"));
        assert!(prompt.contains("https://example.com"));
    }

    #[test]
    fn test_parse_item_accepts_well_formed_payload() {
        let payload = r#"{
            "title": "Lab ships model",
            "dek": "Another week, another checkpoint",
            "bullets": ["one fact", "two fact", "three fact", "four fact"],
            "take": "It works. The benchmarks say so, anyway."
        }"#;
        let item = parse_item(payload, "https://example.com/a").unwrap();
        assert_eq!(item.bullets.len(), 4);
        assert_eq!(item.source_url, "https://example.com/a");
    }

    #[test]
    fn test_parse_item_rejects_malformed_json() {
        let err = parse_item("not json at all", "https://example.com").unwrap_err();
        assert!(matches!(err, CandidateError::Summarization(_)));
    }

    #[test]
    fn test_parse_item_rejects_truncated_json() {
        let err = parse_item(r#"{"title": "cut off"#, "https://example.com").unwrap_err();
        assert!(matches!(err, CandidateError::Summarization(_)));
    }

    #[test]
    fn test_parse_item_rejects_wrong_shape() {
        // bullets as a string instead of an array
        let payload = r#"{"title":"t","dek":"d","bullets":"oops","take":"t"}"#;
        assert!(parse_item(payload, "https://example.com").is_err());
    }

    #[test]
    fn test_parse_item_enforces_bullet_bounds() {
        let payload = r#"{"title":"t","dek":"d","bullets":["a","b"],"take":"t"}"#;
        let err = parse_item(payload, "https://example.com").unwrap_err();
        assert!(err.to_string().contains("3-5 bullets"));
    }

    #[test]
    fn test_chat_request_serializes_json_mode() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi".to_string(),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
    }

    #[test]
    fn test_chat_response_decodes_content() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"{}"}}]}"#;
        let decoded: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.choices[0].message.content, "{}");
    }
}
