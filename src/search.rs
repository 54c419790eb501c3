//! Brave web-search client.
//!
//! Issues a single keyed GET against the Brave Search API and decodes
//! the `web.results` array into [`SearchHit`]s. Errors carry the status
//! code and the response body so provider failures are diagnosable from
//! the log alone. No retry here; whether a failed search is worth
//! retrying is the caller's call.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::DigestError;
use crate::models::SearchHit;
use crate::utils::truncate_for_log;

const SEARCH_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Debug, Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Keyed client for the web-search provider.
pub struct SearchClient {
    client: Client,
    api_key: String,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            api_key: config.brave_api_key.clone(),
        })
    }

    /// Run one search query and return the raw hit list.
    ///
    /// Asks for US-market English results from the past day, with a
    /// result count sized well above the candidate limit so scoring has
    /// something to chew on.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DigestError> {
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("q", query),
                ("country", "US"),
                ("search_lang", "en"),
                ("freshness", "pd"),
                ("count", "20"),
            ])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DigestError::Search { status, body });
        }

        let decoded: SearchResponse = response.json().await?;
        let hits = decoded.web.map(|w| w.results).unwrap_or_default();
        info!(count = hits.len(), "Search returned hits");
        for hit in &hits {
            debug!(
                title = %hit.title,
                url = %hit.url,
                age = ?hit.age,
                description = %truncate_for_log(&hit.description, 120),
                "Search hit"
            );
        }
        Ok(hits)
    }
}
