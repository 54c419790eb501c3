//! Pipeline orchestrator: search → select → accumulate → done.
//!
//! The run is an explicit stage sequence. Search and selection failures
//! are fatal; extraction and summarization failures are scoped to one
//! candidate and recovered by skipping to the next. Candidates are
//! processed strictly in score order, one at a time, and accumulation
//! stops as soon as the target count is reached so no API budget is
//! spent on items that would never be published. A run that ends below
//! the minimum item count aborts instead of publishing a thin document.

use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{CandidateError, DigestError};
use crate::extract::ExtractArticle;
use crate::models::{Item, SearchHit};
use crate::rank::select_candidates;
use crate::search::SearchClient;
use crate::summarize::SummarizeArticle;

/// Trait seam over the search provider.
pub trait FetchHits {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DigestError>;
}

impl FetchHits for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DigestError> {
        SearchClient::search(self, query).await
    }
}

/// Drives candidates through the extract/summarize stages until enough
/// items accumulate.
pub struct Pipeline<'a, S, E, M> {
    config: &'a Config,
    searcher: S,
    extractor: E,
    summarizer: M,
}

impl<'a, S, E, M> Pipeline<'a, S, E, M>
where
    S: FetchHits,
    E: ExtractArticle,
    M: SummarizeArticle,
{
    pub fn new(config: &'a Config, searcher: S, extractor: E, summarizer: M) -> Self {
        Self {
            config,
            searcher,
            extractor,
            summarizer,
        }
    }

    /// Run the full stage sequence and return the accumulated items.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&self) -> Result<Vec<Item>, DigestError> {
        let hits = self.searcher.search(&self.config.query).await?;
        if hits.is_empty() {
            return Err(DigestError::NoResults);
        }
        info!(stage = "searched", hits = hits.len(), "Search complete");

        let candidates = select_candidates(
            &hits,
            self.config.max_per_host,
            self.config.candidate_limit,
        );
        if candidates.is_empty() {
            return Err(DigestError::SelectionExhausted);
        }
        info!(
            stage = "selected",
            candidates = candidates.len(),
            "Candidate selection complete"
        );

        let mut items: Vec<Item> = Vec::new();
        let mut skipped = 0usize;
        for hit in &candidates {
            if items.len() >= self.config.target_items {
                break;
            }
            match self.process_candidate(hit).await {
                Ok(item) => {
                    info!(
                        stage = "accumulating",
                        url = %hit.url,
                        title = %item.title,
                        accumulated = items.len() + 1,
                        target = self.config.target_items,
                        "Candidate succeeded"
                    );
                    items.push(item);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(
                        stage = "accumulating",
                        url = %hit.url,
                        error = %e,
                        "Candidate failed; skipping"
                    );
                }
            }
        }

        if items.len() < self.config.min_items {
            return Err(DigestError::QualityGate {
                got: items.len(),
                need: self.config.min_items,
            });
        }

        info!(
            stage = "done",
            items = items.len(),
            skipped,
            "Accumulation complete"
        );
        Ok(items)
    }

    async fn process_candidate(&self, hit: &SearchHit) -> Result<Item, CandidateError> {
        let article = self.extractor.extract(&hit.url).await?;
        self.summarizer.summarize(&hit.url, &article).await
    }
}
