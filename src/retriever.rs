//! Query-time ranking over the loaded corpus.
//!
//! Each retrieval suspends exactly once, at the embedding-provider call;
//! everything after that is synchronous and pure over the immutable corpus.
//! Concurrent calls share the corpus by `Arc` and never observe each other.

use std::sync::Arc;

use ndarray::Array1;
use tracing::instrument;

use crate::corpus::Corpus;
use crate::embeddings::EmbeddingProvider;
use crate::types::RetrieveError;

/// Result-shaping knobs. Corpus-specific tuning, not invariants.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Hard cap on returned snippet length, in characters (not bytes).
    pub snippet_chars: usize,
    /// Stand-in for NaN distances. Cosine distance is bounded by 2, so any
    /// value above that pushes zero-norm entries behind every valid match.
    pub invalid_distance: f32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            snippet_chars: 200,
            invalid_distance: 10.0,
        }
    }
}

/// Ranks corpus articles against a query and returns the top-k snippets,
/// oldest first.
pub struct NewsRetriever {
    corpus: Arc<Corpus>,
    provider: Arc<dyn EmbeddingProvider>,
    config: RetrieverConfig,
}

impl NewsRetriever {
    pub fn new(corpus: Arc<Corpus>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            corpus,
            provider,
            config: RetrieverConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RetrieverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Retrieves the `k` most relevant snippets for `query`, re-ordered by
    /// publication date ascending and truncated to the configured length.
    ///
    /// Relevance is cosine distance over the normalized embeddings; NaN
    /// distances (zero-norm vectors on either side) are sentineled so they
    /// rank behind every valid candidate. Ties keep corpus order at the
    /// selection step and relevance order at the date step.
    #[instrument(skip(self), err)]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<String>, RetrieveError> {
        let raw = self.provider.embed(query).await?;
        if raw.len() != self.corpus.dimension() {
            return Err(RetrieveError::DimensionMismatch {
                expected: self.corpus.dimension(),
                got: raw.len(),
            });
        }

        let mut query_vec = Array1::from_vec(raw);
        let norm = query_vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        // Zero norm divides to NaN; tolerated here, sentineled below.
        query_vec.mapv_inplace(|v| v / norm);

        let similarities = self.corpus.embeddings().dot(&query_vec);
        let distances: Vec<f32> = similarities
            .iter()
            .map(|&s| {
                let distance = 1.0 - s;
                if distance.is_nan() {
                    self.config.invalid_distance
                } else {
                    distance
                }
            })
            .collect();

        let mut order: Vec<usize> = (0..distances.len()).collect();
        // Stable: equal distances keep corpus order.
        order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
        order.truncate(self.corpus.top_k());

        // Stable: equal dates keep relevance order.
        order.sort_by_key(|&i| self.corpus.articles()[i].publish_date);

        tracing::debug!(
            provider = self.provider.name(),
            results = order.len(),
            "retrieval complete"
        );

        Ok(order
            .into_iter()
            .map(|i| truncate_chars(&self.corpus.articles()[i].content, self.config.snippet_chars))
            .collect())
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((index, _)) => text[..index].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        assert_eq!(truncate_chars("дождь идёт", 5), "дождь");
        assert_eq!(truncate_chars("", 4), "");
    }
}
