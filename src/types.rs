//! Shared error taxonomy for the retrieval pipeline.
//!
//! Three failure tiers with different blast radii:
//!
//! - [`CorpusError`] — fatal at construction; the service must not come up
//!   with a half-loaded or misaligned corpus.
//! - [`EmbeddingError`] — a single embedding-provider call went wrong.
//! - [`RetrieveError`] — one retrieval failed; corpus state and other
//!   in-flight calls are unaffected.
//!
//! Per-line cleaning anomalies are deliberately absent here: the cleaner
//! degrades to placeholders or drops the offending line instead of surfacing
//! an error (see [`crate::cleaning`]).

use thiserror::Error;

/// Fatal corpus-construction failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The article table could not be read or deserialized.
    #[error("failed to read articles file: {0}")]
    Articles(#[from] csv::Error),

    /// The embedding matrix could not be read.
    #[error("failed to read embeddings file: {0}")]
    Embeddings(#[from] ndarray_npy::ReadNpyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An article carried a publish date outside the accepted day-first formats.
    #[error("article '{uid}' has unparseable publish date '{value}'")]
    MalformedDate { uid: String, value: String },

    /// Article rows and embedding rows must align one-to-one.
    #[error("{articles} articles but {rows} embedding rows after deduplication")]
    CountMismatch { articles: usize, rows: usize },
}

/// Failures while obtaining an embedding vector from a provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Transport-level failure: connection, timeout, or body decode.
    #[error("embedding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("embedding endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint answered successfully but without a usable vector.
    #[error("embedding response carried no vector payload")]
    MalformedResponse,

    /// Provider construction is missing a required setting.
    #[error("missing embedding provider configuration: {0}")]
    Config(&'static str),
}

/// Per-call retrieval failures, recoverable by the caller.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The query could not be embedded.
    #[error("query embedding failed: {0}")]
    Provider(#[from] EmbeddingError),

    /// The provider returned a vector of the wrong dimensionality.
    #[error("query embedding has {got} dimensions, corpus expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}
