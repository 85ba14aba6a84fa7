//! ```text
//! news.csv ───────────► corpus::Corpus::load ◄─────────── embeddings.npy
//!                              │
//!              cleaning::TextCleaner (per article body)
//!                              │
//!                              ▼
//!          immutable Corpus (articles ∥ L2-normalized matrix)
//!                              │
//! query ──► embeddings::EmbeddingProvider ──► retriever::NewsRetriever
//!                                                      │
//!                                                      ▼
//!                    top-k snippets, oldest first, length-capped
//! ```
//!
//! Retrieval core for a news chat assistant: clean a scraped article corpus
//! once at startup, then answer free-text queries with the `k` most relevant
//! snippets in chronological order, ready for a downstream generator.

pub mod cleaning;
pub mod corpus;
pub mod embeddings;
pub mod retriever;
pub mod types;

pub use cleaning::TextCleaner;
pub use corpus::{Article, Corpus};
pub use embeddings::{EmbeddingProvider, HttpEmbeddingProvider, MockEmbeddingProvider};
pub use retriever::{NewsRetriever, RetrieverConfig};
pub use types::{CorpusError, EmbeddingError, RetrieveError};
