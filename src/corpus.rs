//! Corpus construction: article table plus precomputed embedding matrix.
//!
//! The corpus is built once at service start and never mutated afterwards,
//! so it can be shared across concurrent retrievals behind an `Arc` with no
//! locking. Construction is all-or-nothing: a malformed date or a row-count
//! mismatch aborts the load rather than producing a partial corpus.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use serde::Deserialize;

use crate::cleaning::TextCleaner;
use crate::types::CorpusError;

/// Day-first formats accepted for `publish_date`, tried in order.
const DATETIME_FORMATS: &[&str] = &["%d.%m.%Y %H:%M:%S", "%d.%m.%Y %H:%M", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Raw row shape of the article source file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct ArticleRow {
    uid: String,
    publish_date: String,
    content: String,
}

/// One deduplicated article with its cleaned body.
#[derive(Debug, Clone)]
pub struct Article {
    pub uid: String,
    pub publish_date: NaiveDate,
    /// Cleaned text; the raw scraped body is not retained.
    pub content: String,
}

/// Immutable in-memory corpus: articles aligned row-for-row with an
/// L2-normalized embedding matrix, plus the fixed result count `k`.
#[derive(Debug)]
pub struct Corpus {
    articles: Vec<Article>,
    embeddings: Array2<f32>,
    top_k: usize,
}

impl Corpus {
    /// Loads and cleans the corpus with the default [`TextCleaner`].
    ///
    /// `articles_path` is a CSV file with at least `uid`, `publish_date`
    /// (day-first), and `content` columns; `embeddings_path` is a NumPy `.npy`
    /// matrix with one `f32` row per deduplicated article, in file order.
    pub fn load(
        articles_path: impl AsRef<Path>,
        embeddings_path: impl AsRef<Path>,
        top_k: usize,
    ) -> Result<Self, CorpusError> {
        Self::load_with_cleaner(articles_path, embeddings_path, top_k, &TextCleaner::default())
    }

    /// Loads the corpus using a caller-supplied cleaner.
    pub fn load_with_cleaner(
        articles_path: impl AsRef<Path>,
        embeddings_path: impl AsRef<Path>,
        top_k: usize,
        cleaner: &TextCleaner,
    ) -> Result<Self, CorpusError> {
        let mut reader = csv::Reader::from_path(articles_path.as_ref())?;

        let mut articles = Vec::new();
        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        for row in reader.deserialize::<ArticleRow>() {
            let row = row?;
            // First occurrence wins; later rows with the same uid are dropped.
            if !seen.insert(row.uid.clone()) {
                duplicates += 1;
                continue;
            }
            let publish_date =
                parse_day_first(&row.publish_date).ok_or_else(|| CorpusError::MalformedDate {
                    uid: row.uid.clone(),
                    value: row.publish_date.clone(),
                })?;
            articles.push(Article {
                uid: row.uid,
                publish_date,
                content: cleaner.clean(&row.content),
            });
        }

        let file = File::open(embeddings_path.as_ref())?;
        let mut embeddings = Array2::<f32>::read_npy(file)?;

        if articles.len() != embeddings.nrows() {
            return Err(CorpusError::CountMismatch {
                articles: articles.len(),
                rows: embeddings.nrows(),
            });
        }

        // L2-normalize every row in place. A zero row divides to NaN, which
        // the retriever sentinels at distance time rather than rejecting here.
        for mut row in embeddings.rows_mut() {
            let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
            row.mapv_inplace(|v| v / norm);
        }

        tracing::info!(
            articles = articles.len(),
            duplicates,
            dimension = embeddings.ncols(),
            top_k,
            "corpus loaded"
        );

        Ok(Self {
            articles,
            embeddings,
            top_k,
        })
    }

    /// Number of articles (and embedding rows) in the corpus.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Embedding dimensionality the query vector must match.
    pub fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    /// Fixed number of results returned per query.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Row-normalized embedding matrix, read-only after construction.
    pub fn embeddings(&self) -> &Array2<f32> {
        &self.embeddings
    }
}

fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    None
}
