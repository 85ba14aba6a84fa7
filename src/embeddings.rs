//! Query embedding providers.
//!
//! The retriever only ever needs one vector per query, so the provider trait
//! is deliberately narrow: embed one string, report a name for diagnostics.
//! [`HttpEmbeddingProvider`] talks to a hosted embedding endpoint;
//! [`MockEmbeddingProvider`] produces deterministic vectors for tests and
//! offline runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::EmbeddingError;

/// Source of query embedding vectors.
///
/// Implementations must return vectors of a fixed dimensionality matching the
/// corpus matrix; the retriever checks the shape per call.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single query string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Provider name carried in diagnostics.
    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// HTTP-backed embedding provider: bearer-authenticated JSON POST returning
/// `{"embedding": [..]}`.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl HttpEmbeddingProvider {
    pub fn builder() -> HttpEmbeddingProviderBuilder {
        HttpEmbeddingProviderBuilder::default()
    }

    /// Builds a provider from the environment (a `.env` file is honored):
    /// `NEWSWIRE_EMBEDDINGS_URL` (required), `NEWSWIRE_EMBEDDINGS_API_KEY`,
    /// and `NEWSWIRE_EMBEDDINGS_MODEL` (defaults to `query`).
    pub fn from_env() -> Result<Self, EmbeddingError> {
        dotenvy::dotenv().ok();

        let endpoint = std::env::var("NEWSWIRE_EMBEDDINGS_URL")
            .map_err(|_| EmbeddingError::Config("NEWSWIRE_EMBEDDINGS_URL"))?;
        let endpoint = Url::parse(&endpoint)
            .map_err(|_| EmbeddingError::Config("NEWSWIRE_EMBEDDINGS_URL is not a valid URL"))?;

        let mut builder = Self::builder().endpoint(endpoint);
        if let Ok(key) = std::env::var("NEWSWIRE_EMBEDDINGS_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Ok(model) = std::env::var("NEWSWIRE_EMBEDDINGS_MODEL") {
            builder = builder.model(model);
        }
        builder.build()
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&EmbedRequest {
                model: &self.model,
                text,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: EmbedResponse = response.json().await?;
        if payload.embedding.is_empty() {
            return Err(EmbeddingError::MalformedResponse);
        }
        Ok(payload.embedding)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Builder for [`HttpEmbeddingProvider`].
#[derive(Debug, Default)]
pub struct HttpEmbeddingProviderBuilder {
    endpoint: Option<Url>,
    api_key: Option<String>,
    model: Option<String>,
    client: Option<reqwest::Client>,
}

impl HttpEmbeddingProviderBuilder {
    /// Set the embedding endpoint. Required.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the bearer token sent with each request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier. Defaults to `"query"`.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Supply a pre-configured HTTP client (e.g. with custom timeouts).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<HttpEmbeddingProvider, EmbeddingError> {
        Ok(HttpEmbeddingProvider {
            client: self.client.unwrap_or_default(),
            endpoint: self.endpoint.ok_or(EmbeddingError::Config("endpoint"))?,
            api_key: self.api_key,
            model: self.model.unwrap_or_else(|| "query".to_owned()),
        })
    }
}

/// Deterministic embedding provider for tests and offline runs.
///
/// Vectors are seeded from an FNV-style hash of the input text, so identical
/// text always embeds identically and distinct text almost never collides.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self { dimension: 64 }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.bytes() {
            state ^= u64::from(byte);
            state = state.wrapping_mul(0x0100_0000_01b3);
        }

        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            // Top 24 bits mapped into [-1, 1).
            vector.push(((state >> 40) as f32 / 8_388_608.0) - 1.0);
        }
        Ok(vector)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
