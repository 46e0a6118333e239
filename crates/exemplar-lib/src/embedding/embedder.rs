use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EMBEDDING_DIMENSION;

/// Produces the query vector for a piece of text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Embedder backed by an OpenAI-compatible `/embeddings` endpoint.
///
/// Endpoint, model, and API key resolve from the environment:
/// `EXEMPLAR_EMBED_URL` > default OpenAI base URL, `EXEMPLAR_EMBED_MODEL` >
/// default model, `EXEMPLAR_EMBED_API_KEY` > `OPENAI_API_KEY` > empty.
pub struct HttpEmbedder {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl HttpEmbedder {
    #[must_use]
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Build an embedder from environment variables, falling back to the
    /// OpenAI defaults. An empty API key is allowed here; the request will
    /// fail with an auth error at call time instead.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("EXEMPLAR_EMBED_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("EXEMPLAR_EMBED_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = std::env::var("EXEMPLAR_EMBED_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        Self::new(base_url, model, api_key)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url);
        let mut request = self.client.post(&url).json(&EmbeddingsRequest {
            model: &self.model,
            input: text,
        });
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Embedding request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Embedding endpoint returned {status}: {body}");
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .context("Failed to parse embeddings response")?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .context("Embeddings response contained no data")?;

        if embedding.len() != EMBEDDING_DIMENSION {
            anyhow::bail!(
                "Embedding dimension mismatch: expected {EMBEDDING_DIMENSION}, got {}",
                embedding.len()
            );
        }

        Ok(embedding)
    }
}
