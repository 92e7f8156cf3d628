//! HTTP embedding provider. Retries with exponential backoff; after all
//! retries fail the provider latches unavailable so later queries fail
//! fast until `reset_availability` is called.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mailgraph_core::config::EmbeddingConfig;
use mailgraph_core::errors::{EmbeddingError, MailgraphResult};
use mailgraph_core::traits::IEmbeddingProvider;

pub struct ApiEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
    max_retries: u32,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl ApiEmbeddingProvider {
    /// Build a provider from config; the API key is read from the
    /// environment variable the config names.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.dimensions,
            config.max_retries,
        )
    }

    pub fn new(
        endpoint: String,
        model: String,
        api_key: String,
        dimensions: usize,
        max_retries: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
            api_key,
            dimensions,
            max_retries,
            available: AtomicBool::new(true),
        }
    }

    async fn request_embedding(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2u64.pow(attempt - 1));
                tokio::time::sleep(delay).await;
                debug!(attempt, "retrying embedding request");
            }

            match self.send_request(text).await {
                Ok(embedding) => return Ok(embedding),
                Err(e) => {
                    warn!(attempt, error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.available.store(false, Ordering::Relaxed);
        Err(last_err.unwrap_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            }
            .into()
        }))
    }

    async fn send_request(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&EmbedRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let resp: EmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("JSON parse error: {e}"),
                })?;

        let mut embedding = resp
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            })?;
        embedding.resize(self.dimensions, 0.0);
        Ok(embedding)
    }

    /// Clear the unavailable latch (after a config change or health check).
    pub fn reset_availability(&self) {
        self.available.store(true, Ordering::Relaxed);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl IEmbeddingProvider for ApiEmbeddingProvider {
    async fn embed(&self, text: &str) -> MailgraphResult<Vec<f32>> {
        self.request_embedding(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(max_retries: u32) -> ApiEmbeddingProvider {
        ApiEmbeddingProvider::new(
            "http://127.0.0.1:9".to_string(), // discard port; connections fail fast
            "test-model".to_string(),
            String::new(),
            8,
            max_retries,
        )
    }

    #[test]
    fn response_shape_deserializes() {
        let raw = r#"{"data":[{"embedding":[0.1,0.2,0.3]}]}"#;
        let resp: EmbedResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.data[0].embedding.len(), 3);
    }

    #[tokio::test]
    async fn unreachable_endpoint_latches_unavailable() {
        let p = provider(0);
        assert!(p.embed("hello").await.is_err());
        assert!(!p.is_available());

        // Latched: the next call fails fast with ProviderUnavailable.
        let err = p.embed("hello").await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));

        p.reset_availability();
        assert!(p.is_available());
    }
}
