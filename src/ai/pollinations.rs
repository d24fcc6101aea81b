//! Pollinations.ai image endpoint client.
//!
//! One `GET /prompt/<encoded prompt>` per image. The endpoint works without
//! credentials; a configured key is forwarded as a bearer token.

use super::ImageGenerationService;
use crate::models::ImageDimensions;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai";

/// Rendering model requested for every image.
pub const IMAGE_MODEL: &str = "flux";

pub struct PollinationsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl PollinationsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    pub fn new_with_client(api_key: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn prompt_url(&self, prompt: &str) -> String {
        format!(
            "{}/prompt/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(prompt)
        )
    }
}

#[async_trait]
impl ImageGenerationService for PollinationsClient {
    async fn fetch_image(
        &self,
        prompt: &str,
        seed: u32,
        dimensions: ImageDimensions,
    ) -> Result<Vec<u8>> {
        tracing::debug!(
            "Requesting {}x{} image (seed {}) from Pollinations",
            dimensions.width,
            dimensions.height,
            seed
        );

        let mut request = self
            .client
            .get(self.prompt_url(prompt))
            .timeout(self.timeout)
            .query(&[
                ("width", dimensions.width.to_string()),
                ("height", dimensions.height.to_string()),
                ("seed", seed.to_string()),
                ("model", IMAGE_MODEL.to_string()),
                ("enhance", "true".to_string()),
            ]);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request to Pollinations: {}", e);
            e
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Pollinations API error (status {}): {}", status, body);
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
