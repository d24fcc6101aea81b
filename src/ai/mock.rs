use super::{ChatService, ImageGenerationService};
use crate::models::ImageDimensions;
use crate::{Error, Result};
use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// In-memory [`ChatService`] with canned responses or a forced failure.
#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails with an [`Error::EnhancementService`] carrying `message`.
    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, oldest first.
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if let Some(message) = &self.failure {
            return Err(Error::EnhancementService(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("A cinematic, highly detailed scene".to_string())
        } else {
            let index = (call - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// In-memory [`ImageGenerationService`] that records every request.
///
/// Successful responses are PNGs whose pixels encode the requested seed, see
/// [`seed_marker`].
#[derive(Clone)]
pub struct MockImageGenerationClient {
    requests: Arc<Mutex<Vec<(u32, ImageDimensions)>>>,
    failing_seed: Option<u32>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            failing_seed: None,
        }
    }

    /// Respond with a 500 status for `seed`.
    pub fn with_failure_at_seed(mut self, seed: u32) -> Self {
        self.failing_seed = Some(seed);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_seeds(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(seed, _)| *seed)
            .collect()
    }

    pub fn requested_dimensions(&self) -> Vec<ImageDimensions> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, dimensions)| *dimensions)
            .collect()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a 2x2 PNG whose red channel carries `seed`.
pub fn seed_marker_png(seed: u32) -> Result<Vec<u8>> {
    let marker = u8::try_from(seed)
        .map_err(|_| Error::Invariant(format!("Seed {} does not fit a pixel marker", seed)))?;
    let image = RgbImage::from_pixel(2, 2, Rgb([marker, 0, 255]));

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Read back the seed written by [`seed_marker_png`].
pub fn seed_marker(image: &RgbImage) -> u32 {
    u32::from(image.get_pixel(0, 0)[0])
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn fetch_image(
        &self,
        _prompt: &str,
        seed: u32,
        dimensions: ImageDimensions,
    ) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push((seed, dimensions));

        if self.failing_seed == Some(seed) {
            return Err(Error::UnexpectedStatus {
                status: 500,
                body: "mock failure".to_string(),
            });
        }

        seed_marker_png(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chat_client_default_response() {
        let client = MockChatClient::new();

        let text = client.complete("anything").await.unwrap();
        assert!(!text.is_empty());
        assert_eq!(client.received_prompts(), vec!["anything".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_chat_client_cycles_responses() {
        let client = MockChatClient::new()
            .with_response("first".to_string())
            .with_response("second".to_string());

        assert_eq!(client.complete("a").await.unwrap(), "first");
        assert_eq!(client.complete("b").await.unwrap(), "second");
        assert_eq!(client.complete("c").await.unwrap(), "first");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_chat_client_failure() {
        let client = MockChatClient::new().with_failure("quota exceeded".to_string());

        let err = client.complete("a").await.unwrap_err();
        assert!(matches!(err, Error::EnhancementService(_)));
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_image_client_encodes_seed() {
        let client = MockImageGenerationClient::new();
        let probe = client.clone();

        let bytes = client
            .fetch_image("p", 7, ImageDimensions::SQUARE)
            .await
            .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();

        assert_eq!(seed_marker(&decoded), 7);
        assert_eq!(probe.requested_seeds(), vec![7]);
    }

    #[tokio::test]
    async fn test_mock_image_client_fails_at_seed() {
        let client = MockImageGenerationClient::new().with_failure_at_seed(1);

        assert!(client
            .fetch_image("p", 0, ImageDimensions::SQUARE)
            .await
            .is_ok());
        let err = client
            .fetch_image("p", 1, ImageDimensions::SQUARE)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 500, .. }));
        assert_eq!(client.get_call_count(), 2);
    }
}
