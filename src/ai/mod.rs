//! AI service integration for prompt enhancement and image generation
//!
//! Gemini expands short prompts into detailed descriptions; Pollinations.ai
//! renders images from them.

pub mod gemini;
pub mod mock;
pub mod pollinations;

pub use gemini::GeminiChatClient;
pub use mock::{MockChatClient, MockImageGenerationClient};
pub use pollinations::PollinationsClient;

use crate::models::ImageDimensions;
use crate::Result;
use async_trait::async_trait;

/// Free-text completion against a language model.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Fetches the raw bytes of one rendered image.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn fetch_image(
        &self,
        prompt: &str,
        seed: u32,
        dimensions: ImageDimensions,
    ) -> Result<Vec<u8>>;
}
