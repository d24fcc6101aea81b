//! Batch image generation
//!
//! Issues one request per seed in `0..count`, in order, and stops at the
//! first failure. A failed batch returns only the error.

use crate::ai::ImageGenerationService;
use crate::models::{GeneratedImage, ImageDimensions};
use crate::presets::MAX_IMAGES_PER_REQUEST;
use crate::{Error, Result};
use tracing::{debug, error, info};

pub struct ImageGenerator {
    service: Box<dyn ImageGenerationService>,
    apply_aspect_ratio: bool,
}

impl ImageGenerator {
    /// Every request is sent at 512x512 regardless of the aspect ratio; see
    /// [`ImageGenerator::with_aspect_ratio_applied`].
    pub fn new(service: Box<dyn ImageGenerationService>) -> Self {
        Self {
            service,
            apply_aspect_ratio: false,
        }
    }

    /// Forward the aspect ratio's resolved dimensions instead of 512x512.
    pub fn with_aspect_ratio_applied(mut self, apply: bool) -> Self {
        self.apply_aspect_ratio = apply;
        self
    }

    /// Generate `count` images for `prompt`. Image `i` is requested with seed `i`.
    pub async fn generate(
        &self,
        prompt: &str,
        count: u32,
        aspect_ratio: &str,
    ) -> Result<Vec<GeneratedImage>> {
        validate_count(count)?;

        let resolved = ImageDimensions::for_aspect_ratio(aspect_ratio);
        let dimensions = if self.apply_aspect_ratio {
            resolved
        } else {
            debug!(
                "Aspect ratio {} resolves to {}x{}; requesting 512x512",
                aspect_ratio, resolved.width, resolved.height
            );
            ImageDimensions::SQUARE
        };

        let mut images = Vec::with_capacity(count as usize);
        for seed in 0..count {
            let image = self
                .generate_one(prompt, seed, dimensions)
                .await
                .map_err(|e| {
                    error!("Image {}/{} failed: {}", seed + 1, count, e);
                    Error::ImageGeneration {
                        index: seed + 1,
                        source: Box::new(e),
                    }
                })?;
            info!(
                "Generated image {}/{} ({}x{})",
                seed + 1,
                count,
                image.width(),
                image.height()
            );
            images.push(image);
        }

        Ok(images)
    }

    async fn generate_one(
        &self,
        prompt: &str,
        seed: u32,
        dimensions: ImageDimensions,
    ) -> Result<GeneratedImage> {
        let bytes = self.service.fetch_image(prompt, seed, dimensions).await?;
        let image = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes).map(|decoded| decoded.to_rgb8())
        })
        .await
        .map_err(|e| Error::Invariant(format!("Image decode task join error: {}", e)))??;
        Ok(GeneratedImage { seed, image })
    }
}

/// Reject counts outside `1..=MAX_IMAGES_PER_REQUEST`.
pub fn validate_count(count: u32) -> Result<()> {
    if (1..=MAX_IMAGES_PER_REQUEST).contains(&count) {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "num_images must be between 1 and {} (got {})",
            MAX_IMAGES_PER_REQUEST, count
        )))
    }
}
