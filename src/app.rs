//! Application orchestration: presets, enhancement, generation, export.

use crate::ai::{ChatService, GeminiChatClient, ImageGenerationService, PollinationsClient};
use crate::enhancer::PromptEnhancer;
use crate::generator::{validate_count, ImageGenerator};
use crate::models::{
    Config, EnhancedPrompt, GeneratedImage, GenerationRecord, GenerationRequest,
};
use crate::output::ImageWriter;
use crate::{presets, Error, Result};
use chrono::{Local, Utc};
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Runs one prompt through enhancement, generation and PNG export.
pub struct App {
    enhancer: PromptEnhancer,
    generator: ImageGenerator,
    writer: ImageWriter,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub enhanced_prompt: EnhancedPrompt,
    pub images: Vec<GeneratedImage>,
    pub saved_paths: Vec<PathBuf>,
    pub record_path: PathBuf,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(
        services: AppServices,
        output_dir: PathBuf,
        apply_aspect_ratio: bool,
    ) -> Self {
        Self {
            enhancer: PromptEnhancer::new(services.chat),
            generator: ImageGenerator::new(services.image_gen)
                .with_aspect_ratio_applied(apply_aspect_ratio),
            writer: ImageWriter::new(&output_dir),
        }
    }

    /// Construct an app with Gemini and Pollinations clients from `config`.
    ///
    /// Without `output_dir`, images go to `output/<date>_<uuid>`. Nothing is
    /// created on disk until a batch succeeds.
    pub fn new(config: &Config, output_dir: Option<PathBuf>, apply_aspect_ratio: bool) -> Self {
        let output_dir = output_dir.unwrap_or_else(default_output_dir);
        info!("Output directory: {}", output_dir.display());

        // Reuse one HTTP connection pool across both clients.
        let http_client = reqwest::Client::new();

        let gemini_api_key = config.gemini_api_key.clone().unwrap_or_else(|| {
            warn!("GEMINI_API_KEY not set; prompts will use the templated fallback");
            String::new()
        });
        info!("Enhancer: Gemini (model: {})", config.enhancer_model);
        let chat = GeminiChatClient::new_with_client(
            gemini_api_key,
            config.enhancer_model.clone(),
            config.enhancer_temperature,
            http_client.clone(),
        );

        if config.image_api_key.is_some() {
            info!("Image generation: Pollinations.ai (authenticated)");
        } else {
            info!("Image generation: Pollinations.ai (anonymous)");
        }
        let image_gen =
            PollinationsClient::new_with_client(config.image_api_key.clone(), http_client);

        Self::with_services(
            AppServices {
                chat: Box::new(chat),
                image_gen: Box::new(image_gen),
            },
            output_dir,
            apply_aspect_ratio,
        )
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        if request.prompt.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Please enter an image prompt to generate.".to_string(),
            ));
        }
        validate_count(request.count)?;

        let style = presets::lookup_style(&request.style)?;
        let quality = presets::lookup_quality(&request.quality)?.to_string();

        info!("Enhancing prompt with Gemini...");
        let enhanced_prompt = self
            .enhancer
            .enhance(
                &request.prompt,
                style,
                &quality,
                request.negative_prompt.as_deref(),
            )
            .await;
        if enhanced_prompt.is_fallback() {
            warn!("Using fallback prompt: {}", enhanced_prompt);
        } else {
            info!("Enhanced prompt: {}", enhanced_prompt);
        }

        info!(
            "Generating {} image(s) with Pollinations.ai...",
            request.count
        );
        let images = self
            .generator
            .generate(
                enhanced_prompt.as_str(),
                request.count,
                &request.aspect_ratio,
            )
            .await
            .map_err(|e| {
                error!("Error generating images: {}", e);
                e
            })?;
        info!("Successfully generated {} image(s)!", images.len());

        let saved_paths = self.writer.save_all(&images).await?;

        let record = GenerationRecord {
            prompt: request.prompt.clone(),
            style: request.style.clone(),
            quality: request.quality.clone(),
            count: request.count,
            aspect_ratio: request.aspect_ratio.clone(),
            negative_prompt: request.negative_prompt.clone(),
            enhanced_prompt: enhanced_prompt.as_str().to_string(),
            used_fallback: enhanced_prompt.is_fallback(),
            images: saved_paths
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
            created_at: Utc::now(),
        };
        let record_path = self.writer.write_record(&record)?;
        info!("Saved generation record at: {}", record_path.display());

        Ok(GenerationOutcome {
            enhanced_prompt,
            images,
            saved_paths,
            record_path,
        })
    }
}

fn default_output_dir() -> PathBuf {
    let date = Local::now().format("%Y-%m-%d").to_string();
    PathBuf::from("output").join(format!("{}_{}", date, Uuid::new_v4()))
}
