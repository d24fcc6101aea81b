//! Data models and structures
//!
//! Defines the values passed between the enhancer, the generator and the
//! output writer, plus environment-backed configuration.

use crate::Result;
use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;

/// Prompt text produced by the enhancer, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhancedPrompt {
    /// Trimmed language-model output.
    Model(String),
    /// Templated concatenation used when the language model call failed.
    Fallback(String),
}

impl EnhancedPrompt {
    pub fn as_str(&self) -> &str {
        match self {
            EnhancedPrompt::Model(text) | EnhancedPrompt::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, EnhancedPrompt::Fallback(_))
    }

    pub fn into_string(self) -> String {
        match self {
            EnhancedPrompt::Model(text) | EnhancedPrompt::Fallback(text) => text,
        }
    }
}

impl fmt::Display for EnhancedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const SQUARE: ImageDimensions = ImageDimensions {
        width: 512,
        height: 512,
    };

    /// Map an aspect-ratio label to its nominal size. Unknown labels fall back
    /// to 512x512.
    pub fn for_aspect_ratio(label: &str) -> Self {
        match label {
            "9:16" => ImageDimensions {
                width: 576,
                height: 1024,
            },
            "16:9" => ImageDimensions {
                width: 1024,
                height: 576,
            },
            _ => Self::SQUARE,
        }
    }
}

/// One decoded RGB image and the seed it was requested with.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub seed: u32,
    pub image: RgbImage,
}

impl GeneratedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Everything the user asked for in one run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: String,
    pub quality: String,
    pub count: u32,
    pub aspect_ratio: String,
    pub negative_prompt: Option<String>,
}

/// JSON summary written next to the generated images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub prompt: String,
    pub style: String,
    pub quality: String,
    pub count: u32,
    pub aspect_ratio: String,
    pub negative_prompt: Option<String>,
    pub enhanced_prompt: String,
    pub used_fallback: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_ENHANCER_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENHANCER_TEMPERATURE: f32 = 0.7;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub image_api_key: Option<String>,
    pub enhancer_model: String,
    pub enhancer_temperature: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let image_api_key = non_empty(std::env::var("TXTTOIMG_API").ok())
            .or_else(|| non_empty(std::env::var("txttoimg_api").ok()));

        Ok(Self {
            gemini_api_key: non_empty(std::env::var("GEMINI_API_KEY").ok()),
            image_api_key,
            enhancer_model: DEFAULT_ENHANCER_MODEL.to_string(),
            enhancer_temperature: DEFAULT_ENHANCER_TEMPERATURE,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
