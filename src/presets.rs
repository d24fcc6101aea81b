//! Style and quality presets
//!
//! Static tables the CLI selects from. Style presets are appended to the
//! enhancement instruction as descriptors; quality presets are rendered there
//! as text and never reach the image endpoint.

use crate::{Error, Result};
use std::fmt;

/// Upper bound on images per generation request.
pub const MAX_IMAGES_PER_REQUEST: u32 = 4;

pub const DEFAULT_NEGATIVE_PROMPT: &str = "low quality, blurry, deformed, watermark, text, \
     signature, extra limbs, oversaturated, underexposed, jpeg artifacts, poorly drawn";

pub const STYLE_PRESETS: &[(&str, &str)] = &[
    (
        "Photorealistic",
        "ultra-realistic, high detail, 35mm, cinematic lighting, photorealistic",
    ),
    (
        "Digital Painting",
        "digital painting, brush strokes, rich color palette, cinematic lighting",
    ),
    (
        "Watercolor",
        "soft watercolor painting, delicate textures, pastel tones, high resolution",
    ),
    (
        "Low-Poly Art",
        "low-poly stylized art, geometric shapes, minimalistic shading",
    ),
    (
        "Cyberpunk",
        "cyberpunk, neon lights, reflective surfaces, high contrast, futuristic cityscape",
    ),
    (
        "Fantasy Illustration",
        "epic fantasy illustration, intricate details, dramatic lighting, magical atmosphere",
    ),
    (
        "Anime",
        "anime style, clean lineart, vibrant colors, dramatic composition",
    ),
    (
        "Retro VHS",
        "retro VHS aesthetic, film grain, chromatic aberration, muted color grading",
    ),
];

pub const QUALITY_PRESETS: &[(&str, QualityPreset)] = &[
    (
        "Draft (fast)",
        QualityPreset {
            steps: 12,
            guidance_scale: 6.0,
        },
    ),
    (
        "Standard",
        QualityPreset {
            steps: 28,
            guidance_scale: 7.5,
        },
    ),
    (
        "High (slow)",
        QualityPreset {
            steps: 50,
            guidance_scale: 8.5,
        },
    ),
];

/// Step count and guidance scale pair for a named quality level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPreset {
    pub steps: u32,
    pub guidance_scale: f32,
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} steps, guidance {:.1}", self.steps, self.guidance_scale)
    }
}

/// Resolve a style name to its descriptor.
pub fn lookup_style(name: &str) -> Result<&'static str> {
    STYLE_PRESETS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, descriptor)| *descriptor)
        .ok_or_else(|| Error::Config(format!("Unknown style preset '{}'", name)))
}

/// Resolve a quality name to its step/guidance pair.
pub fn lookup_quality(name: &str) -> Result<QualityPreset> {
    QUALITY_PRESETS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, preset)| *preset)
        .ok_or_else(|| Error::Config(format!("Unknown quality preset '{}'", name)))
}

pub fn style_names() -> impl Iterator<Item = &'static str> {
    STYLE_PRESETS.iter().map(|(name, _)| *name)
}

pub fn quality_names() -> impl Iterator<Item = &'static str> {
    QUALITY_PRESETS.iter().map(|(name, _)| *name)
}
