//! Text-to-image generator with prompt enhancement
//!
//! Expands a short prompt with Google Gemini using style and quality presets,
//! then renders one or more images from it with Pollinations.ai and saves
//! them as PNG files.

pub mod ai;
pub mod app;
pub mod enhancer;
pub mod error;
pub mod generator;
pub mod models;
pub mod output;
pub mod presets;
pub mod prompts;

pub use error::{Error, Result};
