//! Prompt enhancement with a templated fallback
//!
//! A single language-model call expands the user's prompt. Any failure is
//! logged and replaced by a deterministic concatenation, so callers always
//! get a usable prompt.

use crate::ai::ChatService;
use crate::models::EnhancedPrompt;
use crate::prompts;
use tracing::{info, warn};

pub struct PromptEnhancer {
    chat: Box<dyn ChatService>,
}

impl PromptEnhancer {
    pub fn new(chat: Box<dyn ChatService>) -> Self {
        Self { chat }
    }

    /// Expand `raw_prompt` using the given style and quality descriptors.
    ///
    /// `negative_prompt` is passed to the model as examples to steer away
    /// from, not as a hard constraint.
    pub async fn enhance(
        &self,
        raw_prompt: &str,
        style: &str,
        quality: &str,
        negative_prompt: Option<&str>,
    ) -> EnhancedPrompt {
        let instruction = render_instruction(raw_prompt, style, quality, negative_prompt);

        match self.chat.complete(&instruction).await {
            Ok(text) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                info!("Prompt enhanced ({} chars)", text.len());
                EnhancedPrompt::Model(text)
            }
            Ok(_) => {
                warn!("Enhancement returned only whitespace");
                EnhancedPrompt::Fallback(fallback_prompt(raw_prompt, style, quality))
            }
            Err(e) => {
                warn!("Enhancement failed: {}", e);
                EnhancedPrompt::Fallback(fallback_prompt(raw_prompt, style, quality))
            }
        }
    }
}

/// Render the instruction sent to the language model.
pub fn render_instruction(
    raw_prompt: &str,
    style: &str,
    quality: &str,
    negative_prompt: Option<&str>,
) -> String {
    prompts::render(
        prompts::ENHANCE,
        &[
            ("user_prompt", raw_prompt),
            ("style", style),
            ("quality", quality),
            ("negative_prompt", negative_prompt.unwrap_or("None")),
        ],
    )
}

pub fn fallback_prompt(raw_prompt: &str, style: &str, quality: &str) -> String {
    format!(
        "{}, {}, {}, highly detailed, cinematic",
        raw_prompt, style, quality
    )
}
