use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txt2img::app::App;
use txt2img::models::{Config, GenerationRequest};
use txt2img::presets::{self, DEFAULT_NEGATIVE_PROMPT, MAX_IMAGES_PER_REQUEST};

#[derive(Debug, Parser)]
#[command(name = "txt2img")]
#[command(about = "Enhance a short prompt with Gemini and render it with Pollinations.ai")]
struct CliArgs {
    /// Short description of the image to generate.
    #[arg(value_name = "PROMPT", required_unless_present = "list_presets")]
    prompt: Option<String>,

    /// Style preset name.
    #[arg(long, default_value = "Photorealistic", value_parser = parse_style_arg)]
    style: String,

    /// Quality preset name.
    #[arg(long, default_value = "Standard", value_parser = parse_quality_arg)]
    quality: String,

    /// Number of images to generate.
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_IMAGES_PER_REQUEST as i64)
    )]
    count: u32,

    /// Aspect ratio label.
    #[arg(long, default_value = "1:1", value_parser = ["1:1", "9:16", "16:9"])]
    ratio: String,

    /// Concepts the enhanced prompt should steer away from.
    #[arg(long, conflicts_with = "default_negative_prompt")]
    negative_prompt: Option<String>,

    /// Use the built-in negative prompt.
    #[arg(long)]
    default_negative_prompt: bool,

    /// Send the aspect ratio's width/height to the image endpoint instead of 512x512.
    #[arg(long)]
    apply_aspect_ratio: bool,

    /// Directory for generated images (default: output/<date>_<uuid>).
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the available presets and exit.
    #[arg(long)]
    list_presets: bool,
}

fn parse_style_arg(input: &str) -> std::result::Result<String, String> {
    presets::lookup_style(input).map(|_| input.to_string()).map_err(|_| {
        format!(
            "Unknown style '{}'. Available: {}",
            input,
            presets::style_names().collect::<Vec<_>>().join(", ")
        )
    })
}

fn parse_quality_arg(input: &str) -> std::result::Result<String, String> {
    presets::lookup_quality(input)
        .map(|_| input.to_string())
        .map_err(|_| {
            format!(
                "Unknown quality '{}'. Available: {}",
                input,
                presets::quality_names().collect::<Vec<_>>().join(", ")
            )
        })
}

fn print_presets() {
    println!("Styles:");
    for (name, descriptor) in presets::STYLE_PRESETS {
        println!("  {:<22} {}", name, descriptor);
    }
    println!("Qualities:");
    for (name, preset) in presets::QUALITY_PRESETS {
        println!("  {:<22} {}", name, preset);
    }
}

impl CliArgs {
    fn into_request(self) -> Option<GenerationRequest> {
        let negative_prompt = if self.default_negative_prompt {
            Some(DEFAULT_NEGATIVE_PROMPT.to_string())
        } else {
            self.negative_prompt
        };

        Some(GenerationRequest {
            prompt: self.prompt?,
            style: self.style,
            quality: self.quality,
            count: self.count,
            aspect_ratio: self.ratio,
            negative_prompt,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "txt2img=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    if args.list_presets {
        print_presets();
        return Ok(());
    }

    let output_dir = args.output_dir.clone();
    let apply_aspect_ratio = args.apply_aspect_ratio;
    let Some(request) = args.into_request() else {
        anyhow::bail!("An image prompt is required");
    };

    info!("Starting txt2img");

    let config = Config::from_env()?;
    let app = App::new(&config, output_dir, apply_aspect_ratio);

    match app.run(&request).await {
        Ok(outcome) => {
            for path in &outcome.saved_paths {
                println!("{}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            error!("Error generating images: {}", e);
            info!("Try again or modify your prompt");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_arg_valid() {
        assert_eq!(parse_style_arg("Retro VHS").unwrap(), "Retro VHS");
    }

    #[test]
    fn test_parse_style_arg_lists_choices() {
        let err = parse_style_arg("Pastel").unwrap_err();
        assert!(err.contains("Photorealistic"));
    }

    #[test]
    fn test_parse_quality_arg() {
        assert_eq!(parse_quality_arg("High (slow)").unwrap(), "High (slow)");
        assert!(parse_quality_arg("Max").is_err());
    }

    #[test]
    fn test_cli_rejects_count_out_of_range() {
        assert!(CliArgs::try_parse_from(["txt2img", "-n", "5", "a cat"]).is_err());
        assert!(CliArgs::try_parse_from(["txt2img", "-n", "0", "a cat"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_ratio() {
        assert!(CliArgs::try_parse_from(["txt2img", "--ratio", "4:3", "a cat"]).is_err());
    }

    #[test]
    fn test_cli_negative_prompt_flags_conflict() {
        let result = CliArgs::try_parse_from([
            "txt2img",
            "--negative-prompt",
            "blurry",
            "--default-negative-prompt",
            "a cat",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_builds_request_with_default_negative_prompt() {
        let args = CliArgs::try_parse_from([
            "txt2img",
            "--style",
            "Anime",
            "-n",
            "3",
            "--ratio",
            "16:9",
            "--default-negative-prompt",
            "a cat",
        ])
        .unwrap();

        let request = args.into_request().unwrap();
        assert_eq!(request.prompt, "a cat");
        assert_eq!(request.style, "Anime");
        assert_eq!(request.quality, "Standard");
        assert_eq!(request.count, 3);
        assert_eq!(request.aspect_ratio, "16:9");
        assert_eq!(
            request.negative_prompt.as_deref(),
            Some(DEFAULT_NEGATIVE_PROMPT)
        );
    }

    #[test]
    fn test_cli_list_presets_without_prompt() {
        let args = CliArgs::try_parse_from(["txt2img", "--list-presets"]).unwrap();
        assert!(args.list_presets);
        assert!(args.into_request().is_none());
    }
}
