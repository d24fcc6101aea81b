//! PNG export of generated images
//!
//! Writes each image of a batch as a PNG file, plus a JSON record of the run.

use crate::models::{GeneratedImage, GenerationRecord};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const RECORD_FILE_NAME: &str = "generation.json";

pub struct ImageWriter {
    output_dir: PathBuf,
}

impl ImageWriter {
    /// The directory is created on the first save, not here.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `generated_image.png` for a single image, `generated_image_<n>.png`
    /// (1-based) inside a larger batch.
    pub fn file_name(index: usize, total: usize) -> String {
        if total == 1 {
            "generated_image.png".to_string()
        } else {
            format!("generated_image_{}.png", index + 1)
        }
    }

    fn save_all_sync(
        output_dir: PathBuf,
        images: Vec<GeneratedImage>,
        paths: Vec<PathBuf>,
    ) -> Result<()> {
        fs::create_dir_all(&output_dir)?;
        for (generated, path) in images.iter().zip(paths) {
            fs::write(&path, generated.to_png()?)?;
        }
        Ok(())
    }

    /// Save every image as PNG and return the written paths in batch order.
    pub async fn save_all(&self, images: &[GeneratedImage]) -> Result<Vec<PathBuf>> {
        let paths: Vec<PathBuf> = (0..images.len())
            .map(|index| self.output_dir.join(Self::file_name(index, images.len())))
            .collect();

        tokio::task::spawn_blocking({
            let output_dir = self.output_dir.clone();
            let images = images.to_vec();
            let paths = paths.clone();
            move || Self::save_all_sync(output_dir, images, paths)
        })
        .await
        .map_err(|e| Error::Invariant(format!("PNG export task join error: {}", e)))??;

        for path in &paths {
            tracing::info!("Saved image at: {}", path.display());
        }

        Ok(paths)
    }

    pub fn write_record(&self, record: &GenerationRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(RECORD_FILE_NAME);
        fs::write(&path, serde_json::to_string_pretty(record)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn test_image(seed: u32) -> GeneratedImage {
        GeneratedImage {
            seed,
            image: RgbImage::from_pixel(4, 3, Rgb([seed as u8, 128, 64])),
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ImageWriter::file_name(0, 1), "generated_image.png");
        assert_eq!(ImageWriter::file_name(0, 3), "generated_image_1.png");
        assert_eq!(ImageWriter::file_name(2, 3), "generated_image_3.png");
    }

    #[tokio::test]
    async fn test_directory_created_on_first_save() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let writer = ImageWriter::new(&nested);
        assert!(!nested.exists());
        assert_eq!(writer.output_dir(), nested.as_path());

        let paths = writer.save_all(&[test_image(0)]).await.unwrap();
        assert!(nested.is_dir());
        assert!(paths[0].is_file());
    }

    #[tokio::test]
    async fn test_save_single_image() {
        let dir = TempDir::new().unwrap();
        let writer = ImageWriter::new(dir.path());

        let paths = writer.save_all(&[test_image(0)]).await.unwrap();

        assert_eq!(paths, vec![dir.path().join("generated_image.png")]);
        let saved = image::open(&paths[0]).unwrap().to_rgb8();
        assert_eq!(saved.dimensions(), (4, 3));
    }

    #[tokio::test]
    async fn test_save_batch_preserves_order() {
        let dir = TempDir::new().unwrap();
        let writer = ImageWriter::new(dir.path());

        let paths = writer
            .save_all(&[test_image(0), test_image(1), test_image(2)])
            .await
            .unwrap();

        assert_eq!(paths.len(), 3);
        for (index, path) in paths.iter().enumerate() {
            assert!(path.ends_with(format!("generated_image_{}.png", index + 1)));
            let saved = image::open(path).unwrap().to_rgb8();
            assert_eq!(saved.get_pixel(0, 0)[0], index as u8);
        }
    }

    #[test]
    fn test_write_record() {
        let dir = TempDir::new().unwrap();
        let writer = ImageWriter::new(dir.path());

        let record = GenerationRecord {
            prompt: "a fox".to_string(),
            style: "Anime".to_string(),
            quality: "Standard".to_string(),
            count: 1,
            aspect_ratio: "1:1".to_string(),
            negative_prompt: None,
            enhanced_prompt: "a fox, anime".to_string(),
            used_fallback: true,
            images: vec!["generated_image.png".to_string()],
            created_at: Utc::now(),
        };

        let path = writer.write_record(&record).unwrap();
        let json = fs::read_to_string(path).unwrap();
        let parsed: GenerationRecord = serde_json::from_str(&json).unwrap();
        assert!(parsed.used_fallback);
        assert_eq!(parsed.images, vec!["generated_image.png".to_string()]);
    }
}
