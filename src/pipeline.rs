use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::error::{Result, ScanError};

/// Data that flows through the pipeline for a single image
#[derive(Clone)]
pub struct PipelineData {
    /// The current image (color, grayscale or binary depending on the stage)
    pub image: DynamicImage,

    /// File the image was loaded from
    pub source: PathBuf,

    /// Raw OCR text, once recognition has run
    pub text: Option<String>,

    /// Normalized phone numbers, once extraction has run
    pub numbers: BTreeSet<String>,
}

impl PipelineData {
    pub fn new(image: DynamicImage, source: impl Into<PathBuf>) -> Self {
        Self {
            image,
            source: source.into(),
            text: None,
            numbers: BTreeSet::new(),
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    fn process(&self, data: PipelineData) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(ScanError::DebugOutput(format!(
                    "debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step on one image. `index` numbers the debug directory.
    pub fn run(&self, input: DynamicImage, source: &Path, index: usize) -> Result<PipelineData> {
        let debug_dir = self.debug_dir(source, index)?;
        if let Some(dir) = &debug_dir {
            save_image(&input, &dir.join("00_input.png"))?;
        }

        let mut data = PipelineData::new(input, source);
        for (step_idx, step) in self.steps.iter().enumerate() {
            debug!("Running step: {} on {}", step.name(), source.display());
            data = step.process(data)?;

            if let Some(dir) = &debug_dir {
                let file_name = format!("{:02}_{}.png", step_idx + 1, slug(step.name()));
                save_image(&data.image, &dir.join(file_name))?;
            }
        }

        if let (Some(dir), Some(text)) = (&debug_dir, &data.text) {
            std::fs::write(dir.join("ocr.txt"), text)?;
        }

        Ok(data)
    }

    fn debug_dir(&self, source: &Path, index: usize) -> Result<Option<PathBuf>> {
        let Some(debug) = &self.debug else {
            return Ok(None);
        };
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let dir = debug.output_dir.join(format!("{:02}_{}", index + 1, slug(&stem)));
        std::fs::create_dir_all(&dir)?;
        Ok(Some(dir))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .map_err(|e| ScanError::DebugOutput(format!("failed to save {}: {}", path.display(), e)))?;
    debug!("Debug: saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    struct InvertStep;

    impl PipelineStep for InvertStep {
        fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
            data.image.invert();
            Ok(data)
        }

        fn name(&self) -> &str {
            "Invert Colors"
        }
    }

    struct TagStep;

    impl PipelineStep for TagStep {
        fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
            data.text = Some("tagged".to_string());
            Ok(data)
        }

        fn name(&self) -> &str {
            "Tag"
        }
    }

    fn white_image() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([255])))
    }

    #[test]
    fn test_steps_run_in_order() {
        let pipeline = Pipeline::new()
            .add_step(Arc::new(InvertStep))
            .add_step(Arc::new(TagStep));
        assert_eq!(pipeline.step_names(), vec!["Invert Colors", "Tag"]);

        let data = pipeline.run(white_image(), Path::new("a.png"), 0).unwrap();
        assert_eq!(data.image.to_luma8().get_pixel(0, 0)[0], 0);
        assert_eq!(data.text.as_deref(), Some("tagged"));
        assert_eq!(data.source, PathBuf::from("a.png"));
    }

    #[test]
    fn test_debug_outputs_per_step() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("debug");
        let pipeline = Pipeline::new()
            .add_step(Arc::new(InvertStep))
            .add_step(Arc::new(TagStep))
            .with_debug(out.clone())
            .unwrap();

        pipeline.run(white_image(), Path::new("/scans/Card Front.png"), 2).unwrap();

        let image_dir = out.join("03_card_front");
        assert!(image_dir.join("00_input.png").exists());
        assert!(image_dir.join("01_invert_colors.png").exists());
        assert!(image_dir.join("02_tag.png").exists());
        assert_eq!(std::fs::read_to_string(image_dir.join("ocr.txt")).unwrap(), "tagged");
    }

    #[test]
    fn test_debug_dir_must_be_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("leftover.txt"), "x").unwrap();
        let result = Pipeline::new().with_debug(dir.path().to_path_buf());
        assert!(matches!(result, Err(ScanError::DebugOutput(_))));
    }
}
