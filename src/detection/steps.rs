use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::detection::ocr::TextRecognizer;
use crate::detection::preprocessing::{self, ThresholdMode};
use crate::error::Result;
use crate::extraction;
use crate::pipeline::{PipelineData, PipelineStep};

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        data.image = DynamicImage::ImageLuma8(preprocessing::to_grayscale(&data.image));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Global black/white threshold
pub struct ThresholdStep {
    pub mode: ThresholdMode,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let level = self.mode.level_for(&gray);
        debug!("Threshold level {} for {}", level, data.source.display());
        data.image = DynamicImage::ImageLuma8(preprocessing::binarize(&gray, level));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Threshold"
    }
}

/// Run OCR on the preprocessed image
pub struct OcrStep {
    recognizer: Arc<dyn TextRecognizer>,
}

impl OcrStep {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self { recognizer }
    }
}

impl PipelineStep for OcrStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let text = self.recognizer.recognize(&data.image.to_luma8())?;
        debug!(
            "{} recognized {} characters in {}",
            self.recognizer.name(),
            text.chars().count(),
            data.source.display()
        );
        data.text = Some(text);
        Ok(data)
    }

    fn name(&self) -> &str {
        "OCR Recognition"
    }
}

/// Pull phone numbers out of the recognized text
pub struct ExtractNumbersStep;

impl PipelineStep for ExtractNumbersStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        data.numbers = data
            .text
            .as_deref()
            .map(extraction::extract_numbers)
            .unwrap_or_default();
        debug!("{} numbers in {}", data.numbers.len(), data.source.display());
        Ok(data)
    }

    fn name(&self) -> &str {
        "Number Extraction"
    }
}
