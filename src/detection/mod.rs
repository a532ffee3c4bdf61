pub mod preprocessing;
pub mod ocr;
pub mod steps;

use std::sync::Arc;

use crate::config::PreprocessConfig;
use crate::pipeline::Pipeline;
use ocr::TextRecognizer;
use steps::*;

/// Build the standard per-image pipeline:
/// grayscale → threshold → OCR → number extraction
pub fn build_standard_pipeline(
    preprocess: &PreprocessConfig,
    recognizer: Arc<dyn TextRecognizer>,
) -> Pipeline {
    Pipeline::new()
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(ThresholdStep {
            mode: preprocess.threshold,
        }))
        .add_step(Arc::new(OcrStep::new(recognizer)))
        .add_step(Arc::new(ExtractNumbersStep))
}
