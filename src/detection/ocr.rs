use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::GrayImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info};

use crate::config::{OcrBackend, OcrConfig};
use crate::error::{Result, ScanError};

/// Anything that turns a preprocessed image into text.
///
/// Implementations may return empty or garbled text for unreadable input;
/// an `Err` means the engine itself could not be used.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &GrayImage) -> Result<String>;

    /// Human-readable engine name (used in logs)
    fn name(&self) -> &str;
}

/// Build the recognizer selected in the configuration
pub fn recognizer_from_config(config: &OcrConfig) -> Result<Arc<dyn TextRecognizer>> {
    match config.backend {
        OcrBackend::Ocrs => Ok(Arc::new(OcrsRecognizer::new(config))),
        #[cfg(feature = "tesseract")]
        OcrBackend::Tesseract => Ok(Arc::new(TesseractRecognizer::new())),
        #[cfg(not(feature = "tesseract"))]
        OcrBackend::Tesseract => Err(ScanError::OcrEngineUnavailable(
            "this build was compiled without the `tesseract` feature".to_string(),
        )),
    }
}

/// Recognizer backed by the `ocrs` engine and its two `.rten` models.
///
/// The models are loaded on first use and shared by later calls.
pub struct OcrsRecognizer {
    detection_model: PathBuf,
    recognition_model: PathBuf,
    // Arc so the lock can be released before running recognition
    engine: Mutex<Option<Arc<OcrEngine>>>,
}

impl OcrsRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            detection_model: config.detection_model_path(),
            recognition_model: config.recognition_model_path(),
            engine: Mutex::new(None),
        }
    }

    fn engine(&self) -> Result<Arc<OcrEngine>> {
        let mut guard = self
            .engine
            .lock()
            .map_err(|_| ScanError::OcrEngineUnavailable("OCR engine lock poisoned".to_string()))?;
        if let Some(engine) = guard.as_ref() {
            return Ok(engine.clone());
        }

        info!("Initializing OCR engine...");
        let engine = Arc::new(self.load_engine()?);
        *guard = Some(engine.clone());
        info!("OCR engine initialized successfully");
        Ok(engine)
    }

    fn load_engine(&self) -> Result<OcrEngine> {
        if !self.detection_model.exists() || !self.recognition_model.exists() {
            return Err(ScanError::OcrEngineUnavailable(format!(
                "OCR models not found. Download them with `ocrs-cli` or set PHONEGRAB_MODEL_DIR.\n\
                 Expected locations:\n  - {}\n  - {}",
                self.detection_model.display(),
                self.recognition_model.display()
            )));
        }

        let detection_model = Model::load_file(&self.detection_model).map_err(|e| {
            ScanError::OcrEngineUnavailable(format!(
                "failed to load {}: {}",
                self.detection_model.display(),
                e
            ))
        })?;
        let recognition_model = Model::load_file(&self.recognition_model).map_err(|e| {
            ScanError::OcrEngineUnavailable(format!(
                "failed to load {}: {}",
                self.recognition_model.display(),
                e
            ))
        })?;

        OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|e| ScanError::OcrEngineUnavailable(e.to_string()))
    }
}

impl TextRecognizer for OcrsRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String> {
        let engine = self.engine()?;

        // The engine expects color input
        let rgb = image::DynamicImage::ImageLuma8(image.clone()).to_rgb8();

        Ok(text_or_empty(recognize_rgb(&engine, &rgb)))
    }

    fn name(&self) -> &str {
        "ocrs"
    }
}

fn recognize_rgb(engine: &OcrEngine, rgb: &image::RgbImage) -> anyhow::Result<String> {
    let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
        .map_err(|e| anyhow::anyhow!("OCR input rejected: {:?}", e))?;
    let input = engine.prepare_input(source)?;
    engine.get_text(&input)
}

/// A failure on one image counts as unreadable input, not as a dead engine
fn text_or_empty(result: anyhow::Result<String>) -> String {
    result.unwrap_or_else(|e| {
        debug!("OCR failed on image, treating as empty text: {}", e);
        String::new()
    })
}

/// Recognizer that shells out to the system Tesseract install.
#[cfg(feature = "tesseract")]
pub struct TesseractRecognizer {
    args: rusty_tesseract::Args,
}

#[cfg(feature = "tesseract")]
impl TesseractRecognizer {
    pub fn new() -> Self {
        // Default recognition profile; no language hint
        Self {
            args: rusty_tesseract::Args::default(),
        }
    }
}

#[cfg(feature = "tesseract")]
impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tesseract")]
impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String> {
        let dynamic = image::DynamicImage::ImageLuma8(image.clone());
        let tess_img = rusty_tesseract::Image::from_dynamic_image(&dynamic)
            .map_err(|e| ScanError::OcrEngineUnavailable(format!("failed to hand image to tesseract: {}", e)))?;
        rusty_tesseract::image_to_string(&tess_img, &self.args)
            .map_err(|e| ScanError::OcrEngineUnavailable(format!("tesseract failed: {}", e)))
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
