use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::{GrayImage, ImageBuffer, Luma, Rgb};
use phonegrab::config::PreprocessConfig;
use phonegrab::{ScanError, Session, TextRecognizer, build_standard_pipeline};
use tempfile::TempDir;

/// Writes a small solid-color image into `dir` and returns its path.
/// Shades below 128 binarize to black, the rest to white.
pub fn write_test_image(dir: &TempDir, name: &str, shade: u8) -> PathBuf {
    let img = ImageBuffer::from_fn(40, 20, |_, _| Rgb([shade, shade, shade]));
    let path = dir.path().join(name);
    img.save(&path).expect("Failed to save test image");
    path
}

/// Writes a file with an image extension but no image inside.
pub fn write_corrupt_image(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"definitely not a png").expect("Failed to write corrupt image");
    path
}

/// Recognizer returning canned text chosen by the first pixel of the
/// (binarized) image, so each fixture image can "contain" its own text.
pub struct CannedRecognizer {
    by_pixel: HashMap<u8, String>,
    pub calls: Mutex<usize>,
}

impl CannedRecognizer {
    pub fn new(entries: &[(u8, &str)]) -> Arc<Self> {
        Arc::new(Self {
            by_pixel: entries.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            calls: Mutex::new(0),
        })
    }

    /// Every image yields the same text
    pub fn always(text: &str) -> Arc<Self> {
        Self::new(&[(0, text), (255, text)])
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TextRecognizer for CannedRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String, ScanError> {
        *self.calls.lock().unwrap() += 1;
        let Luma([value]) = *image.get_pixel(0, 0);
        Ok(self.by_pixel.get(&value).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Recognizer standing in for a missing OCR install.
pub struct MissingEngine;

impl TextRecognizer for MissingEngine {
    fn recognize(&self, _image: &GrayImage) -> Result<String, ScanError> {
        Err(ScanError::OcrEngineUnavailable("engine not installed".to_string()))
    }

    fn name(&self) -> &str {
        "missing"
    }
}

pub fn session_with(recognizer: Arc<dyn TextRecognizer>) -> Session {
    Session::new(build_standard_pipeline(&PreprocessConfig::default(), recognizer))
}
