use std::path::Path;

use image::{DynamicImage, GrayImage, ImageError, ImageReader, Luma};
use imageproc::contrast::otsu_level;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Luminance cutoff used when no threshold is configured
pub const DEFAULT_THRESHOLD: u8 = 128;

/// How the grayscale image is split into black and white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Pixels below the level become black, the rest white
    Fixed(u8),
    /// Level picked per image with Otsu's method
    Otsu,
}

impl Default for ThresholdMode {
    fn default() -> Self {
        ThresholdMode::Fixed(DEFAULT_THRESHOLD)
    }
}

impl ThresholdMode {
    /// Resolve the cutoff for a given grayscale image
    pub fn level_for(&self, gray: &GrayImage) -> u8 {
        match self {
            ThresholdMode::Fixed(level) => *level,
            // otsu_level is the last background value, so the cutoff sits one above it
            ThresholdMode::Otsu => otsu_level(gray).saturating_add(1),
        }
    }
}

impl std::str::FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("otsu") {
            return Ok(ThresholdMode::Otsu);
        }
        s.parse::<u8>()
            .map(ThresholdMode::Fixed)
            .map_err(|_| format!("expected a level between 0 and 255 or \"otsu\", got {s:?}"))
    }
}

/// Open and decode an image file
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.with_guessed_format().map_err(ImageError::IoError))
        .and_then(|reader| reader.decode())
        .map_err(|source| ScanError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Map pixels below `level` to black (0) and everything else to white (255)
pub fn binarize(gray: &GrayImage, level: u8) -> GrayImage {
    let mut out = gray.clone();
    for pixel in out.pixels_mut() {
        *pixel = if pixel[0] < level { Luma([0]) } else { Luma([255]) };
    }
    out
}

/// Grayscale + global threshold, ready for OCR
pub fn preprocess(img: &DynamicImage, mode: ThresholdMode) -> GrayImage {
    let gray = to_grayscale(img);
    let level = mode.level_for(&gray);
    binarize(&gray, level)
}
