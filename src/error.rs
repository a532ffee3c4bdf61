use std::path::PathBuf;

/// Errors surfaced by selection, processing and copy operations.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Processing was requested with an empty selection.
    #[error("no image selected")]
    NoImagesSelected,

    /// An image file could not be opened or decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The OCR engine is missing or misconfigured.
    #[error("OCR engine unavailable: {0}")]
    OcrEngineUnavailable(String),

    /// Copy was requested while the result set is empty.
    #[error("no numbers to copy")]
    EmptyResultCopy,

    #[error("debug output failed: {0}")]
    DebugOutput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Errors that end the whole batch rather than a single image.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScanError::ImageDecode { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
