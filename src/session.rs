//! Session controller: owns the current image selection and result set and
//! runs the per-image pipeline over the selection on request.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::detection::{build_standard_pipeline, ocr::recognizer_from_config, preprocessing};
use crate::error::{Result, ScanError};
use crate::models::{CopyPayload, ImageFailure, ProcessReport, ResultSet, Selection, is_supported_image};
use crate::pipeline::Pipeline;

pub struct Session {
    pipeline: Pipeline,
    images: Vec<PathBuf>,
    results: ResultSet,
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            images: Vec::new(),
            results: ResultSet::new(),
        }
    }

    /// Session with the standard pipeline and the configured OCR backend,
    /// optionally dumping every stage into `debug_out`.
    pub fn from_config(config: &AppConfig, debug_out: Option<PathBuf>) -> Result<Self> {
        let recognizer = recognizer_from_config(&config.ocr)?;
        let mut pipeline = build_standard_pipeline(&config.preprocess, recognizer);
        if let Some(dir) = debug_out {
            pipeline = pipeline.with_debug(dir)?;
        }
        Ok(Self::new(pipeline))
    }

    /// Replace the current selection with the supported paths in `paths`.
    ///
    /// An empty input (e.g. a cancelled dialog) keeps the previous selection.
    /// Any other input replaces it, even when none of the files is supported.
    pub fn select_images<I, P>(&mut self, paths: I) -> Selection
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Selection::default();
        }

        let (accepted, rejected): (Vec<PathBuf>, Vec<PathBuf>) =
            paths.into_iter().partition(|path| is_supported_image(path));

        for path in &rejected {
            warn!("Skipping unsupported file: {}", path.display());
        }

        let count = accepted.len();
        self.images = accepted;
        info!("{} image(s) selected", count);

        Selection {
            accepted: count,
            rejected,
        }
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// First selected image, used for the preview
    pub fn first_image(&self) -> Option<&Path> {
        self.images.first().map(PathBuf::as_path)
    }

    /// Run every selected image through the pipeline and replace the result set.
    ///
    /// Images that fail to decode are skipped and reported. Any other error
    /// aborts the run and leaves the previous results in place.
    pub fn process(&mut self) -> Result<ProcessReport> {
        if self.images.is_empty() {
            warn!("No image selected");
            return Err(ScanError::NoImagesSelected);
        }

        info!("Extracting numbers from {} image(s)...", self.images.len());

        let mut results = ResultSet::new();
        let mut report = ProcessReport {
            images: self.images.len(),
            ..ProcessReport::default()
        };

        for (index, path) in self.images.iter().enumerate() {
            match self.process_image(path, index) {
                Ok(numbers) => {
                    results.merge(numbers);
                    report.processed += 1;
                }
                Err(e) if !e.is_fatal() => {
                    warn!("{}", e);
                    report.failures.push(ImageFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    error!("Processing aborted: {}", e);
                    return Err(e);
                }
            }
        }

        report.unique_numbers = results.len();
        self.results = results;

        info!(
            "Found {} unique number(s) in {} image(s), {} failed",
            report.unique_numbers,
            report.processed,
            report.failures.len()
        );
        Ok(report)
    }

    fn process_image(&self, path: &Path, index: usize) -> Result<BTreeSet<String>> {
        let image = preprocessing::load_image(path)?;
        let data = self.pipeline.run(image, path, index)?;
        Ok(data.numbers)
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// Clipboard payload: all numbers newline-joined in ascending order
    pub fn copy_text(&self) -> Result<CopyPayload> {
        if self.results.is_empty() {
            return Err(ScanError::EmptyResultCopy);
        }
        Ok(CopyPayload {
            text: self.results.joined(),
            count: self.results.len(),
        })
    }
}
