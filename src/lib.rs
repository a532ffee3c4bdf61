pub mod config;
pub mod detection;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod session;

pub use config::AppConfig;
pub use detection::build_standard_pipeline;
pub use detection::ocr::{TextRecognizer, recognizer_from_config};
pub use error::ScanError;
pub use extraction::extract_numbers;
pub use models::{CopyPayload, ImageFailure, ProcessReport, ResultSet, Selection};
pub use pipeline::{Pipeline, PipelineData, PipelineStep};
pub use session::Session;

#[cfg(feature = "gui")]
pub mod gui;
