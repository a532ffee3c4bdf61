use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    SelectImages,
    /// Paths picked in the file dialog (empty when cancelled)
    ImagesSelected(Vec<PathBuf>),
    ProcessOcr,
    CopyAll,
}
