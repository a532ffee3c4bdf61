use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File extensions accepted by image selection (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Unique phone numbers found during one processing run.
///
/// Iteration is in plain string order, so `+`-prefixed numbers come before
/// digit-only ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    numbers: BTreeSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, numbers: impl IntoIterator<Item = String>) {
        self.numbers.extend(numbers);
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.numbers.iter().map(String::as_str)
    }

    /// All numbers, newline-joined, in ascending order
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }
}

/// Outcome of replacing the current image selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub accepted: usize,
    /// Paths skipped because of their extension
    pub rejected: Vec<PathBuf>,
}

/// An image that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of one processing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub images: usize,
    pub processed: usize,
    pub failures: Vec<ImageFailure>,
    pub unique_numbers: usize,
}

/// Text handed to the clipboard by a copy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPayload {
    pub text: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_set(numbers: &[&str]) -> ResultSet {
        let mut set = ResultSet::new();
        set.merge(numbers.iter().map(|n| n.to_string()));
        set
    }

    #[test]
    fn test_lexicographic_order() {
        let set = result_set(&["442079460958", "12345678", "+15551234567"]);
        let ordered: Vec<&str> = set.iter().collect();
        assert_eq!(ordered, vec!["+15551234567", "12345678", "442079460958"]);
        assert_eq!(set.joined(), "+15551234567\n12345678\n442079460958");
    }

    #[test]
    fn test_plain_string_order_not_numeric() {
        let set = result_set(&["9000000000", "10000000000"]);
        let ordered: Vec<&str> = set.iter().collect();
        assert_eq!(ordered, vec!["10000000000", "9000000000"]);
    }

    #[test]
    fn test_merge_deduplicates() {
        let mut set = ResultSet::new();
        set.merge(vec!["5551234567".to_string()]);
        set.merge(vec!["5551234567".to_string(), "+4930123456".to_string()]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["+4930123456", "5551234567"]);
    }

    #[test]
    fn test_empty_joined() {
        assert_eq!(ResultSet::new().joined(), "");
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("scan.png")));
        assert!(is_supported_image(Path::new("/tmp/IMG_01.JPG")));
        assert!(is_supported_image(Path::new("photo.jpeg")));
        assert!(is_supported_image(Path::new("old.Bmp")));
        assert!(!is_supported_image(Path::new("doc.pdf")));
        assert!(!is_supported_image(Path::new("README")));
    }
}
