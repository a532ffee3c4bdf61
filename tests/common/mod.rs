mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from phonegrab for tests
pub use phonegrab::{ScanError, Session};
