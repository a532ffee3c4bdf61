use iced::widget::image::Handle;

use crate::models::Selection;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-line status message shown under the buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }

    /// Status line after the file dialog returns
    pub fn for_selection(selection: &Selection) -> Self {
        let skipped = selection.rejected.len();
        match (selection.accepted, skipped) {
            (0, _) => Self::warning(format!(
                "No supported image selected, {} unsupported file(s) skipped",
                skipped
            )),
            (accepted, 0) => Self::info(format!("{} image(s) selected", accepted)),
            (accepted, skipped) => Self::warning(format!(
                "{} image(s) selected, {} unsupported file(s) skipped",
                accepted, skipped
            )),
        }
    }
}

pub struct AppState {
    /// None when the OCR backend could not be set up at startup
    pub session: Option<Session>,
    pub preview: Option<Handle>,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(session: Option<Session>, notice: Option<Notice>) -> Self {
        Self {
            session,
            preview: None,
            notice,
        }
    }
}
