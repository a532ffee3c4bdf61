mod app;
mod message;
mod state;
mod widgets;

use std::path::PathBuf;

use crate::config::AppConfig;

pub use app::PhoneGrabApp;
pub use message::Message;
pub use state::{AppState, Notice, NoticeLevel};

/// Open the main window and block until it is closed
pub fn run(config: AppConfig, debug_out: Option<PathBuf>) -> iced::Result {
    iced::application(
        move || PhoneGrabApp::new(&config, debug_out.clone()),
        PhoneGrabApp::update,
        PhoneGrabApp::view,
    )
    .title("Phone Number Extractor")
    .window_size((700.0, 500.0))
    .run()
}
