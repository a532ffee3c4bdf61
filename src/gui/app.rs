use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{ContentFit, Element, Length, Task};
use rfd::AsyncFileDialog;

use super::widgets::{notice_bar, result_list};
use super::{AppState, Message, Notice};
use crate::config::AppConfig;
use crate::error::ScanError;
use crate::models::{ResultSet, SUPPORTED_EXTENSIONS};
use crate::session::Session;

pub struct PhoneGrabApp {
    state: AppState,
}

impl PhoneGrabApp {
    pub fn new(config: &AppConfig, debug_out: Option<PathBuf>) -> Self {
        let state = match Session::from_config(config, debug_out) {
            Ok(session) => AppState::new(Some(session), None),
            Err(e) => AppState::new(None, Some(Notice::error(e.to_string()))),
        };
        Self { state }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectImages => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Open Images")
                    .add_filter("Images", SUPPORTED_EXTENSIONS)
                    .pick_files(),
                |handles| {
                    Message::ImagesSelected(
                        handles
                            .unwrap_or_default()
                            .iter()
                            .map(|handle| handle.path().to_path_buf())
                            .collect(),
                    )
                },
            ),
            Message::ImagesSelected(paths) => {
                if paths.is_empty() {
                    return Task::none();
                }
                let Some(session) = self.state.session.as_mut() else {
                    return Task::none();
                };
                let selection = session.select_images(paths);
                self.state.preview = session.first_image().map(Handle::from_path);
                self.state.notice = Some(Notice::for_selection(&selection));
                Task::none()
            }
            Message::ProcessOcr => {
                let Some(session) = self.state.session.as_mut() else {
                    return Task::none();
                };
                // Runs on the UI thread; the window is unresponsive until done
                self.state.notice = Some(match session.process() {
                    Ok(report) if report.failures.is_empty() => {
                        Notice::info(format!("Found {} unique number(s)", report.unique_numbers))
                    }
                    Ok(report) => Notice::warning(format!(
                        "Found {} unique number(s); {} of {} image(s) could not be read",
                        report.unique_numbers,
                        report.failures.len(),
                        report.images
                    )),
                    Err(ScanError::NoImagesSelected) => Notice::warning("No image selected"),
                    Err(e) => Notice::error(e.to_string()),
                });
                Task::none()
            }
            Message::CopyAll => {
                let Some(session) = self.state.session.as_ref() else {
                    return Task::none();
                };
                match session.copy_text() {
                    Ok(payload) => {
                        self.state.notice =
                            Some(Notice::info(format!("{} number(s) copied", payload.count)));
                        iced::clipboard::write(payload.text)
                    }
                    Err(ScanError::EmptyResultCopy) => {
                        self.state.notice = Some(Notice::info("No numbers to copy"));
                        Task::none()
                    }
                    Err(e) => {
                        self.state.notice = Some(Notice::error(e.to_string()));
                        Task::none()
                    }
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let preview: Element<'_, Message> = match &self.state.preview {
            Some(handle) => iced::widget::image(handle.clone())
                .content_fit(ContentFit::Contain)
                .into(),
            None => text("Select one or more images").into(),
        };

        let ready = self.state.session.is_some();
        let buttons = row![
            button("Select Images").on_press_maybe(ready.then_some(Message::SelectImages)),
            button("Process OCR").on_press_maybe(ready.then_some(Message::ProcessOcr)),
        ]
        .spacing(10);

        let empty = ResultSet::new();
        let results = self
            .state
            .session
            .as_ref()
            .map(Session::results)
            .unwrap_or(&empty);

        let content = column![
            container(preview)
                .center_x(Length::Fill)
                .center_y(Length::Fixed(250.0)),
            buttons,
            notice_bar(self.state.notice.as_ref()),
            result_list(results),
            button("Copy All").on_press_maybe(ready.then_some(Message::CopyAll)),
        ]
        .spacing(10)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
