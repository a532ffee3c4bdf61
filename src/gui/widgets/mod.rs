use iced::widget::{Column, container, scrollable, text};
use iced::{Color, Element, Length};

use crate::gui::state::{Notice, NoticeLevel};
use crate::models::ResultSet;

impl NoticeLevel {
    fn color(self) -> Color {
        match self {
            NoticeLevel::Info => Color::from_rgb8(0x9a, 0xa5, 0xb1),
            NoticeLevel::Warning => Color::from_rgb8(0xe5, 0xa5, 0x0a),
            NoticeLevel::Error => Color::from_rgb8(0xe0, 0x4f, 0x4f),
        }
    }
}

pub fn notice_bar<'a, Message: 'a>(notice: Option<&Notice>) -> Element<'a, Message> {
    match notice {
        Some(notice) => text(notice.text.clone()).color(notice.level.color()).into(),
        None => text("").into(),
    }
}

/// Scrollable list of numbers in display order
pub fn result_list<'a, Message: 'a>(results: &ResultSet) -> Element<'a, Message> {
    let rows = results
        .iter()
        .map(|number| text(number.to_string()).size(16).into());

    container(scrollable(Column::with_children(rows).spacing(4).width(Length::Fill)))
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
