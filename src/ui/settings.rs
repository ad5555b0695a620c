use iced::widget::{button, column, pick_list, row, slider, text};
use iced::{Element, Length};
use std::path::Path;

use crate::config::{AppConfig, ThemeChoice, MAX_THUMBNAIL_SIZE, MIN_THUMBNAIL_SIZE};
use crate::Message;

/// Configuration panel
pub fn view<'a>(config: &'a AppConfig, path: Option<&'a Path>) -> Element<'a, Message> {
    let location = match path {
        Some(path) => format!("Settings file: {}", path.display()),
        None => "Settings cannot be saved on this system.".to_string(),
    };

    let mut save = button("Save settings");
    if path.is_some() {
        save = save.on_press(Message::SaveSettings);
    }

    column![
        text("Configuration").size(28),
        row![
            text("Theme").width(Length::Fixed(160.0)),
            pick_list(ThemeChoice::ALL, Some(config.theme), Message::ThemeSelected),
        ]
        .spacing(12),
        row![
            text("Thumbnail size").width(Length::Fixed(160.0)),
            slider(
                MIN_THUMBNAIL_SIZE..=MAX_THUMBNAIL_SIZE,
                config.thumbnail_size,
                Message::ThumbnailSizeChanged,
            )
            .step(8u32)
            .width(Length::Fixed(240.0)),
            text(format!("{} px", config.thumbnail_size)),
        ]
        .spacing(12),
        text(format!("Image types: {}", config.image_extensions.join(", "))).size(14),
        text(location).size(12),
        save,
    ]
    .spacing(20)
    .padding(24)
    .into()
}
