use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::preview::PreviewRegistry;
use crate::route::Route;
use crate::state::catalog::{Catalog, CatalogEntry};
use crate::state::data::{find_choice, PRODUCT_TYPES};
use crate::Message;

/// Grid of every product saved this session
pub fn view<'a>(catalog: &'a Catalog, previews: &'a PreviewRegistry, tile_size: f32) -> Element<'a, Message> {
    let header = row![
        text("Products").size(28).width(Length::Fill),
        button("Register New Product").on_press(Message::Navigate(Route::ProductForm)),
    ];

    if catalog.is_empty() {
        return column![header, text("No products yet.").size(16)]
            .spacing(20)
            .padding(24)
            .into();
    }

    let cards: Vec<Element<Message>> = catalog
        .entries()
        .iter()
        .map(|entry| card(entry, previews, tile_size))
        .collect();

    let grid = Wrap::with_elements(cards)
        .spacing(Pixels(16.0))
        .line_spacing(Pixels(16.0));

    column![header, scrollable(grid)]
        .spacing(20)
        .padding(24)
        .into()
}

fn card<'a>(entry: &'a CatalogEntry, previews: &'a PreviewRegistry, tile_size: f32) -> Element<'a, Message> {
    let record = &entry.record;
    let id = entry.id().to_string();

    let cover: Element<Message> = match record.images.first().and_then(|img| super::image_handle(img, previews)) {
        Some(handle) => image(handle)
            .width(Length::Fixed(tile_size))
            .height(Length::Fixed(tile_size))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("No image").size(12))
            .center_x(Length::Fixed(tile_size))
            .center_y(Length::Fixed(tile_size))
            .into(),
    };

    let kind = find_choice(&PRODUCT_TYPES, &record.product_type)
        .map(|choice| choice.label.to_string())
        .unwrap_or_else(|| record.product_type.clone());

    let content = column![
        cover,
        text(record.display_title()).size(16),
        text(kind).size(12),
        text(format!("Saved {}", entry.saved_at.format("%Y-%m-%d %H:%M"))).size(12),
        row![
            button(text("View").size(12))
                .on_press(Message::Navigate(Route::ProductDetail(id.clone()))),
            button(text("Edit").size(12))
                .on_press(Message::EditProduct(id))
                .style(button::secondary),
        ]
        .spacing(6),
    ]
    .spacing(6)
    .width(Length::Fixed(tile_size + 24.0));

    container(content)
        .padding(12)
        .style(container::rounded_box)
        .into()
}
