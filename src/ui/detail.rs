use iced::widget::{button, column, container, image, row, scrollable, text, Column, Row};
use iced::{ContentFit, Element, Font, Length};

use crate::preview::PreviewRegistry;
use crate::route::Route;
use crate::state::catalog::CatalogEntry;
use crate::state::data::{find_choice, PRODUCT_TYPES, SEALS};
use crate::Message;

pub fn view<'a>(entry: &'a CatalogEntry, previews: &'a PreviewRegistry, tile_size: f32) -> Element<'a, Message> {
    let record = &entry.record;
    let id = entry.id().to_string();

    let kind = find_choice(&PRODUCT_TYPES, &record.product_type)
        .map(|choice| choice.label.to_string())
        .unwrap_or_else(|| record.product_type.clone());

    let seals = record
        .seals
        .iter()
        .map(|seal| find_choice(&SEALS, seal).map_or(seal.as_str(), |choice| choice.label))
        .collect::<Vec<_>>()
        .join(", ");

    let fields = [
        ("Type", kind),
        ("Ingredients", record.ingredients.clone()),
        ("Manufacturer", record.manufacturer.clone()),
        ("Location", record.location.clone()),
        ("Fair", record.fair.clone()),
        ("Seals/Certifications", seals),
        ("Variations", record.variations.clone()),
        (
            "Available for export",
            if record.export_options { "Yes" } else { "No" }.to_string(),
        ),
        ("Observations", record.observations.clone()),
    ];

    let mut details: Column<Message> = Column::new().spacing(8);
    for (label, value) in fields {
        let value = if value.is_empty() { "-".to_string() } else { value };
        details = details.push(row![text(label).size(14).width(Length::Fixed(180.0)), text(value).size(14)]);
    }

    let mut gallery: Row<Message> = Row::new().spacing(12);
    for img in &record.images {
        if let Some(handle) = super::image_handle(img, previews) {
            gallery = gallery.push(
                image(handle)
                    .width(Length::Fixed(tile_size))
                    .height(Length::Fixed(tile_size))
                    .content_fit(ContentFit::Cover),
            );
        }
    }

    let raw = match record.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "could not render product as JSON");
            String::new()
        }
    };
    let raw = container(text(raw).size(12).font(Font::MONOSPACE))
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box);

    let actions = row![
        button("Back").on_press(Message::Navigate(Route::ProductList)).style(button::secondary),
        button("Edit").on_press(Message::EditProduct(id.clone())),
        button("Delete").on_press(Message::DeleteProduct(id)).style(button::danger),
    ]
    .spacing(8);

    scrollable(
        column![
            text(record.display_title()).size(28),
            text(format!("Last saved {}", entry.saved_at.format("%Y-%m-%d %H:%M:%S UTC"))).size(12),
            gallery,
            details,
            text("Record").size(16),
            raw,
            actions,
        ]
        .spacing(20)
        .padding(24),
    )
    .into()
}

/// Shown for `/product-detail/<id>` when the id is unknown
pub fn missing(id: &str) -> Element<'static, Message> {
    column![
        text(format!("Product {} not found.", id)).size(18),
        button("Back to products").on_press(Message::Navigate(Route::ProductList)),
    ]
    .spacing(16)
    .padding(24)
    .into()
}
