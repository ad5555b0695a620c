/// Product form view
/// Renders a [`ProductForm`] and emits [`FormMessage`]s; the parent maps them.
use iced::widget::{
    button, checkbox, column, container, horizontal_rule, horizontal_space, image, pick_list,
    row, scrollable, text, text_input, Column, Row,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::preview::PreviewRegistry;
use crate::state::data::{find_choice, ImageRef, PRODUCT_TYPES, SEALS};
use crate::state::form::{Field, FormMessage, ProductForm, SelectField, TextField};

const ERROR_COLOR: Color = Color {
    r: 0.9,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

pub fn view<'a>(
    form: &'a ProductForm,
    previews: &'a PreviewRegistry,
    tile_size: f32,
) -> Element<'a, FormMessage> {
    let record = form.record();

    let header = column![
        text(form.heading()).size(28),
        text("Fill in the product details below. Fields marked with * are required.").size(14),
    ]
    .spacing(6);

    // ========== Basic Information ==========
    let type_picker = pick_list(
        &PRODUCT_TYPES[..],
        find_choice(&PRODUCT_TYPES, &record.product_type),
        |choice| FormMessage::Selected(SelectField::Type, choice.value.to_string()),
    )
    .placeholder("Select type")
    .width(Length::Fill);

    let basic = column![
        section_title("Basic Information"),
        row![
            labeled(
                "Title *",
                text_field(TextField::Title, "", &record.title),
                form.error(Field::Title),
            ),
            labeled("Type", type_picker.into(), form.error(Field::Type)),
        ]
        .spacing(16),
        labeled(
            "Ingredients",
            text_field(TextField::Ingredients, "List the ingredients here...", &record.ingredients),
            form.error(Field::Ingredients),
        ),
    ]
    .spacing(12);

    // ========== Origin Information ==========
    let origin = column![
        section_title("Origin Information"),
        row![
            labeled(
                "Manufacturer",
                text_field(TextField::Manufacturer, "", &record.manufacturer),
                form.error(Field::Manufacturer),
            ),
            labeled(
                "Location",
                text_field(TextField::Location, "", &record.location),
                form.error(Field::Location),
            ),
            labeled(
                "Fair",
                text_field(TextField::Fair, "", &record.fair),
                form.error(Field::Fair),
            ),
        ]
        .spacing(16),
    ]
    .spacing(12);

    // ========== Additional Information ==========
    let seal_picker = pick_list(
        &SEALS[..],
        record.seals.first().and_then(|seal| find_choice(&SEALS, seal)),
        |choice| FormMessage::Selected(SelectField::Seals, choice.value.to_string()),
    )
    .placeholder("Select certification")
    .width(Length::Fill);

    let additional = column![
        section_title("Additional Information"),
        row![
            labeled("Seals/Certifications", seal_picker.into(), form.error(Field::Seals)),
            labeled(
                "Variations",
                text_field(TextField::Variations, "e.g. Size, Color, Flavor", &record.variations),
                form.error(Field::Variations),
            ),
        ]
        .spacing(16),
        checkbox("Available for export", record.export_options)
            .on_toggle(FormMessage::ExportToggled),
        labeled(
            "Observations",
            text_field(
                TextField::Observations,
                "Additional notes about the product...",
                &record.observations,
            ),
            form.error(Field::Observations),
        ),
    ]
    .spacing(12);

    // ========== Images ==========
    let mut tiles: Row<FormMessage> = Row::new().spacing(12);
    for (index, preview) in form.previews().into_iter().enumerate() {
        tiles = tiles.push(image_tile(form, preview, previews, index, tile_size));
    }
    if form.remaining_slots() > 0 {
        tiles = tiles.push(
            button(
                container(text("Upload image").size(12))
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
            )
            .on_press(FormMessage::PickImages)
            .style(button::secondary)
            .width(Length::Fixed(tile_size))
            .height(Length::Fixed(tile_size)),
        );
    }

    let mut images = column![
        section_title("Product Images"),
        text("Upload up to 3 images of the product.").size(14),
        tiles,
    ]
    .spacing(12);
    if let Some(error) = form.error(Field::Images) {
        images = images.push(text(error).size(14).color(ERROR_COLOR));
    }

    // ========== Footer ==========
    let notice = if form.has_errors() {
        text("Please fix the highlighted fields.").size(13).color(ERROR_COLOR)
    } else {
        text("")
    };

    let footer = row![
        notice,
        horizontal_space(),
        button("Cancel")
            .on_press(FormMessage::Cancel)
            .style(button::secondary),
        button("Reset")
            .on_press(FormMessage::Reset)
            .style(button::secondary),
        button(form.submit_label()).on_press(FormMessage::Submit),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let content = column![
        header,
        basic,
        horizontal_rule(1),
        origin,
        horizontal_rule(1),
        additional,
        horizontal_rule(1),
        images,
        horizontal_rule(1),
        footer,
    ]
    .spacing(20)
    .padding(24)
    .max_width(900.0);

    scrollable(container(content).center_x(Length::Fill)).into()
}

fn section_title(title: &str) -> Element<'_, FormMessage> {
    text(title).size(18).into()
}

fn text_field<'a>(
    field: TextField,
    placeholder: &'a str,
    value: &'a str,
) -> Element<'a, FormMessage> {
    let input = text_input(placeholder, value)
        .on_input(move |value| FormMessage::TextChanged(field, value))
        .padding(8);

    if field == TextField::Title {
        // Enter in the title submits the form
        input.on_submit(FormMessage::Submit).into()
    } else {
        input.into()
    }
}

/// A label above a control, with the field's error underneath
fn labeled<'a>(
    label: &'a str,
    control: Element<'a, FormMessage>,
    error: Option<&'a str>,
) -> Element<'a, FormMessage> {
    let mut field: Column<FormMessage> = column![text(label).size(14), control].spacing(6);
    if let Some(error) = error {
        field = field.push(text(error).size(13).color(ERROR_COLOR));
    }
    field.width(Length::Fill).into()
}

fn image_tile<'a>(
    form: &ProductForm,
    preview: ImageRef,
    previews: &'a PreviewRegistry,
    index: usize,
    tile_size: f32,
) -> Element<'a, FormMessage> {
    let picture: Element<FormMessage> = match super::image_handle(&preview, previews) {
        Some(handle) => image(handle)
            .width(Length::Fixed(tile_size))
            .height(Length::Fixed(tile_size))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(format!("Product preview {}", index + 1)).size(12))
            .width(Length::Fixed(tile_size))
            .height(Length::Fixed(tile_size))
            .into(),
    };

    // Staged tiles come first, so `index` addresses the staged file directly
    let caption = if preview.is_transient() {
        form.staged_files()
            .get(index)
            .map(|file| file.name.clone())
            .unwrap_or_default()
    } else {
        "Saved image".to_string()
    };

    column![
        picture,
        text(caption).size(11),
        button(text("Remove").size(12))
            .on_press(FormMessage::RemoveImage(index))
            .style(button::danger)
            .padding(4),
    ]
    .spacing(4)
    .align_x(Alignment::Center)
    .into()
}
