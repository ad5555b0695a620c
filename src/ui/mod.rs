/// Views for each route
///
/// Every screen is a plain function from state to an `Element`; all state
/// changes go through `Message`s handled in `main.rs`.

pub mod detail;
pub mod form;
pub mod home;
pub mod list;
pub mod settings;

use iced::widget::image::Handle;

use crate::preview::PreviewRegistry;
use crate::state::data::ImageRef;

/// Render handle for an image reference (None once a preview is revoked)
pub fn image_handle(image: &ImageRef, previews: &PreviewRegistry) -> Option<Handle> {
    match image {
        ImageRef::Preview { id, .. } => previews.handle(*id).cloned(),
        ImageRef::Stored { uri } => Some(Handle::from_path(uri)),
    }
}
