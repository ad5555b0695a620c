/// Shared data structures for the application state
///
/// These structs represent the product record that flows between
/// the form, the session catalog and the views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::preview::PreviewId;

/// Maximum number of images a product can carry
pub const MAX_IMAGES: usize = 3;

/// A single product in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Catalog identifier (None until the record is first saved)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Product title, required at submit time
    pub title: String,
    /// Product type, one of [`PRODUCT_TYPES`] in practice but stored freely
    #[serde(rename = "type")]
    pub product_type: String,
    pub ingredients: String,
    pub manufacturer: String,
    pub location: String,
    /// Fair or trade show where the product was presented
    pub fair: String,
    /// Selected certification tags
    pub seals: Vec<String>,
    /// e.g. "Size, Color, Flavor"
    pub variations: String,
    /// Available for export
    pub export_options: bool,
    pub observations: String,
    /// Product images, never more than [`MAX_IMAGES`]
    pub images: Vec<ImageRef>,
}

impl ProductRecord {
    /// Title to show in lists, falling back for untitled records
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            "Untitled product"
        } else {
            title
        }
    }

    /// Convert to pretty JSON for the detail view
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Reference to one product image
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageRef {
    /// Locally selected file rendered through a revocable preview handle
    Preview { id: PreviewId, path: PathBuf },
    /// Image that already belonged to the record when it was opened
    Stored { uri: String },
}

impl ImageRef {
    /// Build a reference to a pre-existing image
    #[cfg(test)]
    pub fn stored(uri: impl Into<String>) -> Self {
        ImageRef::Stored { uri: uri.into() }
    }

    /// True when this reference is backed by a preview handle
    pub fn is_transient(&self) -> bool {
        matches!(self, ImageRef::Preview { .. })
    }

    /// The preview handle backing this reference, if any
    pub fn preview_id(&self) -> Option<PreviewId> {
        match self {
            ImageRef::Preview { id, .. } => Some(*id),
            ImageRef::Stored { .. } => None,
        }
    }
}

/// A file the user selected but has not submitted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    /// Filename only (e.g., "jar.png")
    pub name: String,
}

impl StagedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }
}

/// One entry of a fixed option list (stored value + visible label)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Options offered by the type picker
pub static PRODUCT_TYPES: [Choice; 4] = [
    Choice { value: "food", label: "Food" },
    Choice { value: "beverage", label: "Beverage" },
    Choice { value: "cosmetic", label: "Cosmetic" },
    Choice { value: "other", label: "Other" },
];

/// Options offered by the seal/certification picker
pub static SEALS: [Choice; 4] = [
    Choice { value: "organic", label: "Organic" },
    Choice { value: "fair-trade", label: "Fair Trade" },
    Choice { value: "eco-friendly", label: "Eco-Friendly" },
    Choice { value: "vegan", label: "Vegan" },
];

/// Find the choice whose stored value is `value`
pub fn find_choice(options: &[Choice], value: &str) -> Option<Choice> {
    options.iter().copied().find(|choice| choice.value == value)
}
