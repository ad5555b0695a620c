/// Product form state
///
/// Holds the in-progress record, the per-field error map and the image
/// staging area. The view layer turns user input into [`FormMessage`]s and
/// the parent reacts to the [`FormOutcome`]s returned by [`ProductForm::update`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::data::{ImageRef, ProductRecord, StagedFile, MAX_IMAGES};
use crate::preview::{PreviewId, PreviewRegistry};

/// Error shown under an empty title
pub const TITLE_REQUIRED: &str = "Title is required";

/// Every field an error can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Type,
    Ingredients,
    Manufacturer,
    Location,
    Fair,
    Seals,
    Variations,
    ExportOptions,
    Observations,
    Images,
}

/// Fields edited through a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Ingredients,
    Manufacturer,
    Location,
    Fair,
    Variations,
    Observations,
}

/// Fields edited through a picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectField {
    Type,
    Seals,
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Title => Field::Title,
            TextField::Ingredients => Field::Ingredients,
            TextField::Manufacturer => Field::Manufacturer,
            TextField::Location => Field::Location,
            TextField::Fair => Field::Fair,
            TextField::Variations => Field::Variations,
            TextField::Observations => Field::Observations,
        }
    }
}

impl From<SelectField> for Field {
    fn from(field: SelectField) -> Self {
        match field {
            SelectField::Type => Field::Type,
            SelectField::Seals => Field::Seals,
        }
    }
}

/// User actions on the form
#[derive(Debug, Clone)]
pub enum FormMessage {
    TextChanged(TextField, String),
    Selected(SelectField, String),
    ExportToggled(bool),
    /// User clicked the upload tile
    PickImages,
    /// Files chosen in the picker
    FilesSelected(Vec<PathBuf>),
    RemoveImage(usize),
    Submit,
    Reset,
    Cancel,
}

/// What the parent has to act on after an update
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Validation passed; the finished record is handed over
    Submitted(ProductRecord),
    Cancelled,
    /// The parent should open a file picker
    PickRequested { multiple: bool },
    /// New preview handles were allocated and can be decoded
    Staged(Vec<PreviewId>),
}

pub struct ProductForm {
    /// Values the form was opened with, restored on reset
    initial: ProductRecord,
    record: ProductRecord,
    /// Staged files and their preview handles, kept in step
    staged_files: Vec<StagedFile>,
    staged_previews: Vec<PreviewId>,
    /// Images the record already had (shown after the staged ones)
    existing: Vec<ImageRef>,
    errors: BTreeMap<Field, String>,
}

impl ProductForm {
    /// Open the form with `initial` values, or an empty record
    pub fn new(initial: Option<ProductRecord>) -> Self {
        let mut initial = initial.unwrap_or_default();
        if initial.images.len() > MAX_IMAGES {
            tracing::warn!(
                count = initial.images.len(),
                "record has more than {} images, keeping the first ones",
                MAX_IMAGES
            );
            initial.images.truncate(MAX_IMAGES);
        }

        Self {
            existing: initial.images.clone(),
            record: initial.clone(),
            initial,
            staged_files: Vec::new(),
            staged_previews: Vec::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Apply one user action
    pub fn update(
        &mut self,
        message: FormMessage,
        previews: &mut PreviewRegistry,
    ) -> Option<FormOutcome> {
        match message {
            FormMessage::TextChanged(field, value) => {
                self.set_text(field, value);
                None
            }
            FormMessage::Selected(field, value) => {
                self.select(field, value);
                None
            }
            FormMessage::ExportToggled(checked) => {
                self.set_export(checked);
                None
            }
            FormMessage::PickImages => {
                if self.remaining_slots() == 0 {
                    return None;
                }
                Some(FormOutcome::PickRequested {
                    multiple: self.remaining_slots() > 1,
                })
            }
            FormMessage::FilesSelected(paths) => {
                let staged = self.stage_files(paths, previews);
                if staged.is_empty() {
                    None
                } else {
                    Some(FormOutcome::Staged(staged))
                }
            }
            FormMessage::RemoveImage(index) => {
                self.remove_image(index, previews);
                None
            }
            FormMessage::Submit => self.submit().map(FormOutcome::Submitted),
            FormMessage::Reset => {
                self.reset(previews);
                None
            }
            FormMessage::Cancel => Some(FormOutcome::Cancelled),
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        let slot = match field {
            TextField::Title => &mut self.record.title,
            TextField::Ingredients => &mut self.record.ingredients,
            TextField::Manufacturer => &mut self.record.manufacturer,
            TextField::Location => &mut self.record.location,
            TextField::Fair => &mut self.record.fair,
            TextField::Variations => &mut self.record.variations,
            TextField::Observations => &mut self.record.observations,
        };
        *slot = value;
        self.clear_error(field.into());
    }

    /// The seal picker is single-choice: the selection replaces all seals
    pub fn select(&mut self, field: SelectField, value: String) {
        match field {
            SelectField::Type => self.record.product_type = value,
            SelectField::Seals => self.record.seals = vec![value],
        }
        self.clear_error(field.into());
    }

    pub fn set_export(&mut self, checked: bool) {
        self.record.export_options = checked;
        self.clear_error(Field::ExportOptions);
    }

    /// Stage a batch of files while there is room; the rest are dropped.
    /// Returns the handles allocated for the accepted files.
    pub fn stage_files(
        &mut self,
        paths: Vec<PathBuf>,
        previews: &mut PreviewRegistry,
    ) -> Vec<PreviewId> {
        let offered = paths.len();
        let mut allocated = Vec::new();

        for path in paths {
            if self.preview_count() >= MAX_IMAGES {
                break;
            }
            let id = previews.create(&path);
            self.staged_files.push(StagedFile::from_path(path));
            self.staged_previews.push(id);
            allocated.push(id);
        }

        if allocated.len() < offered {
            tracing::debug!(
                offered,
                accepted = allocated.len(),
                "image cap reached, extra files dropped"
            );
        }

        self.clear_error(Field::Images);
        allocated
    }

    /// Remove the preview at `index` in [`ProductForm::previews`] order
    pub fn remove_image(&mut self, index: usize, previews: &mut PreviewRegistry) {
        if index < self.staged_files.len() {
            let id = self.staged_previews.remove(index);
            self.staged_files.remove(index);
            previews.revoke(id);
        } else if index - self.staged_files.len() < self.existing.len() {
            self.existing.remove(index - self.staged_files.len());
            self.record.images = self.existing.clone();
        } else {
            tracing::debug!(index, count = self.preview_count(), "remove index out of range");
        }
    }

    /// Check the record; replaces the error map. Returns true when valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        if self.record.title.trim().is_empty() {
            errors.insert(Field::Title, TITLE_REQUIRED.to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and, on success, produce the record to hand to the caller.
    ///
    /// The returned record lists existing images first and new uploads after
    /// them, so a product's cover image stays put when photos are added.
    /// Staged handles now belong to that record, so the form keeps them as
    /// existing images and never revokes them itself.
    pub fn submit(&mut self) -> Option<ProductRecord> {
        if !self.validate() {
            tracing::debug!(errors = self.errors.len(), "submit blocked by validation");
            return None;
        }

        let images: Vec<ImageRef> = self
            .existing
            .iter()
            .cloned()
            .chain(self.staged_refs())
            .collect();
        let mut record = self.record.clone();
        record.images = images.clone();

        self.staged_files.clear();
        self.staged_previews.clear();
        self.existing = images;

        Some(record)
    }

    /// Release staged previews and go back to the initial values
    pub fn reset(&mut self, previews: &mut PreviewRegistry) {
        self.release_staged(previews);
        self.record = self.initial.clone();
        self.existing = self.initial.images.clone();
        self.errors.clear();
    }

    /// Release staged previews before the form is dropped
    pub fn discard(mut self, previews: &mut PreviewRegistry) {
        self.release_staged(previews);
    }

    fn release_staged(&mut self, previews: &mut PreviewRegistry) {
        for id in self.staged_previews.drain(..) {
            previews.revoke(id);
        }
        self.staged_files.clear();
    }

    fn clear_error(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    fn staged_refs(&self) -> impl Iterator<Item = ImageRef> + '_ {
        self.staged_files
            .iter()
            .zip(&self.staged_previews)
            .map(|(file, id)| ImageRef::Preview {
                id: *id,
                path: file.path.clone(),
            })
    }

    /// Staged previews followed by existing images
    pub fn previews(&self) -> Vec<ImageRef> {
        self.staged_refs()
            .chain(self.existing.iter().cloned())
            .collect()
    }

    pub fn preview_count(&self) -> usize {
        self.staged_files.len() + self.existing.len()
    }

    pub fn remaining_slots(&self) -> usize {
        MAX_IMAGES.saturating_sub(self.preview_count())
    }

    pub fn record(&self) -> &ProductRecord {
        &self.record
    }

    pub fn staged_files(&self) -> &[StagedFile] {
        &self.staged_files
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Editing an existing record (it carries an id)
    pub fn is_editing(&self) -> bool {
        self.initial.id.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Product"
        } else {
            "Register New Product"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Product"
        } else {
            "Save Product"
        }
    }
}

impl std::fmt::Debug for ProductForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductForm")
            .field("record", &self.record)
            .field("staged", &self.staged_previews)
            .field("existing", &self.existing.len())
            .field("errors", &self.errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/tmp/{}", n))).collect()
    }

    fn record_with_images(uris: &[&str]) -> ProductRecord {
        ProductRecord {
            id: Some("p-1".to_string()),
            title: "Honey".to_string(),
            product_type: "food".to_string(),
            images: uris.iter().map(|u| ImageRef::stored(*u)).collect(),
            ..ProductRecord::default()
        }
    }

    /// Drive a submit and collect what the parent would receive
    fn submit_calls(form: &mut ProductForm, previews: &mut PreviewRegistry) -> Vec<ProductRecord> {
        let mut calls = Vec::new();
        if let Some(FormOutcome::Submitted(record)) = form.update(FormMessage::Submit, previews) {
            calls.push(record);
        }
        calls
    }

    #[test]
    fn test_empty_title_blocks_submit() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        form.set_text(TextField::Manufacturer, "Acme".to_string());

        assert!(submit_calls(&mut form, &mut previews).is_empty());
        assert_eq!(form.error(Field::Title), Some(TITLE_REQUIRED));
    }

    #[test]
    fn test_whitespace_title_is_empty() {
        let mut form = ProductForm::new(None);
        form.set_text(TextField::Title, "   ".to_string());

        assert!(form.submit().is_none());
        assert!(form.error(Field::Title).is_some());
    }

    #[test]
    fn test_valid_submit_hands_over_current_values_once() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        form.set_text(TextField::Title, "Green tea".to_string());
        form.select(SelectField::Type, "beverage".to_string());
        form.select(SelectField::Seals, "organic".to_string());
        form.set_export(true);
        form.stage_files(paths(&["tea.png"]), &mut previews);

        let calls = submit_calls(&mut form, &mut previews);
        assert_eq!(calls.len(), 1);

        let record = &calls[0];
        assert_eq!(record.title, "Green tea");
        assert_eq!(record.product_type, "beverage");
        assert_eq!(record.seals, vec!["organic".to_string()]);
        assert!(record.export_options);
        assert_eq!(record.images.len(), 1);
        assert!(record.images[0].is_transient());
        assert!(!form.has_errors());
    }

    #[test]
    fn test_submit_keeps_existing_images_first() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["cover.jpg"])));
        let ids = form.stage_files(paths(&["new.png"]), &mut previews);

        // shown first while editing
        assert!(form.previews()[0].is_transient());

        let record = form.submit().unwrap();
        assert_eq!(record.images[0], ImageRef::stored("cover.jpg"));
        assert_eq!(record.images[1].preview_id(), Some(ids[0]));
    }

    #[test]
    fn test_submitted_previews_survive_discard() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        form.set_text(TextField::Title, "Soap".to_string());
        let ids = form.stage_files(paths(&["soap.png"]), &mut previews);

        assert!(form.submit().is_some());
        form.discard(&mut previews);

        assert!(previews.is_live(ids[0]));
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = ProductForm::new(None);
        form.validate();
        assert!(form.error(Field::Title).is_some());

        form.set_text(TextField::Fair, "Biofach".to_string());
        assert!(form.error(Field::Title).is_some());

        form.set_text(TextField::Title, "J".to_string());
        assert!(form.error(Field::Title).is_none());
    }

    #[test]
    fn test_staging_never_exceeds_cap() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["https://cdn.example/a.jpg"])));

        let staged = form.stage_files(paths(&["1.png", "2.png", "3.png", "4.png"]), &mut previews);
        assert_eq!(staged.len(), 2);
        assert_eq!(form.preview_count(), MAX_IMAGES);
        assert_eq!(previews.len(), 2);

        let more = form.stage_files(paths(&["5.png"]), &mut previews);
        assert!(more.is_empty());
        assert_eq!(form.previews().len(), MAX_IMAGES);
        assert_eq!(form.remaining_slots(), 0);
    }

    #[test]
    fn test_pick_request_reflects_remaining_slots() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["a.jpg"])));

        assert_eq!(
            form.update(FormMessage::PickImages, &mut previews),
            Some(FormOutcome::PickRequested { multiple: true })
        );

        form.stage_files(paths(&["1.png"]), &mut previews);
        assert_eq!(
            form.update(FormMessage::PickImages, &mut previews),
            Some(FormOutcome::PickRequested { multiple: false })
        );

        form.stage_files(paths(&["2.png"]), &mut previews);
        assert_eq!(form.update(FormMessage::PickImages, &mut previews), None);
    }

    #[test]
    fn test_staging_clears_image_error() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        form.errors.insert(Field::Images, "At least one image".to_string());

        form.stage_files(paths(&["1.png"]), &mut previews);
        assert!(form.error(Field::Images).is_none());
    }

    #[test]
    fn test_remove_staged_revokes_handle() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["a.jpg"])));
        let ids = form.stage_files(paths(&["1.png", "2.png"]), &mut previews);

        form.remove_image(0, &mut previews);

        assert_eq!(form.staged_files().len(), 1);
        assert_eq!(form.staged_files()[0].name, "2.png");
        assert!(!previews.is_live(ids[0]));
        assert!(previews.is_live(ids[1]));
        // existing images untouched
        assert_eq!(form.record().images, vec![ImageRef::stored("a.jpg")]);
        assert_eq!(form.preview_count(), 2);
    }

    #[test]
    fn test_remove_existing_updates_record_images() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["a.jpg", "b.jpg"])));
        let ids = form.stage_files(paths(&["1.png"]), &mut previews);

        // index 0 is the staged file, existing start at 1
        form.remove_image(1, &mut previews);

        assert_eq!(form.staged_files().len(), 1);
        assert!(previews.is_live(ids[0]));
        assert_eq!(form.record().images, vec![ImageRef::stored("b.jpg")]);
        assert_eq!(form.preview_count(), 2);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(Some(record_with_images(&["a.jpg"])));

        form.remove_image(5, &mut previews);
        assert_eq!(form.preview_count(), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut previews = PreviewRegistry::new();
        let initial = record_with_images(&["a.jpg", "b.jpg"]);
        let mut form = ProductForm::new(Some(initial.clone()));

        form.set_text(TextField::Title, String::new());
        form.set_text(TextField::Observations, "seasonal".to_string());
        form.remove_image(0, &mut previews);
        let ids = form.stage_files(paths(&["1.png"]), &mut previews);
        form.validate();
        assert!(form.has_errors());

        form.update(FormMessage::Reset, &mut previews);

        assert_eq!(form.record(), &initial);
        assert!(form.staged_files().is_empty());
        assert!(!form.has_errors());
        assert!(!previews.is_live(ids[0]));
        assert!(previews.is_empty());
        assert_eq!(
            form.previews(),
            vec![ImageRef::stored("a.jpg"), ImageRef::stored("b.jpg")]
        );
    }

    #[test]
    fn test_discard_revokes_staged() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        form.stage_files(paths(&["1.png", "2.png"]), &mut previews);
        assert_eq!(previews.len(), 2);

        form.discard(&mut previews);
        assert!(previews.is_empty());
    }

    #[test]
    fn test_cancel_outcome() {
        let mut previews = PreviewRegistry::new();
        let mut form = ProductForm::new(None);
        assert_eq!(
            form.update(FormMessage::Cancel, &mut previews),
            Some(FormOutcome::Cancelled)
        );
    }

    #[test]
    fn test_oversized_initial_images_are_truncated() {
        let form = ProductForm::new(Some(record_with_images(&["a", "b", "c", "d"])));
        assert_eq!(form.preview_count(), MAX_IMAGES);
        assert_eq!(form.record().images.len(), MAX_IMAGES);
    }

    #[test]
    fn test_heading_depends_on_id() {
        assert_eq!(ProductForm::new(None).heading(), "Register New Product");
        assert_eq!(ProductForm::new(None).submit_label(), "Save Product");

        let form = ProductForm::new(Some(record_with_images(&[])));
        assert_eq!(form.heading(), "Edit Product");
        assert_eq!(form.submit_label(), "Update Product");
    }
}
