use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::data::ProductRecord;
use crate::preview::{PreviewId, PreviewRegistry};

/// A saved product and when it was last written
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub record: ProductRecord,
    pub saved_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// Id of the stored record (always set once in the catalog)
    pub fn id(&self) -> &str {
        self.record.id.as_deref().unwrap_or_default()
    }
}

/// The Catalog holds the products saved during this session.
/// Nothing is written to disk; entries are lost when the app exits.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or replace the one with the same id.
    /// Records without an id get a fresh one. Returns the stored id.
    ///
    /// Preview handles held by a replaced record but not by its
    /// replacement are revoked.
    pub fn upsert(&mut self, mut record: ProductRecord, previews: &mut PreviewRegistry) -> String {
        let id = match &record.id {
            Some(id) => id.clone(),
            None => {
                let id = Uuid::new_v4().to_string();
                record.id = Some(id.clone());
                id
            }
        };

        let entry = CatalogEntry {
            record,
            saved_at: Utc::now(),
        };

        match self.entries.iter().position(|e| e.id() == id) {
            Some(pos) => {
                let replaced = std::mem::replace(&mut self.entries[pos], entry);
                let kept = preview_ids(&self.entries[pos].record);
                for stale in preview_ids(&replaced.record) {
                    if !kept.contains(&stale) {
                        previews.revoke(stale);
                    }
                }
                tracing::info!(%id, "product updated");
            }
            None => {
                self.entries.push(entry);
                tracing::info!(%id, total = self.entries.len(), "product registered");
            }
        }

        id
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Remove a product and release its preview handles
    pub fn remove(&mut self, id: &str, previews: &mut PreviewRegistry) -> Option<ProductRecord> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        let entry = self.entries.remove(pos);

        for preview in preview_ids(&entry.record) {
            previews.revoke(preview);
        }

        tracing::info!(%id, "product removed");
        Some(entry.record)
    }

    /// Entries in the order they were first saved
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn preview_ids(record: &ProductRecord) -> Vec<PreviewId> {
    record.images.iter().filter_map(|image| image.preview_id()).collect()
}
