use iced::widget::image::Handle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{PreviewId, Thumbnail};

/// Owner of every live preview handle.
///
/// A handle is allocated when a file is staged and stays renderable until it
/// is revoked. Revoking drops the decoded pixels, so every removal path
/// (remove, reset, discard) must go through [`PreviewRegistry::revoke`].
#[derive(Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: HashMap<PreviewId, PreviewEntry>,
}

struct PreviewEntry {
    path: PathBuf,
    handle: Handle,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for a local file.
    /// The file is loaded lazily by the renderer until a thumbnail is attached.
    pub fn create(&mut self, path: &Path) -> PreviewId {
        self.next_id += 1;
        let id = PreviewId(self.next_id);

        self.live.insert(
            id,
            PreviewEntry {
                path: path.to_path_buf(),
                handle: Handle::from_path(path),
            },
        );

        tracing::debug!(%id, path = %path.display(), "preview handle created");
        id
    }

    /// Release a handle. Returns false if it was already released.
    pub fn revoke(&mut self, id: PreviewId) -> bool {
        let released = self.live.remove(&id).is_some();
        if released {
            tracing::debug!(%id, "preview handle revoked");
        }
        released
    }

    /// Swap in a decoded thumbnail for a live handle.
    /// Results for handles revoked in the meantime are dropped.
    pub fn attach_thumbnail(&mut self, id: PreviewId, thumbnail: Thumbnail) -> bool {
        match self.live.get_mut(&id) {
            Some(entry) => {
                entry.handle = Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels);
                true
            }
            None => {
                tracing::debug!(%id, "dropping thumbnail for revoked preview");
                false
            }
        }
    }

    #[cfg(test)]
    pub fn is_live(&self, id: PreviewId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn handle(&self, id: PreviewId) -> Option<&Handle> {
        self.live.get(&id).map(|entry| &entry.handle)
    }

    pub fn path(&self, id: PreviewId) -> Option<&Path> {
        self.live.get(&id).map(|entry| entry.path.as_path())
    }

    /// Number of handles currently allocated
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl std::fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("next_id", &self.next_id)
            .field("live", &self.live.len())
            .finish()
    }
}
