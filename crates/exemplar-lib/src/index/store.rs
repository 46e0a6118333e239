use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::types::{IndexFile, IndexItem};

/// In-memory vector index backed by a JSON file on disk.
pub struct VectorIndex {
    path: PathBuf,
    items: Vec<IndexItem>,
}

impl VectorIndex {
    /// Load the index at `path`, creating an empty one first if absent.
    ///
    /// Parent directories are created as needed. Vector entries are
    /// normalized in place after loading.
    pub fn ensure(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            let empty = serde_json::to_string_pretty(&IndexFile::empty())?;
            std::fs::write(path, empty)
                .with_context(|| format!("Failed to create index: {}", path.display()))?;
            debug!(path = %path.display(), "Created empty vector index");
        }
        Self::load(path)
    }

    /// Load an existing index file and normalize its vectors in place.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index: {}", path.display()))?;
        let file: IndexFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse index: {}", path.display()))?;

        let mut index = Self {
            path: path.to_path_buf(),
            items: file.items,
        };
        index.normalize_vectors();
        Ok(index)
    }

    /// Convert every base64-encoded vector of the expected byte length into
    /// its numeric form. Entries that do not decode cleanly are left as-is
    /// and never surface in search results.
    fn normalize_vectors(&mut self) {
        for item in &mut self.items {
            item.vector.normalize();
        }
        debug!(items = self.items.len(), "Normalized index vectors");
    }

    /// Persist the current item list back to the index file.
    pub fn save(&self) -> anyhow::Result<()> {
        let file = IndexFile {
            version: 1,
            items: self.items.clone(),
        };
        let formatted = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, formatted)
            .with_context(|| format!("Failed to write index: {}", self.path.display()))?;
        Ok(())
    }

    /// Append an item to the in-memory list. Call [`Self::save`] to persist.
    pub fn add(&mut self, item: IndexItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[IndexItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
