//! Shared fixtures for exemplar tests: a deterministic embedder, vectors
//! with exact cosine relationships, and index/snippet seeding helpers.

use std::path::Path;

use async_trait::async_trait;

use exemplar_lib::config::EMBEDDING_DIMENSION;
use exemplar_lib::embedding::embedder::Embedder;
use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::index::types::{IndexItem, ItemMetadata};

/// Embedder that returns the same vector for every input.
pub struct FixedEmbedder {
    vector: Vec<f32>,
}

impl FixedEmbedder {
    #[must_use]
    pub fn returning(vector: Vec<f32>) -> Self {
        Self { vector }
    }

    /// Embedder aligned with the first basis axis.
    #[must_use]
    pub fn along_basis() -> Self {
        Self::returning(basis_vector())
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Ok(self.vector.clone())
    }
}

/// Embedder that always fails, for error-propagation tests.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("embedding unavailable")
    }
}

/// Unit vector along the first basis axis.
#[must_use]
pub fn basis_vector() -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[0] = 1.0;
    v
}

/// Unit vector whose cosine similarity against [`basis_vector`] is exactly
/// `cos`. Lets tests seed index entries that score a chosen value when the
/// query embedder is [`FixedEmbedder::along_basis`].
#[must_use]
pub fn vector_with_cosine(cos: f32) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSION];
    v[0] = cos;
    v[1] = (1.0 - cos * cos).sqrt();
    v
}

/// Write a snippet file under the vectors directory.
pub fn seed_snippet(vectors_dir: &Path, name: &str, content: &str) {
    std::fs::create_dir_all(vectors_dir).unwrap();
    std::fs::write(vectors_dir.join(name), content).unwrap();
}

/// Create (or extend) the index at `index_path` with one item per entry of
/// `(name, language, vector)`, persisting base64-encoded vectors.
pub fn seed_index(index_path: &Path, entries: &[(&str, &str, Vec<f32>)]) {
    let mut index = VectorIndex::ensure(index_path).unwrap();
    for (name, language, vector) in entries {
        index.add(IndexItem::new(
            ItemMetadata {
                name: (*name).to_string(),
                language: (*language).to_string(),
                path: None,
            },
            vector,
        ));
    }
    index.save().unwrap();
}
