use async_trait::async_trait;

use super::store::VectorIndex;

/// A scored snippet reference considered for augmentation.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub score: f32,
    pub language: String,
    pub name: String,
    pub path: Option<String>,
}

/// Nearest-neighbor query scoped to a single language.
///
/// Implemented by [`VectorIndex`] for the in-memory scan; tests implement it
/// with scripted per-language results.
#[async_trait]
pub trait SnippetQuery: Send + Sync {
    /// Return up to `limit` candidates for `language`, scored against
    /// `vector` and sorted by score descending.
    async fn nearest(
        &self,
        language: &str,
        vector: &[f32],
        limit: usize,
    ) -> anyhow::Result<Vec<Candidate>>;
}

#[async_trait]
impl SnippetQuery for VectorIndex {
    async fn nearest(
        &self,
        language: &str,
        vector: &[f32],
        limit: usize,
    ) -> anyhow::Result<Vec<Candidate>> {
        let mut scored: Vec<Candidate> = self
            .items()
            .iter()
            .filter(|item| item.metadata.language == language)
            .filter_map(|item| {
                let stored = item.vector.as_raw()?;
                Some(Candidate {
                    score: cosine_similarity(vector, stored),
                    language: item.metadata.language.clone(),
                    name: item.metadata.name.clone(),
                    path: item.metadata.path.clone(),
                })
            })
            .collect();

        scored.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }
}

/// Cosine similarity of two vectors. Returns 0 for mismatched lengths or
/// zero-magnitude inputs.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    dot / denom
}
