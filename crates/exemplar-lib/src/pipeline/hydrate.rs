use std::path::Path;

use anyhow::Context;
use futures::future;
use serde::Serialize;

use crate::index::search::Candidate;

/// A ranked candidate with its snippet text attached.
#[derive(Clone, Debug, Serialize)]
pub struct AugmentedSnippet {
    pub score: f32,
    pub name: String,
    pub language: String,
    pub content: String,
}

/// Read each candidate's snippet file from the vectors directory as UTF-8,
/// concurrently, with fail-fast join semantics.
///
/// A missing or unreadable file fails the whole hydration step; there is no
/// partial-result fallback.
pub async fn hydrate(
    vectors_dir: &Path,
    candidates: Vec<Candidate>,
) -> anyhow::Result<Vec<AugmentedSnippet>> {
    future::try_join_all(candidates.into_iter().map(|candidate| async move {
        let path = vectors_dir.join(&candidate.name);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read snippet: {}", path.display()))?;
        Ok(AugmentedSnippet {
            score: candidate.score,
            name: candidate.name,
            language: candidate.language,
            content,
        })
    }))
    .await
}
