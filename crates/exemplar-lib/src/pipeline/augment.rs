use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MAX_AUGMENT_RESULTS;
use crate::embedding::embedder::Embedder;
use crate::index::search::SnippetQuery;
use crate::pipeline::hydrate::{AugmentedSnippet, hydrate};
use crate::pipeline::rank::rank_top;
use crate::pipeline::select::CandidateSelector;

/// Incoming content object. Only `prompt` is interpreted; every other field
/// passes through to the output untouched.
#[derive(Debug, Deserialize)]
pub struct ContentPayload {
    pub prompt: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The content object with the `augment` array attached.
#[derive(Debug, Serialize)]
pub struct AugmentedContent {
    pub prompt: String,
    pub augment: Vec<AugmentedSnippet>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Run the augmentation pipeline for one content object:
/// embed the prompt, select candidates per language, rank, truncate,
/// hydrate snippet text, and attach the result.
///
/// Every stage error propagates raw; there is no retry or partial output.
pub async fn augment_content(
    embedder: &dyn Embedder,
    selector: &CandidateSelector,
    query: &dyn SnippetQuery,
    vectors_dir: &Path,
    content: ContentPayload,
) -> anyhow::Result<AugmentedContent> {
    let vector = embedder.embed(&content.prompt).await?;
    let pool = selector.select(query, &vector).await?;
    let ranked = rank_top(pool, MAX_AUGMENT_RESULTS);
    debug!(selected = ranked.len(), "Ranked augmentation candidates");
    let augment = hydrate(vectors_dir, ranked).await?;

    Ok(AugmentedContent {
        prompt: content.prompt,
        augment,
        extra: content.extra,
    })
}
