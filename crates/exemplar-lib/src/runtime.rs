use std::sync::Arc;

use crate::context::ExemplarContext;
use crate::embedding::embedder::Embedder;

/// Immutable dependency bundle for exemplar commands.
///
/// Bundles the project context and the embedding client so that all command
/// handlers receive a single `&Runtime` parameter instead of individual
/// dependencies. Tests substitute a fixed-vector embedder here.
pub struct Runtime {
    pub context: ExemplarContext,
    pub embedder: Arc<dyn Embedder>,
}

impl Runtime {
    /// Whether the project has been set up (`exemplar enable`).
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.context.index_path().exists()
    }
}
