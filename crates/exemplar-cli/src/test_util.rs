use std::sync::Arc;

use exemplar_lib::context::ExemplarContext;
use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::pipeline::select::SelectorConfig;
use exemplar_lib::runtime::Runtime;
use exemplar_test_util::{FixedEmbedder, seed_snippet};

/// Runtime over a temporary project with no index (exemplar not enabled).
/// The embedder is fixed along the first basis axis.
pub fn runtime_not_enabled() -> (tempfile::TempDir, Runtime) {
    let tmp = tempfile::tempdir().unwrap();
    let context = ExemplarContext::new(tmp.path().to_path_buf());
    let runtime = Runtime {
        context,
        embedder: Arc::new(FixedEmbedder::along_basis()),
    };
    (tmp, runtime)
}

/// Runtime over a temporary project with an empty index created and the
/// curated override snippets on disk. Overrides are selected
/// unconditionally and hydration has no fallback, so an enabled project
/// always carries their snippet files.
pub fn runtime_enabled() -> (tempfile::TempDir, Runtime) {
    let (tmp, runtime) = runtime_not_enabled();
    VectorIndex::ensure(&runtime.context.index_path()).unwrap();
    for entries in SelectorConfig::default().overrides.values() {
        for entry in entries {
            seed_snippet(
                &runtime.context.vectors_dir(),
                &entry.name,
                "// curated example\n",
            );
        }
    }
    (tmp, runtime)
}
