use std::io::{Read, Write};

use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::output::ConsoleIO;
use exemplar_lib::pipeline::hydrate::hydrate;
use exemplar_lib::pipeline::rank::rank_top;
use exemplar_lib::pipeline::select::{CandidateSelector, SelectorConfig};
use exemplar_lib::runtime::Runtime;

/// Run the `exemplar query` command: the full selection pipeline for ad hoc
/// text, printed as readable markdown.
pub async fn run_query<IN, OUT, ERR>(
    text: &str,
    k: usize,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    if !runtime.is_enabled() {
        anyhow::bail!("exemplar is not enabled. Run `exemplar enable` first.");
    }

    let index = VectorIndex::load(&runtime.context.index_path())?;
    let selector = CandidateSelector::new(SelectorConfig::default());

    let vector = runtime.embedder.embed(text).await?;
    let pool = selector.select(&index, &vector).await?;
    let ranked = rank_top(pool, k);
    let snippets = hydrate(&runtime.context.vectors_dir(), ranked).await?;

    if snippets.is_empty() {
        writeln!(io.stdout(), "No matching examples found.")?;
        return Ok(());
    }

    for (i, snippet) in snippets.iter().enumerate() {
        writeln!(
            io.stdout(),
            "### Example {}: {} [{}] (score: {:.4})\n{}\n",
            i + 1,
            snippet.name,
            snippet.language,
            snippet.score,
            snippet.content,
        )?;
    }

    Ok(())
}
