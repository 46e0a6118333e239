use std::io::{Read, Write};

use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::output::ConsoleIO;
use exemplar_lib::pipeline::augment::{ContentPayload, augment_content};
use exemplar_lib::pipeline::select::{CandidateSelector, SelectorConfig};
use exemplar_lib::runtime::Runtime;

/// Handle the augment hook: run the selection pipeline for the content
/// object read from stdin and write the augmented object to stdout.
///
/// The index is created empty if the project has never been indexed.
pub async fn handle_augment<IN, OUT, ERR>(
    content: ContentPayload,
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let index = VectorIndex::ensure(&runtime.context.index_path())?;
    let selector = CandidateSelector::new(SelectorConfig::default());

    let augmented = augment_content(
        runtime.embedder.as_ref(),
        &selector,
        &index,
        &runtime.context.vectors_dir(),
        content,
    )
    .await?;

    writeln!(io.stdout(), "{}", serde_json::to_string(&augmented)?)?;
    Ok(())
}
