use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::index::types::{IndexItem, ItemMetadata};
use exemplar_lib::output::ConsoleIO;
use exemplar_lib::runtime::Runtime;

/// Run the `exemplar index` command: embed snippet files and add them to
/// the vector index, copying each file into the vectors directory under a
/// language-prefixed name.
pub async fn run_index<IN, OUT, ERR>(
    path: &str,
    language: &str,
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

    let source = Path::new(path);
    if !source.exists() {
        anyhow::bail!("Snippet path not found: {path}");
    }

    let files = collect_files(source)?;
    if files.is_empty() {
        writeln!(io.stdout(), "No snippet files found at {path}.")?;
        return Ok(());
    }

    let vectors_dir = runtime.context.vectors_dir();
    let mut index = VectorIndex::ensure(&runtime.context.index_path())?;

    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read snippet: {}", file.display()))?;
        let name = stored_name(language, file);

        std::fs::write(vectors_dir.join(&name), &content)
            .with_context(|| format!("Failed to store snippet: {name}"))?;

        let vector = runtime.embedder.embed(&content).await?;
        index.add(IndexItem::new(
            ItemMetadata {
                name,
                language: language.to_string(),
                path: Some(file.to_string_lossy().into_owned()),
            },
            &vector,
        ));
    }

    index.save()?;
    info!(count = files.len(), language, "Indexed snippets");
    writeln!(
        io.stdout(),
        "Indexed {} snippet(s) for {language}.",
        files.len()
    )?;
    Ok(())
}

/// A single file, or the files directly inside a directory (sorted by name;
/// subdirectories are skipped).
fn collect_files(source: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(source)
        .with_context(|| format!("Failed to read directory: {}", source.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Stored snippet name: `<language>_<file name>`.
fn stored_name(language: &str, file: &Path) -> String {
    let file_name = file
        .file_name()
        .map_or_else(|| "snippet".to_string(), |n| n.to_string_lossy().into_owned());
    format!("{language}_{file_name}")
}
