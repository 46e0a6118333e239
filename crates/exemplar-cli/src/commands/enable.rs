use std::io::{Read, Write};

use exemplar_lib::index::store::VectorIndex;
use exemplar_lib::output::ConsoleIO;
use exemplar_lib::runtime::Runtime;

/// Run the `exemplar enable` command.
///
/// 1. Create `.vectors/` and an empty index file.
/// 2. Append `.vectors/` to `.gitignore` if not present.
pub fn run_enable<IN, OUT, ERR>(
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let index_path = runtime.context.index_path();

    writeln!(io.stderr(), "Initializing vector index...")?;
    let index = VectorIndex::ensure(&index_path)?;
    writeln!(
        io.stderr(),
        "  Index at {} ({} items)",
        index_path.display(),
        index.len()
    )?;

    update_gitignore(runtime)?;
    writeln!(io.stderr(), "  .gitignore updated")?;

    writeln!(io.stdout(), "exemplar enabled successfully.")?;
    Ok(())
}

/// Append `.vectors/` to `.gitignore` if not already present.
fn update_gitignore(runtime: &Runtime) -> anyhow::Result<()> {
    let gitignore_path = runtime.context.gitignore_path();
    let entry = ".vectors/";

    if gitignore_path.exists() {
        let existing = std::fs::read_to_string(&gitignore_path)?;
        if existing.lines().any(|line| line.trim() == entry) {
            return Ok(());
        }
        let separator = if existing.ends_with('\n') { "" } else { "\n" };
        std::fs::write(&gitignore_path, format!("{existing}{separator}{entry}\n"))?;
    } else {
        std::fs::write(&gitignore_path, format!("{entry}\n"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use exemplar_lib::output::BufferedIO;

    use crate::test_util::{runtime_enabled, runtime_not_enabled};

    #[tokio::test]
    async fn enable_creates_index_and_gitignore() {
        let (_tmp, runtime) = runtime_not_enabled();
        let mut io = BufferedIO::new();

        crate::try_run(&["exemplar", "enable"], &runtime, &mut io)
            .await
            .unwrap();

        assert!(runtime.context.index_path().exists());
        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert!(gitignore.contains(".vectors/"));
        assert_eq!(io.stdout_to_string(), "exemplar enabled successfully.\n");
    }

    #[tokio::test]
    async fn enable_is_idempotent() {
        let (_tmp, runtime) = runtime_not_enabled();

        let mut io = BufferedIO::new();
        crate::try_run(&["exemplar", "enable"], &runtime, &mut io)
            .await
            .unwrap();
        let mut io = BufferedIO::new();
        crate::try_run(&["exemplar", "enable"], &runtime, &mut io)
            .await
            .unwrap();

        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert_eq!(
            gitignore.matches(".vectors/").count(),
            1,
            "gitignore should not have duplicate entries"
        );
    }

    #[tokio::test]
    async fn enable_preserves_existing_index() {
        let (_tmp, runtime) = runtime_enabled();

        let before = std::fs::read_to_string(runtime.context.index_path()).unwrap();
        let mut io = BufferedIO::new();
        crate::try_run(&["exemplar", "enable"], &runtime, &mut io)
            .await
            .unwrap();
        let after = std::fs::read_to_string(runtime.context.index_path()).unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn enable_appends_to_existing_gitignore() {
        let (_tmp, runtime) = runtime_not_enabled();
        std::fs::write(runtime.context.gitignore_path(), "target/").unwrap();

        let mut io = BufferedIO::new();
        crate::try_run(&["exemplar", "enable"], &runtime, &mut io)
            .await
            .unwrap();

        let gitignore = std::fs::read_to_string(runtime.context.gitignore_path()).unwrap();
        assert!(gitignore.contains("target/"));
        assert!(gitignore.contains(".vectors/"));
    }
}
