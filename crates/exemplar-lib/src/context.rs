use std::path::{Path, PathBuf};

/// Environment and path resolution for an exemplar-enabled project.
#[derive(Clone, Debug)]
pub struct ExemplarContext {
    project_root: PathBuf,
    log_dir: Option<PathBuf>,
}

impl ExemplarContext {
    /// Create a new context rooted at the given path (no log directory).
    #[must_use]
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            log_dir: None,
        }
    }

    /// Create a new context with an explicit log directory.
    #[must_use]
    pub fn with_log_dir(project_root: PathBuf, log_dir: Option<PathBuf>) -> Self {
        Self {
            project_root,
            log_dir,
        }
    }

    /// Create a context from the current working directory.
    pub fn from_cwd() -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    /// Root directory of the project where exemplar is enabled.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Optional parent directory for log file output.
    /// When set, operational logs are written to JSONL files under this path.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Path to the `.vectors/` directory holding the index and snippet files.
    /// Default: `<project_root>/.vectors/`
    pub fn vectors_dir(&self) -> PathBuf {
        self.project_root.join(".vectors")
    }

    /// Path to the persisted vector index file.
    /// Default: `<project_root>/.vectors/index.json`
    pub fn index_path(&self) -> PathBuf {
        self.vectors_dir().join("index.json")
    }

    /// Path to a stored snippet file referenced by `name`.
    pub fn snippet_path(&self, name: &str) -> PathBuf {
        self.vectors_dir().join(name)
    }

    /// Path to the project's `.gitignore` file.
    pub fn gitignore_path(&self) -> PathBuf {
        self.project_root.join(".gitignore")
    }
}
