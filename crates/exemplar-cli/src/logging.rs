use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use exemplar_lib::context::ExemplarContext;

/// Log files older than this many days are deleted on startup.
const LOG_RETENTION_DAYS: i32 = 28;

/// Initialize file-based JSONL logging if the context has a log directory.
///
/// When `ctx.log_dir()` is `None`, this is a no-op. Initialization errors
/// are swallowed so logging can never prevent the command from running.
pub fn init_file_logging(ctx: &ExemplarContext) {
    let Some(log_dir) = ctx.log_dir() else {
        return;
    };
    let _ = try_init_file_logging(log_dir, ctx.project_root());
}

fn try_init_file_logging(log_dir: &Path, project_root: &Path) -> anyhow::Result<()> {
    let log_subdir = log_dir.join(project_subdir_name(project_root));
    fs::create_dir_all(&log_subdir)?;

    let today = jiff::Zoned::now().date();
    let file_path = log_subdir.join(format!("{today}.jsonl"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(Mutex::new(file)))
        .init();

    cleanup_old_logs(&log_subdir, today);

    Ok(())
}

/// Per-project log subdirectory: the project basename plus the first 8 hex
/// characters of the SHA-256 of its absolute path, so projects with equal
/// basenames do not share a log directory.
pub fn project_subdir_name(project_root: &Path) -> String {
    let dirname = project_root.file_name().map_or_else(
        || "unknown".to_string(),
        |n| n.to_string_lossy().into_owned(),
    );

    let digest = Sha256::digest(project_root.to_string_lossy().as_bytes());
    let short: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();

    format!("{dirname}-{short}")
}

/// Delete `.jsonl` log files older than the retention window.
/// Errors are silently ignored.
fn cleanup_old_logs(log_subdir: &Path, today: jiff::civil::Date) {
    let Ok(entries) = fs::read_dir(log_subdir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        let Some(file_date) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<jiff::civil::Date>().ok())
        else {
            continue;
        };
        let expired = today
            .since(file_date)
            .map(|span| span.get_days() >= LOG_RETENTION_DAYS)
            .unwrap_or(false);
        if expired {
            let _ = fs::remove_file(&path);
        }
    }
}
