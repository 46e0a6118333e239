use std::path::PathBuf;
use std::sync::Arc;

use exemplar_lib::context::ExemplarContext;
use exemplar_lib::embedding::embedder::HttpEmbedder;
use exemplar_lib::output::StdIO;
use exemplar_lib::runtime::Runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Resolve project root and optional log directory from the environment
    let cwd = std::env::current_dir()?;
    let log_dir = std::env::var("EXEMPLAR_LOG_DIR").ok().map(PathBuf::from);
    let context = ExemplarContext::with_log_dir(cwd, log_dir);

    // 2. Init file logging (no-op if log_dir is None)
    exemplar_cli::logging::init_file_logging(&context);

    // 3. Set panic hook (logs to file if available, always prints to stderr)
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("{info}");
        eprintln!("{info}");
    }));

    // 4. Build runtime with the env-configured embedding client
    let embedder = Arc::new(HttpEmbedder::from_env());
    let runtime = Runtime { context, embedder };

    // 5. Run CLI
    let args: Vec<String> = std::env::args().collect();
    let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut io = StdIO::new();

    let result = exemplar_cli::try_run(&args_refs, &runtime, &mut io).await;
    if let Err(ref e) = result {
        tracing::error!(error = format!("{e:?}"), "command failed");
    }
    result
}
