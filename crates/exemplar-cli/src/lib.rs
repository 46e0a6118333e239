pub mod cli;
pub mod commands;
pub mod hooks;
pub mod logging;

#[cfg(test)]
pub mod test_util;

use std::io::{Read, Write};

use clap::Parser;

use exemplar_lib::output::ConsoleIO;
use exemplar_lib::runtime::Runtime;

use cli::{Cli, Command, HookCommand};

/// Main CLI entry point. Parses args and dispatches to the appropriate command.
pub async fn try_run<IN, OUT, ERR>(
    args: &[&str],
    runtime: &Runtime,
    io: &mut dyn ConsoleIO<IN, OUT, ERR>,
) -> anyhow::Result<()>
where
    IN: Read,
    OUT: Write,
    ERR: Write,
{
    let cli = Cli::try_parse_from(args)?;

    match cli.command {
        Command::Enable => commands::enable::run_enable(runtime, io),
        Command::Index { path, language } => {
            commands::index::run_index(&path, &language, runtime, io).await
        }
        Command::Query { text, k } => commands::query::run_query(&text, k, runtime, io).await,
        Command::Hook { hook_command } => match hook_command {
            HookCommand::Augment => {
                let input = hooks::input::read_content_input(io.stdin())?;
                hooks::augment::handle_augment(input, runtime, io).await
            }
        },
    }
}
