use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "exemplar",
    about = "Retrieval-augmented example selection for documentation corpora"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up exemplar for the current project (create the vector index).
    Enable,

    /// Embed snippet files and add them to the vector index.
    Index {
        /// Path to a snippet file or a flat directory of snippet files.
        path: String,
        /// Language tag recorded for the ingested snippets.
        #[arg(short, long)]
        language: String,
    },

    /// Run the selection pipeline for ad hoc text and print the results.
    Query {
        /// The text to search for.
        text: String,
        /// Number of results to return.
        #[arg(short, long, default_value_t = 5)]
        k: usize,
    },

    /// Hook subcommands (called by the host CLI's plugin loader).
    Hook {
        #[command(subcommand)]
        hook_command: HookCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum HookCommand {
    /// Augment hook handler: reads a content JSON object from stdin, runs
    /// the selection pipeline, writes the augmented object to stdout.
    Augment,
}
