#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reshape_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reshape")]
#[command(author, version, about = "Scope renaming and partial node matching over parsed programs", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Load settings from a JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Check whether a candidate value matches a partial pattern
    Match {
        /// JSON file holding the pattern
        pattern: PathBuf,

        /// JSON file holding the candidate value or document
        candidate: PathBuf,

        /// Match against this node of a document instead of the raw JSON
        #[arg(long, value_name = "ID")]
        node: Option<u32>,
    },

    /// Rename every scoped variable in a document and print the result
    Rename {
        /// Document JSON file (syntax tree + scope tree)
        document: PathBuf,

        /// First id handed out by the counter
        #[arg(long, value_name = "N")]
        start: Option<u64>,
    },

    /// Print the shape classification of a node
    Classify {
        /// Document JSON file (syntax tree + scope tree)
        document: PathBuf,

        /// Node id to classify
        node: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = match &cli.config {
        Some(path) => Config::load(&cwd.join(path)).into_diagnostic()?,
        None => Config::new(cwd.clone()),
    };
    config.cwd = cwd;
    let verbosity = config.verbosity.max(cli.verbose);
    let json_logs = config.json_logs || cli.json;
    let config = config.with_verbosity(verbosity).with_json_logs(json_logs);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        None | Some(Commands::Version) => commands::version::run(),
        Some(Commands::Match {
            pattern,
            candidate,
            node,
        }) => commands::matching::run(&config, &pattern, &candidate, node, cli.json),
        Some(Commands::Rename { document, start }) => {
            let config = match start {
                Some(first) => config.with_first_id(first),
                None => config,
            };
            commands::rename::run(&config, &document)
        }
        Some(Commands::Classify { document, node }) => {
            commands::classify::run(&config, &document, node)
        }
    }
}
