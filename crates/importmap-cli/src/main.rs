#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use importmap_core::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "importmap")]
#[command(author, version, about = "Normalize import maps and resolve module specifiers", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Base URL: the import map's base for `parse`, the referrer for `resolve`
    #[arg(long, global = true, env = "IMPORTMAP_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Normalize an import map and print the result
    Parse {
        /// Path to the import map JSON file
        file: PathBuf,

        /// Exit with an error if normalization produced any warning
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Resolve module specifiers against an import map
    Resolve {
        /// Specifiers to resolve
        #[arg(required = true)]
        specifiers: Vec<String>,

        /// Path to the import map JSON file
        #[arg(short, long, value_name = "FILE")]
        map: PathBuf,

        /// Base URL of the import map (defaults to --base-url)
        #[arg(long, value_name = "URL")]
        map_base_url: Option<String>,

        /// Include the resolution trace for each specifier
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::new()
        .with_verbosity(cli.verbose)
        .with_json(cli.json)
        .with_base_url(cli.base_url);

    logging::init(config.verbosity, config.json);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(config.json),
        Some(Commands::Parse {
            file,
            deny_warnings,
        }) => {
            let span = tracing::info_span!("parse", cmd = "parse", file = %file.display());
            let _guard = span.enter();
            commands::parse::run(&config, &file, deny_warnings)
        }
        Some(Commands::Resolve {
            specifiers,
            map,
            map_base_url,
            trace,
        }) => {
            let span = tracing::info_span!("resolve", cmd = "resolve", map = %map.display());
            let _guard = span.enter();
            commands::resolve::run(
                &config,
                &commands::resolve::ResolveArgs {
                    specifiers,
                    map,
                    map_base_url,
                    trace,
                },
            )
        }
    }
}
