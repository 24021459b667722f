//! KB CLI - Knowledge base navigation generator.
//!
//! Provides commands for:
//! - `nav`: Run both hooks and print the rendered navigation
//! - `config`: Run the config hook and emit the updated `mkdocs.yml`
//! - `links`: Print the post links collected per section

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, LinksArgs, NavArgs};
use output::Output;

/// KB - Knowledge base navigation generator.
#[derive(Parser)]
#[command(name = "kb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered navigation with knowledge base links as JSON.
    Nav(NavArgs),
    /// Emit the configuration with the generated knowledge base entry.
    Config(ConfigArgs),
    /// Print the post links per knowledge base section as JSON.
    Links(LinksArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Nav(args) => args.build.verbose,
            Self::Config(args) => args.build.verbose,
            Self::Links(args) => args.build.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(),
        Commands::Config(args) => args.execute(),
        Commands::Links(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
