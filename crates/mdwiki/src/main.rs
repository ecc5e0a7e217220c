//! mdwiki CLI - publish Markdown folders to Confluence.
//!
//! Provides commands for:
//! - `publish`: Convert and publish every document under the source directory
//! - `convert`: Print the wiki markup for a single file

mod commands;
mod error;
mod output;
mod scanner;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, PublishArgs};
use output::Output;

/// mdwiki - Markdown to Confluence publisher.
#[derive(Parser)]
#[command(name = "mdwiki", version, about)]
struct Cli {
    /// Enable verbose output (logs every remote call).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the source directory to Confluence.
    Publish(PublishArgs),
    /// Convert one Markdown file and print the wiki markup.
    Convert(ConvertArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Publish(args) => args.execute(&output),
        Commands::Convert(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
