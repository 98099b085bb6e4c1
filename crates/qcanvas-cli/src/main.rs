//! qcanvas Command-Line Interface
//!
//! The main entry point for the qcanvas CLI tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qcanvas_cli::cli::{Cli, Commands};

mod commands;

use commands::{export, gates, optimize, parse, version};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Parse { input, output } => parse::execute(&input, output.as_deref()),

        Commands::Export {
            input,
            to,
            passes,
            output,
        } => export::execute(&input, to, &passes, output.as_deref()),

        Commands::Optimize {
            input,
            passes,
            output,
        } => optimize::execute(&input, &passes, output.as_deref()),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
