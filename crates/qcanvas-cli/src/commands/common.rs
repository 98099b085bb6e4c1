//! Shared helpers for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcanvas_cli::cli::PassArgs;
use qcanvas_compile::PassPolicy;
use qcanvas_ir::Notice;

/// Read the input file, or stdin for `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }

    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Write to the output file, or stdout when none is given.
pub fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!("  Output: {}", style(path).green());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Print dropped instructions to stderr.
pub fn report_notices<'a>(notices: impl IntoIterator<Item = &'a Notice>) {
    for notice in notices {
        eprintln!("{} {}", style("warning:").yellow().bold(), notice);
    }
}

pub fn pass_policy(args: &PassArgs) -> PassPolicy {
    if args.strict_passes {
        PassPolicy::Strict
    } else {
        PassPolicy::Lenient
    }
}
