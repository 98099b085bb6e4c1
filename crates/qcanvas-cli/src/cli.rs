//! Command-line definitions.

use std::fmt;
use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};

/// qcanvas - convert and optimize quantum circuits
#[derive(Debug, Parser)]
#[command(name = "qcanvas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a circuit and print it as canonical JSON with fresh statistics
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert a circuit to another representation
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output representation
        #[arg(short, long, value_enum)]
        to: Format,

        #[command(flatten)]
        passes: PassArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Apply rewrite passes and print canonical JSON with recomputed statistics
    Optimize {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        passes: PassArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the gate registry
    Gates,

    /// Show version information
    Version,
}

/// Where the circuit comes from.
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// Input file, or `-` for stdin
    pub input: String,

    /// Input representation (inferred from the file extension if omitted)
    #[arg(short, long, value_enum)]
    pub from: Option<Format>,
}

impl InputArgs {
    /// Explicit `--from`, else the extension, else QASM.
    pub fn format(&self) -> Format {
        self.from
            .or_else(|| Format::from_path(&self.input))
            .unwrap_or(Format::Qasm)
    }
}

/// Which rewrite passes to run.
#[derive(Debug, clap::Args)]
pub struct PassArgs {
    /// Pass names, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    pub passes: Vec<String>,

    /// Reject unknown pass names instead of skipping them
    #[arg(long, env = "QCANVAS_STRICT_PASSES")]
    pub strict_passes: bool,
}

/// A circuit representation the pipeline reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// OpenQASM 2.0 text
    Qasm,
    /// Canonical circuit JSON
    Json,
    /// Qiskit `QuantumCircuit` JSON
    Qiskit,
    /// PennyLane tape JSON
    Pennylane,
    /// PennyLane Python script (output only)
    PennylaneScript,
}

impl Format {
    /// Guess a format from a file extension. Only the unambiguous ones.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension().and_then(|e| e.to_str())?;
        match ext.to_lowercase().as_str() {
            "qasm" => Some(Format::Qasm),
            "json" => Some(Format::Json),
            "py" => Some(Format::PennylaneScript),
            _ => None,
        }
    }

    /// Whether the pipeline can read this format.
    pub fn is_importable(self) -> bool {
        !matches!(self, Format::PennylaneScript)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Qasm => "qasm",
            Format::Json => "json",
            Format::Qiskit => "qiskit",
            Format::Pennylane => "pennylane",
            Format::PennylaneScript => "pennylane-script",
        };
        f.write_str(name)
    }
}
