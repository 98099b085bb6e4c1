//! Parse command implementation.

use anyhow::{Context, Result};
use console::style;

use qcanvas_cli::cli::InputArgs;
use qcanvas_cli::pipeline;
use qcanvas_ir::GateRegistry;

use super::common::{read_input, report_notices, write_output};

/// Execute the parse command.
pub fn execute(input: &InputArgs, output: Option<&str>) -> Result<()> {
    let format = input.format();
    eprintln!(
        "{} Parsing {} as {}",
        style("→").cyan().bold(),
        style(&input.input).green(),
        style(format).yellow()
    );

    let source = read_input(&input.input)?;
    let converted = pipeline::import(&source, format, &GateRegistry::standard())?;
    report_notices(&converted.notices);

    let circuit = &converted.value;
    eprintln!(
        "  Loaded: {} qubits, {} gates, depth {}",
        circuit.num_qubits,
        circuit.gates.len(),
        circuit.depth.unwrap_or_default()
    );

    let json = serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")?;
    write_output(output, &json)
}
