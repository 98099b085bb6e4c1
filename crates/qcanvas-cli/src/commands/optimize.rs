//! Optimize command implementation.

use anyhow::{Context, Result};
use console::style;

use qcanvas_cli::cli::{InputArgs, PassArgs};
use qcanvas_cli::pipeline;
use qcanvas_ir::GateRegistry;

use super::common::{pass_policy, read_input, report_notices, write_output};

/// Execute the optimize command.
pub fn execute(input: &InputArgs, passes: &PassArgs, output: Option<&str>) -> Result<()> {
    let format = input.format();
    eprintln!(
        "{} Optimizing {} with [{}]",
        style("→").cyan().bold(),
        style(&input.input).green(),
        style(passes.passes.join(", ")).yellow()
    );

    let source = read_input(&input.input)?;
    let optimized = pipeline::optimize(
        &source,
        format,
        passes.passes.as_slice(),
        pass_policy(passes),
        &GateRegistry::standard(),
    )?;
    report_notices(&optimized.notices);

    let circuit = &optimized.value;
    eprintln!("{} Optimization complete", style("✓").green().bold());
    eprintln!(
        "  Result: {} gates, depth {}",
        circuit.gates.len(),
        circuit.depth.unwrap_or_default()
    );

    let json = serde_json::to_string_pretty(circuit).context("Failed to serialize circuit")?;
    write_output(output, &json)
}
