//! Export command implementation.

use anyhow::Result;
use console::style;

use qcanvas_cli::cli::{Format, InputArgs, PassArgs};
use qcanvas_cli::pipeline;
use qcanvas_ir::GateRegistry;

use super::common::{pass_policy, read_input, report_notices, write_output};

/// Execute the export command.
pub fn execute(
    input: &InputArgs,
    to: Format,
    passes: &PassArgs,
    output: Option<&str>,
) -> Result<()> {
    let from = input.format();
    eprintln!(
        "{} Converting {} from {} to {}",
        style("→").cyan().bold(),
        style(&input.input).green(),
        style(from).yellow(),
        style(to).yellow()
    );

    let source = read_input(&input.input)?;
    let conversion = pipeline::convert(
        &source,
        from,
        to,
        passes.passes.as_slice(),
        pass_policy(passes),
        &GateRegistry::standard(),
    )?;
    report_notices(conversion.notices());

    match conversion.skipped() {
        0 => eprintln!("{} Conversion complete", style("✓").green().bold()),
        dropped => eprintln!(
            "{} Conversion complete, {dropped} instruction(s) dropped",
            style("!").yellow().bold()
        ),
    }

    write_output(output, &conversion.output)
}
