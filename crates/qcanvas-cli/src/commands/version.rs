//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit conversion and optimization",
        style("qcanvas").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcanvas-ir                 Canonical circuit model and gate registry");
    println!("  qcanvas-qasm2              OpenQASM 2.0 import and export");
    println!("  qcanvas-compile            Rewrite passes");
    println!("  qcanvas-adapter-qiskit     Qiskit circuit conversion");
    println!("  qcanvas-adapter-pennylane  PennyLane tape and script conversion");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
