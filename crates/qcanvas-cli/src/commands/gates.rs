//! Gates command implementation.

use console::style;

use qcanvas_ir::GateRegistry;

/// Execute the gates command.
pub fn execute() {
    let registry = GateRegistry::standard();

    println!("{}", style("Registered gates:").bold());
    println!();
    println!(
        "  {:<8} {:>4} {:>4} {:>6}  {:<8} {:<12} {:<22} {}",
        "NAME", "CTRL", "TGT", "PARAMS", "QASM", "QISKIT", "PENNYLANE", "ALIASES"
    );

    for entry in registry.entries() {
        println!(
            "  {:<8} {:>4} {:>4} {:>6}  {:<8} {:<12} {:<22} {}",
            style(entry.name).cyan(),
            entry.arity.controls,
            entry.arity.targets,
            entry.params.count,
            entry.qasm2.unwrap_or("-"),
            entry.qiskit.unwrap_or("-"),
            entry.pennylane.unwrap_or("-"),
            entry.aliases.join(", ")
        );
    }

    println!();
    println!("  {} gates", registry.len());
}
