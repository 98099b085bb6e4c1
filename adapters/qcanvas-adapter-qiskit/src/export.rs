//! Canonical circuit to Qiskit circuit.

use qcanvas_ir::{
    Circuit, ConstructionRecipe, Converted, GateApplication, GateRegistry, NoticeLog,
    Representation, SkipReason,
};
use tracing::debug;

use crate::circuit::{ControlledGate, Gate, Operation, QuantumCircuit};

/// Convert a canonical circuit to a Qiskit circuit over one register `q`.
///
/// Each gate is built from its registry recipe. Natively controlled gates
/// (`cx`, `crz`, `ccx`) are applied to `controls + targets` directly; any
/// other gate with controls is wrapped in a [`ControlledGate`]. A gate with
/// no Qiskit recipe, the wrong shape, or operands the circuit rejects is
/// skipped with a notice and the rest are still converted.
pub fn to_qiskit(circuit: &Circuit, registry: &GateRegistry) -> Converted<QuantumCircuit> {
    let mut qc = QuantumCircuit::new(circuit.num_qubits);
    qc.name = circuit.name().map(str::to_string);
    let mut log = NoticeLog::new();

    for (index, gate) in circuit.gates.iter().enumerate() {
        let Some(recipe) = registry.lookup_recipe(&gate.name, Representation::Qiskit) else {
            log.skip(
                index,
                gate.name.clone(),
                SkipReason::NoRecipe {
                    representation: Representation::Qiskit,
                },
            );
            continue;
        };

        if let Err(mismatch) = recipe.entry.check(gate) {
            log.skip(index, gate.name.clone(), mismatch);
            continue;
        }

        let operation = build_operation(&recipe, gate);
        let qubits: Vec<u32> = gate.qubits().map(|q| q.0).collect();
        if let Err(e) = qc.append(operation, &qubits) {
            log.skip(
                index,
                gate.name.clone(),
                SkipReason::Invalid {
                    detail: e.to_string(),
                },
            );
        }
    }

    debug!(
        gates = circuit.gates.len(),
        exported = qc.data.len(),
        "exported Qiskit circuit"
    );

    log.finish(qc)
}

fn build_operation(recipe: &ConstructionRecipe<'_>, gate: &GateApplication) -> Operation {
    let entry = recipe.entry;
    let native = Operation::Gate(Gate {
        name: entry.name.to_string(),
        class: recipe.identifier.to_string(),
        params: gate.parameters.clone(),
        num_qubits: entry.arity.total() as u32,
        num_ctrl_qubits: entry.arity.controls as u32,
    });

    if recipe.natively_controlled() || gate.controls.is_empty() {
        native
    } else {
        Operation::Controlled(ControlledGate {
            base: Box::new(native),
            num_ctrl_qubits: gate.controls.len() as u32,
        })
    }
}
