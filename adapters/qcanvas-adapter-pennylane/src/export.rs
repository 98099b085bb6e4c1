//! Canonical circuit to PennyLane tape.

use qcanvas_ir::{
    Circuit, Converted, GateRegistry, NoticeLog, QubitId, Representation, SkipReason,
};
use tracing::debug;

use crate::tape::{Ctrl, Op, PlOperation, QuantumTape, Wire};

/// Convert a canonical circuit to a tape over wires `0..num_qubits`.
///
/// Natively controlled operations (`CNOT`, `CRX`, `Toffoli`) take
/// `controls + targets` as their wires. Controls on any other gate produce a
/// [`Ctrl`] wrapper. Gates without a PennyLane recipe or with the wrong
/// shape are skipped with a notice.
pub fn to_pennylane(circuit: &Circuit, registry: &GateRegistry) -> Converted<QuantumTape> {
    let mut tape = QuantumTape::new(circuit.num_qubits);
    tape.name = circuit.name().map(str::to_string);
    let mut log = NoticeLog::new();

    for (index, gate) in circuit.gates.iter().enumerate() {
        let Some(recipe) = registry.lookup_recipe(&gate.name, Representation::PennyLane) else {
            log.skip(
                index,
                gate.name.clone(),
                SkipReason::NoRecipe {
                    representation: Representation::PennyLane,
                },
            );
            continue;
        };

        if let Err(mismatch) = recipe.entry.check(gate) {
            log.skip(index, gate.name.clone(), mismatch);
            continue;
        }

        let operation = if recipe.natively_controlled() || gate.controls.is_empty() {
            PlOperation::Op(
                Op::new(recipe.identifier, wires(gate.qubits()))
                    .with_params(gate.parameters.iter().cloned()),
            )
        } else {
            let base = Op::new(recipe.identifier, wires(gate.targets.iter().copied()))
                .with_params(gate.parameters.iter().cloned());
            PlOperation::Ctrl(Ctrl {
                base: Box::new(PlOperation::Op(base)),
                control_wires: wires(gate.controls.iter().copied()),
            })
        };

        if let Err(e) = tape.append(operation) {
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
        exported = tape.operations.len(),
        "exported PennyLane tape"
    );

    log.finish(tape)
}

fn wires(qubits: impl IntoIterator<Item = QubitId>) -> Vec<Wire> {
    qubits.into_iter().map(|q| Wire::Index(q.0)).collect()
}
