//! PennyLane tape to canonical circuit.

use qcanvas_ir::{
    Circuit, CircuitMetadata, Converted, GateApplication, GateRegistry, NoticeLog, QubitId,
    Representation, SkipReason,
};
use tracing::debug;

use crate::error::PennyLaneResult;
use crate::tape::{Op, PlOperation, QuantumTape, Wire};

/// Operation names with no unitary meaning.
pub const NON_UNITARY: [&str; 3] = ["Barrier", "Snapshot", "MidMeasureMP"];

/// A tape operation reduced to its innermost [`Op`] plus wrapper controls.
struct Unwrapped<'t> {
    /// Canonical or fallback name for the whole operation.
    name: String,
    /// Whether `name` is registered and the innermost op was recognized.
    known: bool,
    /// Name of the innermost op alone, for splitting its own wires.
    base_name: String,
    /// Control wires from every `Ctrl` wrapper, outermost first.
    wrapper_controls: Vec<&'t Wire>,
    base: &'t Op,
}

/// Identify an operation, unwrapping `Ctrl` recursively.
///
/// The innermost op is looked up by PennyLane name, falling back to its
/// printable form lower-cased with the argument list stripped. Each control
/// wire of each wrapper prefixes one `c`, so `ctrl(PauliX, control=[0, 1])`
/// is `ccx`.
fn unwrap<'t>(op: &'t PlOperation, registry: &GateRegistry) -> Unwrapped<'t> {
    match op {
        PlOperation::Op(base) => {
            let recognized = registry.lookup_canonical(Representation::PennyLane, &base.name);
            let name = recognized.map_or_else(|| fallback_name(op), str::to_string);
            Unwrapped {
                base_name: name.clone(),
                name,
                known: recognized.is_some(),
                wrapper_controls: vec![],
                base,
            }
        }
        PlOperation::Ctrl(ctrl) => {
            let inner = unwrap(&ctrl.base, registry);
            let synthesized = format!("{}{}", "c".repeat(ctrl.control_wires.len()), inner.name);
            let canonical = registry.canonical_name(&synthesized).filter(|_| inner.known);

            let mut wrapper_controls: Vec<&Wire> = ctrl.control_wires.iter().collect();
            wrapper_controls.extend(inner.wrapper_controls);

            Unwrapped {
                name: canonical.map_or(synthesized, str::to_string),
                known: canonical.is_some(),
                base_name: inner.base_name,
                wrapper_controls,
                base: inner.base,
            }
        }
    }
}

fn fallback_name(op: &PlOperation) -> String {
    let printable = op.to_string();
    let stem = printable.split('(').next().unwrap_or_default();
    stem.trim().to_lowercase()
}

/// Metadata name for a circuit imported from a PennyLane tape.
pub fn imported_name(source: Option<&str>) -> String {
    let name = source.filter(|n| !n.is_empty()).unwrap_or("Untitled");
    format!("Converted PennyLane Circuit ({name})")
}

/// Convert a PennyLane tape to a canonical circuit.
///
/// Wires map to qubit indices by their position in [`QuantumTape::wires`].
/// Natively controlled operations are split by the registry's arity (or
/// the `CNOT`/`Toffoli` fallback for unregistered names); `Ctrl` wrapper
/// wires become leading controls. Fails only if the wire list is malformed.
pub fn from_pennylane(
    tape: &QuantumTape,
    registry: &GateRegistry,
) -> PennyLaneResult<Converted<Circuit>> {
    let num_qubits = tape.check_wires()?;

    let name = imported_name(tape.name.as_deref());
    let mut circuit = Circuit::new(num_qubits).with_metadata(CircuitMetadata::named(name));
    let mut log = NoticeLog::new();

    for (index, op) in tape.operations.iter().enumerate() {
        if let Some(gate) = import_operation(index, op, tape, registry, &mut log) {
            circuit.gates.push(gate);
        }
    }

    debug!(
        operations = tape.operations.len(),
        imported = circuit.gates.len(),
        "imported PennyLane tape"
    );

    Ok(log.finish(circuit.with_fresh_stats()))
}

fn resolve(tape: &QuantumTape, wires: &[&Wire]) -> Result<Vec<QubitId>, SkipReason> {
    wires
        .iter()
        .map(|w| {
            tape.wire_index(w)
                .map(QubitId)
                .ok_or_else(|| SkipReason::UnresolvedQubit {
                    detail: format!("wire {w} is not on the tape"),
                })
        })
        .collect()
}

fn import_operation(
    index: usize,
    op: &PlOperation,
    tape: &QuantumTape,
    registry: &GateRegistry,
    log: &mut NoticeLog,
) -> Option<GateApplication> {
    let unwrapped = unwrap(op, registry);

    if NON_UNITARY.contains(&unwrapped.base.name.as_str()) {
        let statement = unwrapped.base.name.clone();
        log.skip(index, op.name(), SkipReason::NonUnitary { statement });
        return None;
    }

    let base_wires: Vec<&Wire> = unwrapped.base.wires.iter().collect();
    let resolved = resolve(tape, &unwrapped.wrapper_controls)
        .and_then(|controls| resolve(tape, &base_wires).map(|base| (controls, base)));
    let (mut controls, base_qubits) = match resolved {
        Ok(qubits) => qubits,
        Err(reason) => {
            log.skip(index, op.name(), reason);
            return None;
        }
    };

    if !unwrapped.known {
        log.unrecognized(index, op.to_string(), unwrapped.name.clone());
    }

    // No explicit control count here: the innermost op's own split comes from the registry.
    let (native_controls, targets) = match registry.split_roles(&unwrapped.base_name, &base_qubits)
    {
        Ok(roles) => roles,
        Err(mismatch) => {
            log.skip(index, unwrapped.name, mismatch);
            return None;
        }
    };
    controls.extend(native_controls);

    let gate = GateApplication::new(unwrapped.name, targets)
        .with_controls(controls)
        .with_parameters(unwrapped.base.params.iter().cloned());

    if let Some(Err(mismatch)) = registry.entry(&gate.name).map(|e| e.check(&gate)) {
        log.skip(index, gate.name, mismatch);
        return None;
    }

    if let Err(e) = gate.validate(tape.wires.len() as u32) {
        log.skip(
            index,
            gate.name,
            SkipReason::Invalid {
                detail: e.to_string(),
            },
        );
        return None;
    }

    Some(gate)
}
