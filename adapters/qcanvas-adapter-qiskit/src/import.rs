//! Qiskit circuit to canonical circuit.

use qcanvas_ir::{
    Circuit, CircuitMetadata, Converted, GateApplication, GateRegistry, NoticeLog, QubitId,
    Representation, ShapeMismatch, SkipReason,
};
use tracing::debug;

use crate::circuit::{CircuitInstruction, NON_UNITARY, Operation, QuantumCircuit};
use crate::error::QiskitResult;

/// The canonical identity of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// Known to the registry under this canonical name.
    Known(&'static str),
    /// Not in the registry; kept under a best-effort name.
    Fallback(String),
}

impl Recognition {
    pub fn name(&self) -> &str {
        match self {
            Recognition::Known(name) => *name,
            Recognition::Fallback(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Recognition::Known(_))
    }
}

/// Identify an operation.
///
/// Rules are tried from most to least specific:
///
/// 1. A controlled wrapper is unwrapped recursively. Its name is one `c` per
///    wrapper control followed by the base's name, so `H.control(2)` is
///    `cch`. It is known only if the base is known and the synthesized name
///    is registered.
/// 2. A library gate is looked up by class name.
/// 3. Anything else is named after its printable form, lower-cased, with the
///    parameter list stripped.
pub fn recognize(op: &Operation, registry: &GateRegistry) -> Recognition {
    match op {
        Operation::Controlled(c) => {
            let base = recognize(&c.base, registry);
            let name = format!("{}{}", "c".repeat(c.num_ctrl_qubits as usize), base.name());
            match registry.canonical_name(&name) {
                Some(canonical) if base.is_known() => Recognition::Known(canonical),
                _ => Recognition::Fallback(name),
            }
        }
        Operation::Gate(g) => registry
            .lookup_canonical(Representation::Qiskit, &g.class)
            .map_or_else(|| Recognition::Fallback(fallback_name(op)), Recognition::Known),
        Operation::Instruction(_) => Recognition::Fallback(fallback_name(op)),
    }
}

fn fallback_name(op: &Operation) -> String {
    let printable = op.to_string();
    let stem = printable.split('(').next().unwrap_or_default();
    stem.trim().to_lowercase()
}

/// Metadata name for a circuit imported from Qiskit.
pub fn imported_name(source: Option<&str>) -> String {
    let name = source.filter(|n| !n.is_empty()).unwrap_or("Untitled");
    format!("Converted Qiskit Circuit ({name})")
}

/// Convert a Qiskit circuit to a canonical circuit.
///
/// Fails only if the registers are malformed. Instructions that cannot be
/// converted are dropped and reported as notices; the rest keep their
/// relative order. The result has fresh statistics.
pub fn from_qiskit(
    qc: &QuantumCircuit,
    registry: &GateRegistry,
) -> QiskitResult<Converted<Circuit>> {
    qc.check_registers()?;

    let name = imported_name(qc.name.as_deref());
    let mut circuit = Circuit::new(qc.num_qubits()).with_metadata(CircuitMetadata::named(name));
    let mut log = NoticeLog::new();

    for (index, inst) in qc.data.iter().enumerate() {
        if let Some(gate) = import_instruction(index, inst, qc, registry, &mut log) {
            circuit.gates.push(gate);
        }
    }

    debug!(
        instructions = qc.data.len(),
        imported = circuit.gates.len(),
        "imported Qiskit circuit"
    );

    Ok(log.finish(circuit.with_fresh_stats()))
}

fn import_instruction(
    index: usize,
    inst: &CircuitInstruction,
    qc: &QuantumCircuit,
    registry: &GateRegistry,
    log: &mut NoticeLog,
) -> Option<GateApplication> {
    let op = &inst.operation;

    if let Operation::Instruction(i) = op {
        if NON_UNITARY.contains(&i.name.as_str()) {
            log.skip(
                index,
                i.name.clone(),
                SkipReason::NonUnitary {
                    statement: i.name.clone(),
                },
            );
            return None;
        }
    }

    let mut qubits = Vec::with_capacity(inst.qubits.len());
    for qubit in &inst.qubits {
        let Some(bit) = qc.find_bit(qubit) else {
            log.skip(
                index,
                op.name(),
                SkipReason::UnresolvedQubit {
                    detail: format!("{qubit} is not in any register"),
                },
            );
            return None;
        };
        qubits.push(QubitId(bit));
    }

    let declared = op.num_qubits() as usize;
    if qubits.len() != declared {
        let mismatch = ShapeMismatch::Qubits {
            expected: declared,
            got: qubits.len(),
        };
        log.skip(index, op.name(), mismatch);
        return None;
    }

    let name = match recognize(op, registry) {
        Recognition::Known(name) => name.to_string(),
        Recognition::Fallback(name) => {
            log.unrecognized(index, op.to_string(), name.clone());
            name
        }
    };

    // An explicit control count is taken verbatim; otherwise the registry decides.
    let num_ctrl = op.num_ctrl_qubits() as usize;
    let split = if num_ctrl == 0 {
        registry.split_roles(&name, &qubits)
    } else if num_ctrl < qubits.len() {
        let (controls, targets) = qubits.split_at(num_ctrl);
        Ok((controls.to_vec(), targets.to_vec()))
    } else {
        Err(ShapeMismatch::Qubits {
            expected: num_ctrl + 1,
            got: qubits.len(),
        })
    };
    let (controls, targets) = match split {
        Ok(roles) => roles,
        Err(mismatch) => {
            log.skip(index, name, mismatch);
            return None;
        }
    };

    let gate = GateApplication::new(name, targets)
        .with_controls(controls)
        .with_parameters(op.params().iter().cloned());

    if let Some(Err(mismatch)) = registry.entry(&gate.name).map(|e| e.check(&gate)) {
        log.skip(index, gate.name, mismatch);
        return None;
    }

    if let Err(e) = gate.validate(qc.num_qubits()) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ControlledGate, Gate, Instruction, QuantumRegister, Qubit};
    use qcanvas_ir::{Notice, Parameter};

    fn gate(name: &str, class: &str, num_qubits: u32, num_ctrl_qubits: u32) -> Operation {
        Operation::Gate(Gate {
            name: name.into(),
            class: class.into(),
            params: vec![],
            num_qubits,
            num_ctrl_qubits,
        })
    }

    fn controlled(base: Operation, n: u32) -> Operation {
        Operation::Controlled(ControlledGate {
            base: Box::new(base),
            num_ctrl_qubits: n,
        })
    }

    fn import(qc: &QuantumCircuit) -> Converted<Circuit> {
        from_qiskit(qc, &GateRegistry::standard()).unwrap()
    }

    #[test]
    fn test_bell_circuit() {
        let mut qc = QuantumCircuit::new(2).with_name("bell");
        qc.append(gate("h", "HGate", 1, 0), &[0]).unwrap();
        qc.append(gate("cx", "CXGate", 2, 1), &[0, 1]).unwrap();

        let out = import(&qc);
        assert!(out.is_lossless());
        let circuit = out.value;
        assert_eq!(circuit.name(), Some("Converted Qiskit Circuit (bell)"));
        assert_eq!(circuit.gates[1].name, "cx");
        assert_eq!(circuit.gates[1].controls, vec![QubitId(0)]);
        assert_eq!(circuit.gates[1].targets, vec![QubitId(1)]);
        assert_eq!(circuit.depth, Some(2));
    }

    #[test]
    fn test_untitled_name() {
        assert_eq!(imported_name(None), "Converted Qiskit Circuit (Untitled)");
        assert_eq!(imported_name(Some("")), "Converted Qiskit Circuit (Untitled)");
    }

    #[test]
    fn test_controlled_wrapper_unwrapped() {
        let mut qc = QuantumCircuit::new(3);
        qc.append(controlled(gate("x", "XGate", 1, 0), 2), &[2, 0, 1])
            .unwrap();
        qc.append(controlled(gate("h", "HGate", 1, 0), 1), &[1, 0])
            .unwrap();

        let out = import(&qc);
        assert!(out.is_lossless());
        let gates = &out.value.gates;
        assert_eq!(gates[0].name, "ccx");
        assert_eq!(gates[0].controls, vec![QubitId(2), QubitId(0)]);
        assert_eq!(gates[0].targets, vec![QubitId(1)]);
        assert_eq!(gates[1].name, "ch");
        assert_eq!(gates[1].controls, vec![QubitId(1)]);
    }

    #[test]
    fn test_nested_wrapper_counts_native_controls() {
        let mut qc = QuantumCircuit::new(3);
        qc.append(controlled(gate("cx", "CXGate", 2, 1), 1), &[0, 1, 2])
            .unwrap();

        let gate = &import(&qc).value.gates[0];
        assert_eq!(gate.name, "ccx");
        assert_eq!(gate.controls, vec![QubitId(0), QubitId(1)]);
        assert_eq!(gate.targets, vec![QubitId(2)]);
    }

    #[test]
    fn test_unregistered_composite_flagged() {
        let mut qc = QuantumCircuit::new(2);
        qc.append(controlled(gate("s", "SGate", 1, 0), 1), &[0, 1])
            .unwrap();

        let out = import(&qc);
        assert_eq!(out.value.gates[0].name, "cs");
        assert_eq!(out.value.gates[0].controls, vec![QubitId(0)]);
        assert!(matches!(
            &out.notices[0],
            Notice::Unrecognized { raw_name, fallback, .. } if raw_name == "cs" && fallback == "cs"
        ));
    }

    #[test]
    fn test_generic_fallback_name() {
        let mut qc = QuantumCircuit::new(2);
        let op = Operation::Instruction(Instruction {
            name: "RXX".into(),
            num_qubits: 2,
            params: vec![Parameter::Numeric(0.25)],
        });
        qc.append(op, &[0, 1]).unwrap();

        let out = import(&qc);
        let g = &out.value.gates[0];
        assert_eq!(g.name, "rxx");
        assert_eq!(g.targets, vec![QubitId(0), QubitId(1)]);
        assert_eq!(g.parameters, vec![Parameter::Numeric(0.25)]);
        assert!(matches!(
            &out.notices[0],
            Notice::Unrecognized { raw_name, .. } if raw_name == "RXX(0.25)"
        ));
    }

    #[test]
    fn test_unknown_class_uses_printable_name() {
        let op = Operation::Gate(Gate {
            name: "MyGate".into(),
            class: "MyGateClass".into(),
            params: vec![Parameter::symbolic("a")],
            num_qubits: 1,
            num_ctrl_qubits: 0,
        });
        assert_eq!(
            recognize(&op, &GateRegistry::standard()),
            Recognition::Fallback("mygate".into())
        );
    }

    #[test]
    fn test_unresolved_qubit_skipped_alone() {
        let mut qc = QuantumCircuit::new(2);
        qc.append(gate("h", "HGate", 1, 0), &[0]).unwrap();
        qc.data.push(CircuitInstruction {
            operation: gate("x", "XGate", 1, 0),
            qubits: vec![Qubit::new("ghost", 0)],
        });
        qc.append(gate("z", "ZGate", 1, 0), &[1]).unwrap();

        let out = import(&qc);
        let names: Vec<_> = out.value.gates.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["h", "z"]);
        assert_eq!(out.notices.len(), 1);
        assert_eq!(out.notices[0].index(), 1);
        assert_eq!(out.value.gate_counts.as_ref().map(|c| c.len()), Some(2));
    }

    #[test]
    fn test_measure_and_barrier_skipped() {
        let mut qc = QuantumCircuit::new(1);
        qc.append(gate("h", "HGate", 1, 0), &[0]).unwrap();
        for name in ["barrier", "measure"] {
            let op = Operation::Instruction(Instruction {
                name: name.into(),
                num_qubits: 1,
                params: vec![],
            });
            qc.append(op, &[0]).unwrap();
        }

        let out = import(&qc);
        assert_eq!(out.value.len(), 1);
        assert_eq!(out.skipped(), 2);
    }

    #[test]
    fn test_wrong_parameter_count_skipped() {
        let mut qc = QuantumCircuit::new(1);
        let rx = Operation::Gate(Gate {
            name: "rx".into(),
            class: "RXGate".into(),
            params: vec![],
            num_qubits: 1,
            num_ctrl_qubits: 0,
        });
        qc.append(rx, &[0]).unwrap();

        let out = import(&qc);
        assert!(out.value.is_empty());
        assert!(matches!(
            &out.notices[0],
            Notice::Skipped { reason: SkipReason::Shape { mismatch: ShapeMismatch::Parameters { expected: 1, got: 0 } }, .. }
        ));
    }

    #[test]
    fn test_multiple_registers_flattened() {
        let mut qc = QuantumCircuit::with_registers(vec![
            QuantumRegister::new("a", 1),
            QuantumRegister::new("b", 2),
        ]);
        qc.append(gate("cz", "CZGate", 2, 1), &[2, 0]).unwrap();

        let circuit = import(&qc).value;
        assert_eq!(circuit.num_qubits, 3);
        assert_eq!(circuit.gates[0].controls, vec![QubitId(2)]);
        assert_eq!(circuit.gates[0].targets, vec![QubitId(0)]);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let qc = QuantumCircuit::with_registers(vec![
            QuantumRegister::new("q", 1),
            QuantumRegister::new("q", 1),
        ]);
        assert!(from_qiskit(&qc, &GateRegistry::standard()).is_err());
    }
}
