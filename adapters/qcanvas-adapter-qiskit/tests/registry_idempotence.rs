//! Every registry gate with a Qiskit recipe survives export then import.

use proptest::prelude::*;
use qcanvas_adapter_qiskit::{from_qiskit, to_qiskit};
use qcanvas_ir::{Circuit, GateApplication, GateEntry, GateRegistry, Parameter, QubitId};

fn application(entry: &GateEntry, qubits: &[u32], param: f64) -> GateApplication {
    let ids: Vec<QubitId> = qubits.iter().copied().map(QubitId).collect();
    let (controls, targets) = ids.split_at(entry.arity.controls);
    GateApplication::new(entry.name, targets.to_vec())
        .with_controls(controls.to_vec())
        .with_parameters((0..entry.params.count).map(|i| Parameter::Numeric(param + i as f64)))
}

#[test]
fn test_every_qiskit_gate_round_trips() {
    let registry = GateRegistry::standard();

    for entry in registry.entries().iter().filter(|e| e.qiskit.is_some()) {
        let qubits: Vec<u32> = (0..entry.arity.total() as u32).rev().collect();
        let mut circuit = Circuit::new(3);
        circuit.push(application(entry, &qubits, 0.5)).unwrap();

        let exported = to_qiskit(&circuit, &registry);
        assert!(exported.is_lossless(), "{}: {:?}", entry.name, exported.notices);

        let imported = from_qiskit(&exported.value, &registry).unwrap();
        assert!(imported.is_lossless(), "{}: {:?}", entry.name, imported.notices);
        assert_eq!(imported.value.gates, circuit.gates, "gate {}", entry.name);
    }
}

#[test]
fn test_alias_exports_under_canonical_class() {
    let registry = GateRegistry::standard();
    let mut circuit = Circuit::new(3);
    circuit
        .push(GateApplication::controlled("toffoli", [QubitId(0), QubitId(1)], [QubitId(2)]))
        .unwrap();

    let qc = to_qiskit(&circuit, &registry).into_value();
    let back = from_qiskit(&qc, &registry).unwrap().into_value();
    assert_eq!(back.gates[0].name, "ccx");
}

#[test]
fn test_json_file_round_trip() {
    let registry = GateRegistry::standard();
    let mut circuit = Circuit::named("json", 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();

    let json = to_qiskit(&circuit, &registry).into_value().to_json().unwrap();
    let qc = qcanvas_adapter_qiskit::QuantumCircuit::from_json(&json).unwrap();
    let back = from_qiskit(&qc, &registry).unwrap().into_value();
    assert_eq!(back.gates, circuit.gates);
}

fn arb_gate() -> impl Strategy<Value = GateApplication> {
    let registry = GateRegistry::standard();
    let entries: Vec<GateEntry> = registry
        .entries()
        .iter()
        .filter(|e| e.qiskit.is_some())
        .cloned()
        .collect();

    (
        prop::sample::select(entries),
        Just((0..4u32).collect::<Vec<_>>()).prop_shuffle(),
        -3.0f64..3.0,
    )
        .prop_map(|(entry, qubits, param)| {
            application(&entry, &qubits[..entry.arity.total()], param)
        })
}

proptest! {
    #[test]
    fn registry_gates_survive_qiskit(gates in prop::collection::vec(arb_gate(), 0..16)) {
        let registry = GateRegistry::standard();
        let mut circuit = Circuit::new(4);
        circuit.gates = gates;

        let qc = to_qiskit(&circuit, &registry);
        prop_assert!(qc.is_lossless());
        let back = from_qiskit(&qc.value, &registry).unwrap();
        prop_assert!(back.is_lossless());
        prop_assert_eq!(back.value.gates, circuit.gates);
    }
}
