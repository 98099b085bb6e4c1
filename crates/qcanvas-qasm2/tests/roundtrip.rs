//! Text round-trip tests: importing emitted QASM reproduces the circuit.

use proptest::prelude::*;
use qcanvas_ir::{Circuit, GateApplication, GateRegistry, Parameter, QubitId};
use qcanvas_qasm2::{ParseError, emit, parse};

const NUM_QUBITS: u32 = 4;

fn arb_angle() -> impl Strategy<Value = Parameter> {
    prop_oneof![
        (-10.0f64..10.0).prop_map(Parameter::Numeric),
        prop::sample::select(vec!["theta", "phi", "lam"]).prop_map(Parameter::symbolic),
    ]
}

fn distinct(n: usize) -> impl Strategy<Value = Vec<QubitId>> {
    prop::sample::subsequence((0..NUM_QUBITS).collect::<Vec<_>>(), n)
        .prop_shuffle()
        .prop_map(|qs| qs.into_iter().map(QubitId).collect())
}

fn arb_gate() -> impl Strategy<Value = GateApplication> {
    prop_oneof![
        (prop::sample::select(vec!["h", "x", "y", "z", "s", "t", "sdg", "tdg", "sx"]), distinct(1))
            .prop_map(|(name, qs)| GateApplication::new(name, qs)),
        (prop::sample::select(vec!["rx", "ry", "rz", "p"]), arb_angle(), distinct(1))
            .prop_map(|(name, theta, qs)| GateApplication::new(name, qs).with_parameters([theta])),
        (arb_angle(), arb_angle(), arb_angle(), distinct(1)).prop_map(|(a, b, c, qs)| {
            GateApplication::new("u", qs).with_parameters([a, b, c])
        }),
        (prop::sample::select(vec!["cx", "cy", "cz", "ch"]), distinct(2)).prop_map(|(name, qs)| {
            GateApplication::controlled(name, [qs[0]], [qs[1]])
        }),
        (prop::sample::select(vec!["crx", "crz", "cp"]), arb_angle(), distinct(2)).prop_map(
            |(name, theta, qs)| {
                GateApplication::controlled(name, [qs[0]], [qs[1]]).with_parameters([theta])
            }
        ),
        distinct(2).prop_map(|qs| GateApplication::new("swap", qs)),
        distinct(3).prop_map(|qs| GateApplication::controlled("ccx", [qs[0], qs[1]], [qs[2]])),
        distinct(3).prop_map(|qs| GateApplication::controlled("cswap", [qs[0]], [qs[1], qs[2]])),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    prop::collection::vec(arb_gate(), 0..24).prop_map(|gates| {
        let mut circuit = Circuit::new(NUM_QUBITS);
        circuit.gates = gates;
        circuit.with_fresh_stats()
    })
}

proptest! {
    #[test]
    fn emitted_text_imports_back(circuit in arb_circuit()) {
        let registry = GateRegistry::standard();
        let converted = parse(&emit(&circuit), &registry).unwrap();

        prop_assert!(converted.is_lossless(), "notices: {:?}", converted.notices);
        prop_assert_eq!(converted.value.num_qubits, circuit.num_qubits);
        prop_assert_eq!(&converted.value.gates, &circuit.gates);
        prop_assert_eq!(converted.value.depth, circuit.depth);
        prop_assert_eq!(converted.value.gate_counts, circuit.gate_counts);
    }
}

#[test]
fn test_control_ordering_survives_round_trip() {
    let registry = GateRegistry::standard();
    let source = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[3];\nccx q[2],q[0],q[1];";
    let circuit = parse(source, &registry).unwrap().value;

    assert_eq!(circuit.gates[0].controls, vec![QubitId(2), QubitId(0)]);
    assert_eq!(circuit.gates[0].targets, vec![QubitId(1)]);
    assert_eq!(emit(&circuit), source);
}

#[test]
fn test_empty_circuit() {
    let registry = GateRegistry::standard();
    let circuit = parse("OPENQASM 2.0;\ninclude \"qelib1.inc\";", &registry)
        .unwrap()
        .value;

    assert_eq!(circuit.num_qubits, 0);
    assert!(circuit.is_empty());
    assert_eq!(circuit.depth, Some(0));
    assert_eq!(emit(&circuit), "OPENQASM 2.0;\ninclude \"qelib1.inc\";");
}

#[test]
fn test_aliases_import_under_canonical_names() {
    let registry = GateRegistry::standard();
    let source = "OPENQASM 2.0;\nqreg q[2];\nu3(0.1,0.2,0.3) q[0];\ncu1(0.5) q[0],q[1];\nCX q[1],q[0];";
    let circuit = parse(source, &registry).unwrap().value;

    let names: Vec<&str> = circuit.gates.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["u", "cp", "cx"]);
    assert_eq!(circuit.gates[1].parameters, vec![Parameter::Numeric(0.5)]);
}

#[test]
fn test_later_dialect_rejected_before_anything_else() {
    let registry = GateRegistry::standard();
    let err = parse("OPENQASM 3.0;\nqubit[2] q;\nh q[0];", &registry).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedVersion(_)));
    assert!(err.to_string().contains("OPENQASM 2.0"));
}
