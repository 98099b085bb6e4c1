//! QASM 2.0 emitter.
//!
//! Emission is total: every gate becomes a line under its canonical name,
//! whether or not `qelib1.inc` defines it. Controls are written before targets.

use qcanvas_ir::{Circuit, GateApplication};

/// Emit a circuit as QASM 2.0 source. Lines are joined by `\n` with no trailing newline.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.finish()
}

struct Emitter {
    lines: Vec<String>,
}

impl Emitter {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn line(&mut self, line: String) {
        self.lines.push(line);
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.line("OPENQASM 2.0;".into());
        self.line("include \"qelib1.inc\";".into());

        if circuit.num_qubits > 0 {
            self.line(format!("qreg q[{}];", circuit.num_qubits));
        }

        for gate in &circuit.gates {
            let line = emit_gate(gate);
            self.line(line);
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn emit_gate(gate: &GateApplication) -> String {
    let qubits = gate
        .qubits()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(",");

    if gate.parameters.is_empty() {
        format!("{} {qubits};", gate.name)
    } else {
        let params = gate
            .parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({params}) {qubits};", gate.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcanvas_ir::{Parameter, QubitId};

    #[test]
    fn test_empty_circuit_boilerplate() {
        let qasm = emit(&Circuit::new(0));
        assert_eq!(qasm, "OPENQASM 2.0;\ninclude \"qelib1.inc\";");
    }

    #[test]
    fn test_single_h() {
        let mut circuit = Circuit::new(1);
        circuit.h(QubitId(0)).unwrap();
        let qasm = emit(&circuit);
        assert_eq!(qasm, "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[1];\nh q[0];");
    }

    #[test]
    fn test_controls_come_first() {
        let mut circuit = Circuit::new(3);
        circuit.ccx(QubitId(2), QubitId(0), QubitId(1)).unwrap();
        assert!(emit(&circuit).ends_with("ccx q[2],q[0],q[1];"));
    }

    #[test]
    fn test_parameters_rendered() {
        let mut circuit = Circuit::new(2);
        circuit
            .push(
                GateApplication::new("u", [QubitId(0)]).with_parameters([
                    Parameter::Numeric(0.5),
                    Parameter::symbolic("theta"),
                    Parameter::Numeric(-1.25),
                ]),
            )
            .unwrap();
        circuit
            .push(
                GateApplication::controlled("crz", [QubitId(1)], [QubitId(0)])
                    .with_parameters([Parameter::symbolic("pi/2")]),
            )
            .unwrap();
        let qasm = emit(&circuit);
        assert!(qasm.contains("\nu(0.5,theta,-1.25) q[0];"));
        assert!(qasm.ends_with("crz(pi/2) q[1],q[0];"));
    }

    #[test]
    fn test_no_classical_register() {
        let mut circuit = Circuit::new(2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        assert!(!emit(&circuit).contains("creg"));
    }
}
