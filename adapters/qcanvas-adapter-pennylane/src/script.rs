//! PennyLane Python script generation.
//!
//! The script builds a `default.qubit` device sized to the circuit, applies
//! every gate inside a `@qml.qnode` function, and returns
//! `qml.expval(qml.PauliZ(0))`. A circuit without qubits returns
//! `qml.state()` from an empty body instead.

use qcanvas_ir::{
    Circuit, Converted, GateApplication, GateRegistry, NoticeLog, Parameter, QubitId,
    Representation, SkipReason,
};
use tracing::debug;

const INDENT: &str = "    ";

/// Generate a runnable PennyLane script for a circuit.
///
/// Gates that cannot be expressed become a comment line in the script and a
/// notice in the result; generation always completes.
pub fn to_script(circuit: &Circuit, registry: &GateRegistry) -> Converted<String> {
    let mut writer = ScriptWriter::new();
    let mut log = NoticeLog::new();

    writer.line("import pennylane as qml");
    writer.line("from pennylane import numpy as np");
    writer.blank();
    writer.line(format!(
        "dev = qml.device('default.qubit', wires={})",
        circuit.num_qubits
    ));
    writer.blank();
    writer.line("@qml.qnode(dev)");
    writer.line("def circuit():");

    if circuit.num_qubits == 0 {
        writer.body("pass # No qubits in circuit");
        writer.body("return qml.state()");
        return log.finish(writer.finish());
    }

    for (index, gate) in circuit.gates.iter().enumerate() {
        match render_gate(gate, registry) {
            Ok(statement) => writer.body(statement),
            Err(reason) => {
                let kind = if gate.controls.is_empty() { "gate" } else { "controlled gate" };
                writer.body(format!("# Skipped {kind} '{}': {reason}", gate.name));
                log.skip(index, gate.name.clone(), reason);
            }
        }
    }

    writer.body("return qml.expval(qml.PauliZ(0))");

    debug!(gates = circuit.gates.len(), "generated PennyLane script");
    log.finish(writer.finish())
}

fn render_gate(gate: &GateApplication, registry: &GateRegistry) -> Result<String, SkipReason> {
    let recipe = registry
        .lookup_recipe(&gate.name, Representation::PennyLane)
        .ok_or(SkipReason::NoRecipe {
            representation: Representation::PennyLane,
        })?;
    recipe.entry.check(gate)?;

    let call = |wires: &[QubitId]| {
        let mut args: Vec<String> = gate.parameters.iter().map(render_parameter).collect();
        args.push(format!("wires={}", render_wires(wires)));
        format!("qml.{}({})", recipe.identifier, args.join(", "))
    };

    if recipe.natively_controlled() || gate.controls.is_empty() {
        let wires: Vec<QubitId> = gate.qubits().collect();
        Ok(call(&wires))
    } else {
        Ok(format!(
            "qml.ctrl({}, control={})",
            call(&gate.targets),
            render_wires(&gate.controls)
        ))
    }
}

/// `0` for one wire, `[0, 1]` for several.
fn render_wires(wires: &[QubitId]) -> String {
    match wires {
        [single] => single.0.to_string(),
        many => {
            let items: Vec<String> = many.iter().map(|q| q.0.to_string()).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Numeric values as Python float literals; symbolic text with `pi` bound to `np.pi`.
pub fn render_parameter(param: &Parameter) -> String {
    match param {
        Parameter::Numeric(v) => python_float(*v),
        Parameter::Symbolic(text) => bind_pi(text),
    }
}

/// Python `repr` of a float: `1.0`, `0.5`, `1e-05`, `1.5e+20`.
pub fn python_float(v: f64) -> String {
    if v.is_nan() {
        return "np.nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "np.inf" } else { "-np.inf" }.to_string();
    }

    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let exp = format!("{v:e}");
        let (mantissa, exponent) = exp.split_once('e').unwrap_or((exp.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let plain = v.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// Replace every standalone `pi` identifier with `np.pi`.
fn bind_pi(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' || next == '.' {
                    end = i + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let token = &text[start..end];
            out.push_str(if token == "pi" { "np.pi" } else { token });
        } else {
            out.push(c);
        }
    }

    out
}

struct ScriptWriter {
    lines: Vec<String>,
}

impl ScriptWriter {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn body(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("{INDENT}{}", line.as_ref()));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        let mut script = self.lines.join("\n");
        script.push('\n');
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcanvas_ir::{Notice, QubitId};

    fn script(circuit: &Circuit) -> Converted<String> {
        to_script(circuit, &GateRegistry::standard())
    }

    fn gate(name: &str, controls: &[u32], targets: &[u32]) -> GateApplication {
        GateApplication::controlled(
            name,
            controls.iter().copied().map(QubitId),
            targets.iter().copied().map(QubitId),
        )
    }

    fn circuit_with(num_qubits: u32, gates: Vec<GateApplication>) -> Circuit {
        let mut circuit = Circuit::new(num_qubits);
        for g in gates {
            circuit.push(g).unwrap();
        }
        circuit
    }

    #[test]
    fn test_empty_circuit() {
        let out = script(&Circuit::new(0)).into_value();
        assert!(out.contains("import pennylane as qml"));
        assert!(out.contains("dev = qml.device('default.qubit', wires=0)"));
        assert!(out.contains("@qml.qnode(dev)"));
        assert!(out.contains("def circuit():"));
        assert!(out.contains("    pass # No qubits in circuit"));
        assert!(out.contains("    return qml.state()"));
        assert!(!out.contains("expval"));
    }

    #[test]
    fn test_full_layout() {
        let circuit = circuit_with(1, vec![gate("h", &[], &[0])]);
        let expected = "import pennylane as qml\n\
                        from pennylane import numpy as np\n\
                        \n\
                        dev = qml.device('default.qubit', wires=1)\n\
                        \n\
                        @qml.qnode(dev)\n\
                        def circuit():\n    \
                        qml.Hadamard(wires=0)\n    \
                        return qml.expval(qml.PauliZ(0))\n";
        assert_eq!(script(&circuit).into_value(), expected);
    }

    #[test]
    fn test_native_multi_wire_forms() {
        let circuit = circuit_with(
            3,
            vec![
                gate("cx", &[0], &[1]),
                gate("toffoli", &[0, 1], &[2]),
                gate("ch", &[0], &[1]),
                gate("crx", &[0], &[1]).with_parameters([Parameter::Numeric(0.785)]),
            ],
        );
        let out = script(&circuit).into_value();
        assert!(out.contains("    qml.CNOT(wires=[0, 1])"));
        assert!(out.contains("    qml.Toffoli(wires=[0, 1, 2])"));
        assert!(out.contains("    qml.CH(wires=[0, 1])"));
        assert!(out.contains("    qml.CRX(0.785, wires=[0, 1])"));
    }

    #[test]
    fn test_generic_control_wrapper() {
        let circuit = circuit_with(
            3,
            vec![
                gate("h", &[0], &[1]),
                gate("x", &[0, 1], &[2]),
                gate("rx", &[0], &[1]).with_parameters([Parameter::Numeric(0.785)]),
            ],
        );
        let out = script(&circuit).into_value();
        assert!(out.contains("    qml.ctrl(qml.Hadamard(wires=1), control=0)"));
        assert!(out.contains("    qml.ctrl(qml.PauliX(wires=2), control=[0, 1])"));
        assert!(out.contains("    qml.ctrl(qml.RX(0.785, wires=1), control=0)"));
    }

    #[test]
    fn test_parameters() {
        let circuit = circuit_with(
            1,
            vec![
                gate("rx", &[], &[0]).with_parameters([Parameter::symbolic("pi/2")]),
                gate("rz", &[], &[0]).with_parameters([Parameter::Numeric(1.57079632679)]),
                gate("ry", &[], &[0]).with_parameters([Parameter::Numeric(1.0)]),
                gate("p", &[], &[0]).with_parameters([Parameter::symbolic("-pi/4")]),
            ],
        );
        let out = script(&circuit).into_value();
        assert!(out.contains("    qml.RX(np.pi/2, wires=0)"));
        assert!(out.contains("    qml.RZ(1.57079632679, wires=0)"));
        assert!(out.contains("    qml.RY(1.0, wires=0)"));
        assert!(out.contains("    qml.PhaseShift(-np.pi/4, wires=0)"));
    }

    #[test]
    fn test_unknown_gate_becomes_comment() {
        let circuit = circuit_with(
            2,
            vec![
                gate("unknown_gate", &[], &[0]),
                gate("unknown_base_gate", &[0], &[1]),
                gate("x", &[], &[1]),
            ],
        );
        let out = script(&circuit);
        assert!(out.value.contains("    # Skipped gate 'unknown_gate': no PennyLane equivalent"));
        assert!(out.value.contains("    # Skipped controlled gate 'unknown_base_gate': no PennyLane equivalent"));
        assert!(out.value.contains("    qml.PauliX(wires=1)"));
        assert_eq!(out.notices.len(), 2);
        assert!(matches!(&out.notices[1], Notice::Skipped { index: 1, .. }));
    }

    #[test]
    fn test_python_float() {
        assert_eq!(python_float(0.5), "0.5");
        assert_eq!(python_float(2.0), "2.0");
        assert_eq!(python_float(-3.0), "-3.0");
        assert_eq!(python_float(0.0), "0.0");
        assert_eq!(python_float(1e-5), "1e-05");
        assert_eq!(python_float(1.5e20), "1.5e+20");
        assert_eq!(python_float(0.0001), "0.0001");
    }

    #[test]
    fn test_bind_pi() {
        assert_eq!(bind_pi("pi"), "np.pi");
        assert_eq!(bind_pi("2*pi/3"), "2*np.pi/3");
        assert_eq!(bind_pi("theta+pi"), "theta+np.pi");
        assert_eq!(bind_pi("pivot"), "pivot");
        assert_eq!(bind_pi("sin(pi)"), "sin(np.pi)");
    }
}
