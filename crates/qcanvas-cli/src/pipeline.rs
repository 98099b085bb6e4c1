//! The request pipeline: import, rewrite, export.
//!
//! Each stage is a pure function over values. Structural failures abort with
//! a [`PipelineError`]; per-gate problems are collected as notices from both
//! the import and the export side.

use qcanvas_adapter_pennylane::{QuantumTape, from_pennylane, to_pennylane, to_script};
use qcanvas_adapter_qiskit::{QuantumCircuit, from_qiskit, to_qiskit};
use qcanvas_compile::{PassManager, PassPolicy, PassRegistry};
use qcanvas_ir::{
    Circuit, Converted, GateApplication, GateRegistry, IrError, Notice, NoticeLog, SkipReason,
};
use tracing::{debug, info};

use crate::cli::Format;
use crate::error::{PipelineError, PipelineResult};

/// Result of a full conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The rendered output.
    pub output: String,
    /// Instructions dropped while building the canonical circuit.
    pub import_notices: Vec<Notice>,
    /// Gates dropped while rendering the output.
    pub export_notices: Vec<Notice>,
}

impl Conversion {
    /// True when nothing was dropped on either side.
    pub fn is_lossless(&self) -> bool {
        self.import_notices.is_empty() && self.export_notices.is_empty()
    }

    /// Number of instructions dropped on either side. Unrecognized gates
    /// are kept under a fallback name and do not count.
    pub fn skipped(&self) -> usize {
        self.notices().filter(|n| n.is_skip()).count()
    }

    /// All notices, import side first.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.import_notices.iter().chain(&self.export_notices)
    }
}

/// Build a canonical circuit from `source` in the given format.
///
/// The result always carries fresh statistics.
pub fn import(
    source: &str,
    format: Format,
    registry: &GateRegistry,
) -> PipelineResult<Converted<Circuit>> {
    if !format.is_importable() {
        return Err(PipelineError::NotImportable(format));
    }

    let converted = match format {
        Format::Qasm => qcanvas_qasm2::parse(source, registry)?,
        Format::Json => import_canonical(source, registry)?,
        Format::Qiskit => from_qiskit(&QuantumCircuit::from_json(source)?, registry)?,
        Format::Pennylane => from_pennylane(&QuantumTape::from_json(source)?, registry)?,
        Format::PennylaneScript => return Err(PipelineError::NotImportable(format)),
    };

    debug!(
        %format,
        gates = converted.value.gates.len(),
        dropped = converted.notices.iter().filter(|n| n.is_skip()).count(),
        "imported circuit"
    );
    Ok(converted)
}

/// Read canonical circuit JSON.
///
/// Gate names are lower-cased and resolved to their canonical spelling
/// (`CNOT` becomes `cx`); names the registry does not know are kept under the
/// lower-cased spelling with an unrecognized notice. Gates that break the
/// circuit invariants (out-of-range or repeated qubits, no targets, wrong
/// shape for their registry entry) are dropped with a notice; the rest are
/// kept in order. Supplied statistics are ignored and recomputed.
pub fn import_canonical(
    source: &str,
    registry: &GateRegistry,
) -> PipelineResult<Converted<Circuit>> {
    let raw: Circuit = serde_json::from_str(source)?;
    let mut log = NoticeLog::new();
    let mut gates = Vec::with_capacity(raw.gates.len());

    for (index, gate) in raw.gates.iter().enumerate() {
        let lowered = gate.name.to_lowercase();
        let name = match registry.canonical_name(&lowered) {
            Some(canonical) => canonical.to_string(),
            None => {
                log.unrecognized(index, gate.name.clone(), lowered.clone());
                lowered
            }
        };
        let gate = GateApplication {
            name,
            ..gate.clone()
        };

        match raw.check_gate(&gate, registry) {
            Ok(()) => gates.push(gate),
            Err(IrError::Shape { mismatch, .. }) => log.skip(index, gate.name, mismatch),
            Err(e) => log.skip(
                index,
                gate.name,
                SkipReason::Invalid {
                    detail: e.to_string(),
                },
            ),
        }
    }

    Ok(log.finish(raw.with_gates(gates).with_fresh_stats()))
}

/// Render a circuit in the given format.
pub fn export(
    circuit: &Circuit,
    format: Format,
    registry: &GateRegistry,
) -> PipelineResult<Converted<String>> {
    let rendered = match format {
        Format::Qasm => Converted::new(qcanvas_qasm2::emit(circuit)),
        Format::Json => Converted::new(serde_json::to_string_pretty(circuit)?),
        Format::Qiskit => {
            let converted = to_qiskit(circuit, registry);
            let json = converted.value.to_json()?;
            Converted {
                value: json,
                notices: converted.notices,
            }
        }
        Format::Pennylane => {
            let converted = to_pennylane(circuit, registry);
            let json = converted.value.to_json()?;
            Converted {
                value: json,
                notices: converted.notices,
            }
        }
        Format::PennylaneScript => to_script(circuit, registry),
    };
    Ok(rendered)
}

/// Run the named passes in order.
///
/// The returned circuit has stale statistics whenever at least one pass ran;
/// callers that report statistics refresh them.
pub fn apply_passes<S: AsRef<str>>(
    circuit: &Circuit,
    names: &[S],
    policy: PassPolicy,
) -> PipelineResult<Circuit> {
    if names.is_empty() {
        return Ok(circuit.clone());
    }
    let manager = PassManager::from_names(names, &PassRegistry::standard(), policy)?;
    Ok(manager.run(circuit)?)
}

/// Import, apply passes, recompute statistics.
///
/// The optimized circuit is validated against the registry before it is
/// returned.
pub fn optimize<S: AsRef<str>>(
    source: &str,
    format: Format,
    names: &[S],
    policy: PassPolicy,
    registry: &GateRegistry,
) -> PipelineResult<Converted<Circuit>> {
    let imported = import(source, format, registry)?;
    let before = imported.value.gates.len();
    let optimized = apply_passes(&imported.value, names, policy)?.with_fresh_stats();
    optimized.validate(registry)?;

    info!(
        before,
        after = optimized.gates.len(),
        "optimized circuit"
    );
    Ok(Converted {
        value: optimized,
        notices: imported.notices,
    })
}

/// Import from one format, apply passes, export to another.
pub fn convert<S: AsRef<str>>(
    source: &str,
    from: Format,
    to: Format,
    names: &[S],
    policy: PassPolicy,
    registry: &GateRegistry,
) -> PipelineResult<Conversion> {
    let imported = import(source, from, registry)?;
    let circuit = apply_passes(&imported.value, names, policy)?;
    circuit.validate(registry)?;
    let exported = export(&circuit, to, registry)?;

    Ok(Conversion {
        output: exported.value,
        import_notices: imported.notices,
        export_notices: exported.notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELL: &str = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\ncx q[0],q[1];";

    #[test]
    fn test_qasm_to_script() {
        let registry = GateRegistry::standard();
        let conversion = convert::<&str>(
            BELL,
            Format::Qasm,
            Format::PennylaneScript,
            &[],
            PassPolicy::Lenient,
            &registry,
        )
        .unwrap();

        assert!(conversion.is_lossless());
        assert!(conversion.output.contains("    qml.Hadamard(wires=0)"));
        assert!(conversion.output.contains("    qml.CNOT(wires=[0, 1])"));
    }

    #[test]
    fn test_script_is_not_importable() {
        let err = import("import pennylane", Format::PennylaneScript, &GateRegistry::standard())
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotImportable(Format::PennylaneScript)));
    }

    #[test]
    fn test_canonical_json_drops_out_of_range_gate() {
        let json = r#"{
            "num_qubits": 2,
            "gates": [
                {"name": "h", "targets": [0]},
                {"name": "x", "targets": [5]},
                {"name": "cx", "controls": [0], "targets": [1]}
            ],
            "gate_counts": {"bogus": 9},
            "depth": 42
        }"#;

        let converted = import_canonical(json, &GateRegistry::standard()).unwrap();
        assert_eq!(converted.value.gates.len(), 2);
        assert_eq!(converted.notices.len(), 1);
        assert_eq!(converted.notices[0].index(), 1);
        assert_eq!(converted.value.depth, Some(2));
        assert_eq!(converted.value.gate_counts.as_ref().and_then(|c| c.get("bogus")), None);
    }

    #[test]
    fn test_optimize_recomputes_statistics() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nh q[0];\nh q[0];\nx q[0];";
        let optimized = optimize(
            source,
            Format::Qasm,
            &["remove_self_inverse_pairs"],
            PassPolicy::Lenient,
            &GateRegistry::standard(),
        )
        .unwrap()
        .into_value();

        assert_eq!(optimized.gates.len(), 1);
        assert_eq!(optimized.depth, Some(1));
        assert_eq!(optimized.gate_counts.unwrap().get("x"), Some(&1));
    }

    #[test]
    fn test_strict_policy_rejects_unknown_pass() {
        let err = apply_passes(&Circuit::new(1), &["nope"], PassPolicy::Strict).unwrap_err();
        assert!(matches!(err, PipelineError::Compile(_)));
    }

    #[test]
    fn test_dialect_rejection_is_structural() {
        let err = import("OPENQASM 3.0;", Format::Qasm, &GateRegistry::standard()).unwrap_err();
        match err {
            PipelineError::Qasm(e) => assert!(e.is_dialect_error()),
            other => panic!("expected QASM error, got {other:?}"),
        }
    }
}
