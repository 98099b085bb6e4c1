//! The canonical circuit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dag::DependencyDag;
use crate::error::{IrError, IrResult};
use crate::gate::GateApplication;
use crate::parameter::Parameter;
use crate::qubit::QubitId;
use crate::registry::GateRegistry;

/// Gate name to number of occurrences. Ordered so JSON output is stable.
pub type GateCounts = BTreeMap<String, usize>;

/// Descriptive data with no semantic weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitMetadata {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CircuitMetadata {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }
}

/// An ordered gate sequence over `num_qubits` indexed qubits.
///
/// `gate_counts` and `depth` are derived. `None` means stale: call
/// [`Circuit::refresh_stats`] before trusting them. Anything that changes
/// `gates` through this API clears them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits. Fixed for the circuit's lifetime.
    pub num_qubits: u32,
    /// Gates in execution order.
    #[serde(default)]
    pub gates: Vec<GateApplication>,
    /// Optional descriptive metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CircuitMetadata>,
    /// Derived gate histogram.
    #[serde(default)]
    pub gate_counts: Option<GateCounts>,
    /// Derived circuit depth.
    #[serde(default)]
    pub depth: Option<usize>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            metadata: None,
            gate_counts: None,
            depth: None,
        }
    }

    /// Create an empty circuit with a display name.
    pub fn named(name: impl Into<String>, num_qubits: u32) -> Self {
        Self::new(num_qubits).with_metadata(CircuitMetadata::named(name))
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: CircuitMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.name.as_deref())
    }

    /// A new circuit with the same width and metadata but a different gate list.
    ///
    /// Statistics on the result are stale. `self` is untouched.
    pub fn with_gates(&self, gates: Vec<GateApplication>) -> Self {
        Self {
            num_qubits: self.num_qubits,
            gates,
            metadata: self.metadata.clone(),
            gate_counts: None,
            depth: None,
        }
    }

    /// Append a gate after checking qubit range and disjointness.
    pub fn push(&mut self, gate: GateApplication) -> IrResult<&mut Self> {
        gate.validate(self.num_qubits)?;
        self.gates.push(gate);
        self.clear_stats();
        Ok(self)
    }

    /// Apply Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("h", [qubit]))
    }

    /// Apply Pauli-X.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("x", [qubit]))
    }

    /// Apply Pauli-Y.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("y", [qubit]))
    }

    /// Apply Pauli-Z.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("z", [qubit]))
    }

    /// Apply an X rotation.
    pub fn rx(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("rx", [qubit]).with_parameters([theta.into()]))
    }

    /// Apply a Z rotation.
    pub fn rz(&mut self, theta: impl Into<Parameter>, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::new("rz", [qubit]).with_parameters([theta.into()]))
    }

    /// Apply CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::controlled("cx", [control], [target]))
    }

    /// Apply Toffoli.
    pub fn ccx(&mut self, c0: QubitId, c1: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateApplication::controlled("ccx", [c0, c1], [target]))
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Count gates by name.
    pub fn compute_gate_counts(&self) -> GateCounts {
        let mut counts = GateCounts::new();
        for gate in &self.gates {
            *counts.entry(gate.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Longest dependency chain through shared qubits.
    pub fn compute_depth(&self) -> usize {
        DependencyDag::from_gates(&self.gates).depth()
    }

    /// Build the dependency DAG.
    pub fn dag(&self) -> DependencyDag {
        DependencyDag::from_gates(&self.gates)
    }

    /// Recompute `gate_counts` and `depth` from `gates`.
    pub fn refresh_stats(&mut self) {
        self.gate_counts = Some(self.compute_gate_counts());
        self.depth = Some(self.compute_depth());
    }

    /// Consume and return with fresh statistics.
    #[must_use]
    pub fn with_fresh_stats(mut self) -> Self {
        self.refresh_stats();
        self
    }

    /// Mark statistics stale.
    pub fn clear_stats(&mut self) {
        self.gate_counts = None;
        self.depth = None;
    }

    /// True if either statistic is missing.
    pub fn stats_are_stale(&self) -> bool {
        self.gate_counts.is_none() || self.depth.is_none()
    }

    /// Check that any statistics present agree with `gates`.
    pub fn stats_are_consistent(&self) -> bool {
        let counts_ok = self
            .gate_counts
            .as_ref()
            .is_none_or(|c| *c == self.compute_gate_counts());
        let depth_ok = self.depth.is_none_or(|d| d == self.compute_depth());
        counts_ok && depth_ok
    }

    /// Check every gate against the circuit invariants.
    ///
    /// See [`Circuit::check_gate`]; the first failing gate is reported.
    pub fn validate(&self, registry: &GateRegistry) -> IrResult<()> {
        self.gates
            .iter()
            .try_for_each(|gate| self.check_gate(gate, registry))
    }

    /// Check one gate against this circuit's invariants.
    ///
    /// Range, disjointness and finiteness apply to every gate. Gates the
    /// registry knows are also checked for qubit and parameter shape;
    /// unregistered gates pass through, since importers keep them under a
    /// fallback name.
    pub fn check_gate(&self, gate: &GateApplication, registry: &GateRegistry) -> IrResult<()> {
        gate.validate(self.num_qubits)?;
        if let Some(entry) = registry.entry(&gate.name) {
            entry.check(gate).map_err(|mismatch| IrError::Shape {
                gate_name: gate.name.clone(),
                mismatch,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ShapeMismatch;

    #[test]
    fn test_builder_and_stats() {
        let mut circuit = Circuit::named("bell", 2);
        circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        assert!(circuit.stats_are_stale());
        circuit.refresh_stats();
        assert_eq!(circuit.depth, Some(2));
        assert_eq!(circuit.gate_counts.as_ref().unwrap()["h"], 1);
        assert_eq!(circuit.gate_counts.as_ref().unwrap()["cx"], 1);
        assert!(circuit.stats_are_consistent());

        circuit.x(QubitId(1)).unwrap();
        assert!(circuit.stats_are_stale());
    }

    #[test]
    fn test_push_rejects_out_of_range() {
        let mut circuit = Circuit::new(1);
        assert!(matches!(
            circuit.cx(QubitId(0), QubitId(1)),
            Err(IrError::QubitOutOfRange { .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_with_gates_leaves_original() {
        let original = Circuit::named("orig", 1).with_fresh_stats();
        let derived = original.with_gates(vec![GateApplication::new("x", [QubitId(0)])]);
        assert!(original.is_empty());
        assert_eq!(original.depth, Some(0));
        assert_eq!(derived.len(), 1);
        assert_eq!(derived.name(), Some("orig"));
        assert!(derived.stats_are_stale());
    }

    #[test]
    fn test_inconsistent_stats_detected() {
        let mut circuit = Circuit::new(1);
        circuit.h(QubitId(0)).unwrap();
        circuit.depth = Some(5);
        assert!(!circuit.stats_are_consistent());
    }

    #[test]
    fn test_validate_uses_registry() {
        let registry = GateRegistry::standard();
        let mut circuit = Circuit::new(2);
        circuit.gates.push(GateApplication::new("rx", [QubitId(0)]));
        assert!(matches!(
            circuit.validate(&registry),
            Err(IrError::Shape { .. })
        ));

        let mut custom = Circuit::new(2);
        custom
            .gates
            .push(GateApplication::new("mystery", [QubitId(0), QubitId(1)]));
        assert!(custom.validate(&registry).is_ok());
    }

    #[test]
    fn test_check_gate_single() {
        let registry = GateRegistry::standard();
        let circuit = Circuit::new(1);

        let bare_rx = GateApplication::new("rx", [QubitId(0)]);
        assert!(matches!(
            circuit.check_gate(&bare_rx, &registry),
            Err(IrError::Shape {
                mismatch: ShapeMismatch::Parameters { expected: 1, got: 0 },
                ..
            })
        ));

        let far = GateApplication::new("h", [QubitId(3)]);
        assert!(matches!(
            circuit.check_gate(&far, &registry),
            Err(IrError::QubitOutOfRange { .. })
        ));

        let ok = GateApplication::new("rx", [QubitId(0)]).with_parameters([Parameter::Numeric(0.1)]);
        assert!(circuit.check_gate(&ok, &registry).is_ok());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "num_qubits": 2,
            "gates": [
                {"name": "h", "targets": [0]},
                {"name": "cx", "targets": [1], "controls": [0]}
            ],
            "metadata": {"name": "Bell"}
        }"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.name(), Some("Bell"));
        assert!(circuit.stats_are_stale());

        let out = serde_json::to_value(circuit.with_fresh_stats()).unwrap();
        assert_eq!(out["depth"], 2);
        assert_eq!(out["gate_counts"]["cx"], 1);
    }

    #[test]
    fn test_stale_stats_serialize_as_null() {
        let out = serde_json::to_value(Circuit::new(0)).unwrap();
        assert!(out["gate_counts"].is_null());
        assert!(out["depth"].is_null());
        assert!(out.get("metadata").is_none());
    }
}
