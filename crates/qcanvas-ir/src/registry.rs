//! The gate registry: canonical gate names mapped to each representation.
//!
//! A [`GateRegistry`] is an ordinary value. Converters take it by reference,
//! so tests can swap in a reduced or extended table. Lookups never fail
//! loudly: a missing entry is `None`, and callers decide whether that means
//! skip-with-notice or fall back to a generic name.
//!
//! Recognition identifiers are matched in declaration order: when two
//! entries claim the same identifier, the earlier one wins.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::GateApplication;
use crate::qubit::QubitId;

/// A representation the registry knows how to construct and recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// OpenQASM 2.0 text.
    Qasm2,
    /// Qiskit-style `QuantumCircuit` object graph.
    Qiskit,
    /// PennyLane operations, both object form and generated scripts.
    PennyLane,
}

impl Representation {
    /// All representations, in a fixed order.
    pub const ALL: [Representation; 3] = [
        Representation::Qasm2,
        Representation::Qiskit,
        Representation::PennyLane,
    ];

    fn slot(self) -> usize {
        match self {
            Representation::Qasm2 => 0,
            Representation::Qiskit => 1,
            Representation::PennyLane => 2,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Qasm2 => write!(f, "OpenQASM 2.0"),
            Representation::Qiskit => write!(f, "Qiskit"),
            Representation::PennyLane => write!(f, "PennyLane"),
        }
    }
}

/// How many of a gate's qubits are controls and how many are targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Leading control qubits.
    pub controls: usize,
    /// Trailing target qubits.
    pub targets: usize,
}

impl Arity {
    /// Create an arity.
    pub const fn new(controls: usize, targets: usize) -> Self {
        Self { controls, targets }
    }

    /// Total number of qubits.
    pub const fn total(self) -> usize {
        self.controls + self.targets
    }
}

/// Parameter count and kind accepted by a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Exact number of parameters.
    pub count: usize,
    /// Whether symbolic parameters are allowed.
    pub symbolic: bool,
}

impl ParamSpec {
    /// No parameters.
    pub const NONE: ParamSpec = ParamSpec {
        count: 0,
        symbolic: false,
    };
    /// One real angle, numeric or symbolic.
    pub const ANGLE: ParamSpec = ParamSpec {
        count: 1,
        symbolic: true,
    };
    /// Three Euler angles, numeric or symbolic.
    pub const EULER: ParamSpec = ParamSpec {
        count: 3,
        symbolic: true,
    };
}

/// Ways a gate application can disagree with its registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mismatch", rename_all = "snake_case")]
pub enum ShapeMismatch {
    /// Wrong number of qubits.
    Qubits {
        /// Qubits the entry declares.
        expected: usize,
        /// Qubits supplied.
        got: usize,
    },
    /// Wrong number of parameters.
    Parameters {
        /// Parameters the entry declares.
        expected: usize,
        /// Parameters supplied.
        got: usize,
    },
    /// A symbolic parameter where only numbers are accepted.
    SymbolicNotAllowed,
    /// No qubits at all.
    NoQubits,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatch::Qubits { expected, got } => {
                write!(f, "expects {expected} qubits, got {got}")
            }
            ShapeMismatch::Parameters { expected, got } => {
                write!(f, "expects {expected} parameters, got {got}")
            }
            ShapeMismatch::SymbolicNotAllowed => write!(f, "symbolic parameters are not allowed"),
            ShapeMismatch::NoQubits => write!(f, "acts on no qubits"),
        }
    }
}

/// One row of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateEntry {
    /// Canonical name.
    pub name: &'static str,
    /// Other names accepted as input for this gate (`cnot`, `toffoli`).
    pub aliases: &'static [&'static str],
    /// Control/target split for the native form.
    pub arity: Arity,
    /// Accepted parameters.
    pub params: ParamSpec,
    /// Gate name in `qelib1.inc`.
    pub qasm2: Option<&'static str>,
    /// Qiskit gate class name.
    pub qiskit: Option<&'static str>,
    /// PennyLane operation name.
    pub pennylane: Option<&'static str>,
}

impl GateEntry {
    /// Start an entry with no aliases and no representation identifiers.
    pub const fn new(name: &'static str, arity: Arity, params: ParamSpec) -> Self {
        Self {
            name,
            aliases: &[],
            arity,
            params,
            qasm2: None,
            qiskit: None,
            pennylane: None,
        }
    }

    /// Set the aliases.
    #[must_use]
    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the identifier for each representation.
    #[must_use]
    pub const fn ids(
        mut self,
        qasm2: Option<&'static str>,
        qiskit: Option<&'static str>,
        pennylane: Option<&'static str>,
    ) -> Self {
        self.qasm2 = qasm2;
        self.qiskit = qiskit;
        self.pennylane = pennylane;
        self
    }

    /// Identifier used by `representation`, if the gate exists there.
    pub fn identifier(&self, representation: Representation) -> Option<&'static str> {
        match representation {
            Representation::Qasm2 => self.qasm2,
            Representation::Qiskit => self.qiskit,
            Representation::PennyLane => self.pennylane,
        }
    }

    /// Whether the gate's native form includes control qubits (`cx`, `ccx`, `crx`).
    pub fn natively_controlled(&self) -> bool {
        self.arity.controls > 0
    }

    /// Check a parameter list against [`GateEntry::params`].
    pub fn check_parameters(&self, parameters: &[crate::Parameter]) -> Result<(), ShapeMismatch> {
        if parameters.len() != self.params.count {
            return Err(ShapeMismatch::Parameters {
                expected: self.params.count,
                got: parameters.len(),
            });
        }
        if !self.params.symbolic && parameters.iter().any(crate::Parameter::is_symbolic) {
            return Err(ShapeMismatch::SymbolicNotAllowed);
        }
        Ok(())
    }

    /// Check an application's qubit and parameter shape.
    ///
    /// A natively controlled gate must touch exactly `arity.total()` qubits,
    /// however they are split. Any other gate must have exactly
    /// `arity.targets` targets; extra controls are allowed and mean
    /// "controlled version of this gate".
    pub fn check(&self, gate: &GateApplication) -> Result<(), ShapeMismatch> {
        if self.natively_controlled() {
            if gate.num_qubits() != self.arity.total() {
                return Err(ShapeMismatch::Qubits {
                    expected: self.arity.total(),
                    got: gate.num_qubits(),
                });
            }
        } else if gate.targets.len() != self.arity.targets {
            return Err(ShapeMismatch::Qubits {
                expected: self.arity.targets,
                got: gate.targets.len(),
            });
        }
        self.check_parameters(&gate.parameters)
    }
}

/// How to build a gate in one representation.
#[derive(Debug, Clone, Copy)]
pub struct ConstructionRecipe<'r> {
    /// Representation this recipe targets.
    pub representation: Representation,
    /// Name or class to instantiate.
    pub identifier: &'static str,
    /// Registry row the recipe came from.
    pub entry: &'r GateEntry,
}

impl ConstructionRecipe<'_> {
    /// See [`GateEntry::natively_controlled`].
    pub fn natively_controlled(&self) -> bool {
        self.entry.natively_controlled()
    }

    /// Parameters the constructor takes.
    pub fn param_count(&self) -> usize {
        self.entry.params.count
    }
}

/// An immutable table of gates.
#[derive(Debug, Clone)]
pub struct GateRegistry {
    entries: Vec<GateEntry>,
    by_name: FxHashMap<&'static str, usize>,
    recognizers: [FxHashMap<&'static str, usize>; 3],
}

impl GateRegistry {
    /// Build a registry from entries in priority order.
    pub fn new(entries: Vec<GateEntry>) -> Self {
        let mut by_name = FxHashMap::default();
        let mut recognizers: [FxHashMap<&'static str, usize>; 3] = Default::default();

        for (idx, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name).or_insert(idx);
            for alias in entry.aliases {
                by_name.entry(*alias).or_insert(idx);
            }
            for repr in Representation::ALL {
                if let Some(id) = entry.identifier(repr) {
                    recognizers[repr.slot()].entry(id).or_insert(idx);
                }
            }
        }

        Self {
            entries,
            by_name,
            recognizers,
        }
    }

    /// A registry with no gates.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The built-in gate table.
    pub fn standard() -> Self {
        Self::new(STANDARD_GATES.to_vec())
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[GateEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by canonical name or alias.
    pub fn entry(&self, name: &str) -> Option<&GateEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// Canonical name for a canonical name or alias.
    pub fn canonical_name(&self, name: &str) -> Option<&'static str> {
        self.entry(name).map(|e| e.name)
    }

    /// Recover the canonical name from a representation's identifier.
    pub fn lookup_canonical(
        &self,
        representation: Representation,
        identifier: &str,
    ) -> Option<&'static str> {
        self.recognizers[representation.slot()]
            .get(identifier)
            .map(|&idx| self.entries[idx].name)
    }

    /// How to construct `name` (canonical or alias) in `representation`.
    pub fn lookup_recipe(
        &self,
        name: &str,
        representation: Representation,
    ) -> Option<ConstructionRecipe<'_>> {
        let entry = self.entry(name)?;
        entry
            .identifier(representation)
            .map(|identifier| ConstructionRecipe {
                representation,
                identifier,
                entry,
            })
    }

    /// Split a flat qubit list into `(controls, targets)`.
    ///
    /// Registered gates use their declared arity. Unregistered gates fall
    /// back to two hard-coded rules (`cx`/`cnot` on two qubits, `ccx`/`toffoli`
    /// on three) and otherwise treat every qubit as a target.
    pub fn split_roles(
        &self,
        name: &str,
        qubits: &[QubitId],
    ) -> Result<(Vec<QubitId>, Vec<QubitId>), ShapeMismatch> {
        if qubits.is_empty() {
            return Err(ShapeMismatch::NoQubits);
        }

        let num_controls = match self.entry(name) {
            Some(entry) => {
                if qubits.len() != entry.arity.total() {
                    return Err(ShapeMismatch::Qubits {
                        expected: entry.arity.total(),
                        got: qubits.len(),
                    });
                }
                entry.arity.controls
            }
            None => fallback_controls(name, qubits.len()),
        };

        let (controls, targets) = qubits.split_at(num_controls);
        Ok((controls.to_vec(), targets.to_vec()))
    }
}

impl Default for GateRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn fallback_controls(name: &str, num_qubits: usize) -> usize {
    match (name.to_ascii_lowercase().as_str(), num_qubits) {
        ("cx" | "cnot", 2) => 1,
        ("ccx" | "toffoli", 3) => 2,
        _ => 0,
    }
}

const ONE: Arity = Arity::new(0, 1);
const CTRL_ONE: Arity = Arity::new(1, 1);

/// The built-in table. Order matters for recognition ties.
pub static STANDARD_GATES: &[GateEntry] = &[
    GateEntry::new("id", ONE, ParamSpec::NONE)
        .aliases(&["i"])
        .ids(Some("id"), Some("IGate"), Some("Identity")),
    GateEntry::new("h", ONE, ParamSpec::NONE).ids(Some("h"), Some("HGate"), Some("Hadamard")),
    GateEntry::new("x", ONE, ParamSpec::NONE).ids(Some("x"), Some("XGate"), Some("PauliX")),
    GateEntry::new("y", ONE, ParamSpec::NONE).ids(Some("y"), Some("YGate"), Some("PauliY")),
    GateEntry::new("z", ONE, ParamSpec::NONE).ids(Some("z"), Some("ZGate"), Some("PauliZ")),
    GateEntry::new("s", ONE, ParamSpec::NONE).ids(Some("s"), Some("SGate"), Some("S")),
    GateEntry::new("sdg", ONE, ParamSpec::NONE).ids(Some("sdg"), Some("SdgGate"), None),
    GateEntry::new("t", ONE, ParamSpec::NONE).ids(Some("t"), Some("TGate"), Some("T")),
    GateEntry::new("tdg", ONE, ParamSpec::NONE).ids(Some("tdg"), Some("TdgGate"), None),
    GateEntry::new("sx", ONE, ParamSpec::NONE).ids(Some("sx"), Some("SXGate"), Some("SX")),
    GateEntry::new("rx", ONE, ParamSpec::ANGLE).ids(Some("rx"), Some("RXGate"), Some("RX")),
    GateEntry::new("ry", ONE, ParamSpec::ANGLE).ids(Some("ry"), Some("RYGate"), Some("RY")),
    GateEntry::new("rz", ONE, ParamSpec::ANGLE).ids(Some("rz"), Some("RZGate"), Some("RZ")),
    GateEntry::new("p", ONE, ParamSpec::ANGLE)
        .aliases(&["u1", "phase"])
        .ids(Some("p"), Some("PhaseGate"), Some("PhaseShift")),
    GateEntry::new("u", ONE, ParamSpec::EULER)
        .aliases(&["u3"])
        .ids(Some("u3"), Some("UGate"), Some("U3")),
    GateEntry::new("cx", CTRL_ONE, ParamSpec::NONE)
        .aliases(&["cnot"])
        .ids(Some("cx"), Some("CXGate"), Some("CNOT")),
    GateEntry::new("cy", CTRL_ONE, ParamSpec::NONE).ids(Some("cy"), Some("CYGate"), Some("CY")),
    GateEntry::new("cz", CTRL_ONE, ParamSpec::NONE).ids(Some("cz"), Some("CZGate"), Some("CZ")),
    GateEntry::new("ch", CTRL_ONE, ParamSpec::NONE).ids(Some("ch"), Some("CHGate"), Some("CH")),
    GateEntry::new("crx", CTRL_ONE, ParamSpec::ANGLE)
        .ids(Some("crx"), Some("CRXGate"), Some("CRX")),
    GateEntry::new("cry", CTRL_ONE, ParamSpec::ANGLE)
        .ids(Some("cry"), Some("CRYGate"), Some("CRY")),
    GateEntry::new("crz", CTRL_ONE, ParamSpec::ANGLE)
        .ids(Some("crz"), Some("CRZGate"), Some("CRZ")),
    GateEntry::new("cp", CTRL_ONE, ParamSpec::ANGLE)
        .aliases(&["cu1", "cphase"])
        .ids(Some("cu1"), Some("CPhaseGate"), Some("ControlledPhaseShift")),
    GateEntry::new("swap", Arity::new(0, 2), ParamSpec::NONE)
        .ids(Some("swap"), Some("SwapGate"), Some("SWAP")),
    GateEntry::new("ccx", Arity::new(2, 1), ParamSpec::NONE)
        .aliases(&["toffoli", "ccnot"])
        .ids(Some("ccx"), Some("CCXGate"), Some("Toffoli")),
    GateEntry::new("cswap", Arity::new(1, 2), ParamSpec::NONE)
        .aliases(&["fredkin"])
        .ids(Some("cswap"), Some("CSwapGate"), Some("CSWAP")),
];
