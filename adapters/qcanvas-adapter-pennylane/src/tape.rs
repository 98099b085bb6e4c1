//! In-memory PennyLane tape model.
//!
//! A tape is a list of operations over labelled wires. Operations carry no
//! control count of their own: a natively controlled operation like `CNOT`
//! just lists its wires, and `qml.ctrl(op, control=...)` is a separate
//! wrapper with explicit control wires.

use std::fmt;

use qcanvas_ir::Parameter;
use serde::{Deserialize, Serialize};

use crate::error::{PennyLaneError, PennyLaneResult};

/// A wire label: an integer index or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    Index(u32),
    Label(String),
}

/// Python literal form: `0` or `'a'`.
impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{i}"),
            Wire::Label(l) => write!(f, "'{l}'"),
        }
    }
}

impl From<u32> for Wire {
    fn from(i: u32) -> Self {
        Wire::Index(i)
    }
}

impl From<&str> for Wire {
    fn from(label: &str) -> Self {
        Wire::Label(label.to_string())
    }
}

/// A plain operation such as `Hadamard` or `CNOT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    /// PennyLane class name (`Hadamard`, `RX`).
    pub name: String,
    /// Rotation angles and other parameters.
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Wires the operation acts on.
    pub wires: Vec<Wire>,
}

impl Op {
    pub fn new(name: impl Into<String>, wires: impl IntoIterator<Item = Wire>) -> Self {
        Self {
            name: name.into(),
            params: vec![],
            wires: wires.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.params = params.into_iter().collect();
        self
    }
}

/// `qml.ctrl(base, control=control_wires)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ctrl {
    /// The operation being controlled.
    pub base: Box<PlOperation>,
    /// Control wires, applied before the base's wires.
    pub control_wires: Vec<Wire>,
}

/// One tape entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlOperation {
    Op(Op),
    Ctrl(Ctrl),
}

impl PlOperation {
    /// Operation name the way PennyLane reports it (`Hadamard`, `C(Hadamard)`).
    pub fn name(&self) -> String {
        match self {
            PlOperation::Op(op) => op.name.clone(),
            PlOperation::Ctrl(c) => format!("C({})", c.base.name()),
        }
    }

    /// All wires, control wires first.
    pub fn wires(&self) -> Vec<Wire> {
        match self {
            PlOperation::Op(op) => op.wires.clone(),
            PlOperation::Ctrl(c) => {
                let mut wires = c.control_wires.clone();
                wires.extend(c.base.wires());
                wires
            }
        }
    }

    /// Parameters of the innermost operation.
    pub fn params(&self) -> &[Parameter] {
        match self {
            PlOperation::Op(op) => &op.params,
            PlOperation::Ctrl(c) => c.base.params(),
        }
    }
}

/// Printable form: `RX(0.5, wires=[0])`.
impl fmt::Display for PlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlOperation::Op(op) => {
                write!(f, "{}(", op.name)?;
                for p in &op.params {
                    write!(f, "{p}, ")?;
                }
                write!(f, "wires=[{}])", join(&op.wires))
            }
            PlOperation::Ctrl(c) => {
                write!(f, "C({}, control_wires=[{}])", c.base, join(&c.control_wires))
            }
        }
    }
}

fn join(wires: &[Wire]) -> String {
    wires
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A quantum tape: declared wires plus operations in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantumTape {
    /// Optional tape name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared wires; order defines wire indices.
    #[serde(default)]
    pub wires: Vec<Wire>,
    /// Operations in program order.
    #[serde(default)]
    pub operations: Vec<PlOperation>,
}

impl QuantumTape {
    /// A tape over wires `0..num_wires`.
    pub fn new(num_wires: u32) -> Self {
        Self {
            name: None,
            wires: (0..num_wires).map(Wire::Index).collect(),
            operations: vec![],
        }
    }

    /// A tape over explicitly labelled wires.
    pub fn with_wires(wires: impl IntoIterator<Item = Wire>) -> Self {
        Self {
            name: None,
            wires: wires.into_iter().collect(),
            operations: vec![],
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Position of a wire in the tape's wire order.
    pub fn wire_index(&self, wire: &Wire) -> Option<u32> {
        self.wires
            .iter()
            .position(|w| w == wire)
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Check the declared wires are distinct and indexable.
    pub fn check_wires(&self) -> PennyLaneResult<u32> {
        for (i, wire) in self.wires.iter().enumerate() {
            if self.wires[..i].contains(wire) {
                return Err(PennyLaneError::DuplicateWire(wire.to_string()));
            }
        }
        u32::try_from(self.wires.len()).map_err(|_| PennyLaneError::TooManyWires)
    }

    /// Append an operation after checking its wires are declared and distinct.
    pub fn append(&mut self, operation: PlOperation) -> PennyLaneResult<()> {
        let wires = operation.wires();
        for (i, wire) in wires.iter().enumerate() {
            if wires[..i].contains(wire) {
                return Err(PennyLaneError::DuplicateWire(wire.to_string()));
            }
            if self.wire_index(wire).is_none() {
                return Err(PennyLaneError::WireNotFound(wire.to_string()));
            }
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> PennyLaneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> PennyLaneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
