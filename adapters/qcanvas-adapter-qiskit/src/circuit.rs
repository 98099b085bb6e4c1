//! In-memory Qiskit circuit model.
//!
//! Mirrors the parts of `qiskit.QuantumCircuit` the converter reads and
//! writes: named quantum registers, and `data` as a list of operations
//! applied to register-qualified qubits. Serializes to JSON with `"type"` as
//! the operation tag.

use std::collections::BTreeMap;
use std::fmt;

use qcanvas_ir::Parameter;
use serde::{Deserialize, Serialize};

use crate::error::{QiskitError, QiskitResult};

/// Name of the register created by [`QuantumCircuit::new`].
pub const DEFAULT_REGISTER: &str = "q";

/// Instruction names that act on classical state or timing, not on amplitudes.
pub const NON_UNITARY: [&str; 4] = ["measure", "reset", "barrier", "delay"];

/// A named block of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Register name, unique within a circuit.
    pub name: String,
    /// Number of qubits in the register.
    pub size: u32,
}

impl QuantumRegister {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A qubit, addressed by register name and index within the register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// Name of the owning register.
    pub register: String,
    /// Position within the register.
    pub index: u32,
}

impl Qubit {
    pub fn new(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A standard library gate such as `HGate` or `CXGate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Short instruction name (`h`, `cx`).
    pub name: String,
    /// Library class name (`HGate`, `CXGate`).
    pub class: String,
    /// Rotation angles and other gate parameters.
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Qubits the gate acts on, controls included.
    pub num_qubits: u32,
    /// Leading qubits that act as controls. Non-zero only for gates like `CXGate`.
    #[serde(default)]
    pub num_ctrl_qubits: u32,
}

/// The result of `gate.control(n)`: `base` with `num_ctrl_qubits` extra controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledGate {
    /// The operation being controlled.
    pub base: Box<Operation>,
    /// Controls added on top of `base`.
    pub num_ctrl_qubits: u32,
}

/// Any other instruction, known only by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Instruction name (`measure`, `unitary`).
    pub name: String,
    /// Qubits the instruction acts on.
    pub num_qubits: u32,
    /// Instruction parameters, if any.
    #[serde(default)]
    pub params: Vec<Parameter>,
}

/// The operation half of a circuit instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Gate(Gate),
    Controlled(ControlledGate),
    Instruction(Instruction),
}

impl Operation {
    /// Instruction name the way Qiskit reports it (`cx`, `ch`, `c3sx`).
    pub fn name(&self) -> String {
        match self {
            Operation::Gate(g) => g.name.clone(),
            Operation::Instruction(i) => i.name.clone(),
            Operation::Controlled(c) => match c.num_ctrl_qubits {
                1 => format!("c{}", c.base.name()),
                n => format!("c{n}{}", c.base.name()),
            },
        }
    }

    /// Qubits the operation acts on, controls included.
    pub fn num_qubits(&self) -> u32 {
        match self {
            Operation::Gate(g) => g.num_qubits,
            Operation::Instruction(i) => i.num_qubits,
            Operation::Controlled(c) => c.num_ctrl_qubits.saturating_add(c.base.num_qubits()),
        }
    }

    /// Leading control qubits, counting through controlled wrappers.
    pub fn num_ctrl_qubits(&self) -> u32 {
        match self {
            Operation::Gate(g) => g.num_ctrl_qubits,
            Operation::Instruction(_) => 0,
            Operation::Controlled(c) => c.num_ctrl_qubits.saturating_add(c.base.num_ctrl_qubits()),
        }
    }

    /// Gate parameters. A controlled wrapper reports its base's.
    pub fn params(&self) -> &[Parameter] {
        match self {
            Operation::Gate(g) => &g.params,
            Operation::Instruction(i) => &i.params,
            Operation::Controlled(c) => c.base.params(),
        }
    }
}

/// Printable form: `name` or `name(p1, p2)`.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        let params = self.params();
        if !params.is_empty() {
            let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
            write!(f, "({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

/// One entry of `QuantumCircuit.data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInstruction {
    /// What is applied.
    pub operation: Operation,
    /// Target qubits, controls first.
    pub qubits: Vec<Qubit>,
}

/// A Qiskit circuit: registers plus an instruction list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuantumCircuit {
    /// Optional circuit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Quantum registers in declaration order.
    #[serde(default)]
    pub qregs: Vec<QuantumRegister>,
    /// Instructions in program order.
    #[serde(default)]
    pub data: Vec<CircuitInstruction>,
}

impl QuantumCircuit {
    /// A circuit with a single register `q` of `num_qubits` qubits, or no
    /// register at all when `num_qubits` is zero.
    pub fn new(num_qubits: u32) -> Self {
        let qregs = if num_qubits > 0 {
            vec![QuantumRegister::new(DEFAULT_REGISTER, num_qubits)]
        } else {
            vec![]
        };
        Self {
            name: None,
            qregs,
            data: vec![],
        }
    }

    /// A circuit over the given registers, in order.
    pub fn with_registers(qregs: Vec<QuantumRegister>) -> Self {
        Self {
            name: None,
            qregs,
            data: vec![],
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Total qubits across registers.
    ///
    /// Saturates at `u32::MAX`; [`QuantumCircuit::check_registers`] rejects
    /// circuits that would overflow.
    pub fn num_qubits(&self) -> u32 {
        self.qregs
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.size))
    }

    /// Check register names are unique and sizes fit in a `u32`.
    pub fn check_registers(&self) -> QiskitResult<()> {
        for (i, reg) in self.qregs.iter().enumerate() {
            if self.qregs[..i].iter().any(|r| r.name == reg.name) {
                return Err(QiskitError::DuplicateRegister(reg.name.clone()));
            }
        }
        self.qregs
            .iter()
            .try_fold(0u32, |acc, r| acc.checked_add(r.size))
            .map(|_| ())
            .ok_or(QiskitError::TooManyQubits)
    }

    /// Flat index of a qubit: registers are laid out one after another.
    pub fn find_bit(&self, qubit: &Qubit) -> Option<u32> {
        let mut offset: u32 = 0;
        for reg in &self.qregs {
            if reg.name == qubit.register {
                return (qubit.index < reg.size).then(|| offset + qubit.index);
            }
            offset = offset.checked_add(reg.size)?;
        }
        None
    }

    /// The qubit at a flat index.
    pub fn qubit(&self, index: u32) -> Option<Qubit> {
        let mut remaining = index;
        for reg in &self.qregs {
            if remaining < reg.size {
                return Some(Qubit::new(reg.name.clone(), remaining));
            }
            remaining -= reg.size;
        }
        None
    }

    /// Apply `operation` to qubits given by flat index.
    pub fn append(&mut self, operation: Operation, qubits: &[u32]) -> QiskitResult<()> {
        let expected = operation.num_qubits() as usize;
        if qubits.len() != expected {
            return Err(QiskitError::QubitCount {
                operation: operation.to_string(),
                expected,
                got: qubits.len(),
            });
        }

        let mut resolved = Vec::with_capacity(qubits.len());
        for (i, &index) in qubits.iter().enumerate() {
            if qubits[..i].contains(&index) {
                return Err(QiskitError::DuplicateQubit(index));
            }
            let qubit = self.qubit(index).ok_or(QiskitError::QubitOutOfRange {
                index,
                num_qubits: self.num_qubits(),
            })?;
            resolved.push(qubit);
        }

        self.data.push(CircuitInstruction {
            operation,
            qubits: resolved,
        });
        Ok(())
    }

    /// Occurrences of each instruction name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.data {
            *counts.entry(inst.operation.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> QiskitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> QiskitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
