//! Gate applications: one instruction of the canonical gate sequence.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrResult};
use crate::parameter::Parameter;
use crate::qubit::QubitId;

/// One gate applied to a set of qubits.
///
/// `controls` and `targets` are disjoint; on the wire the controls come
/// first wherever a representation expects a flat qubit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateApplication {
    /// Canonical lowercase gate name.
    pub name: String,
    /// Qubits the gate acts on. Never empty in a valid circuit.
    pub targets: Vec<QubitId>,
    /// Qubits gating the operation.
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub controls: Vec<QubitId>,
    /// Gate parameters, in declaration order.
    #[serde(
        default,
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<Parameter>,
}

/// Accept `null` where a list is expected; callers commonly send `"controls": null`.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GateApplication {
    /// Create an uncontrolled, unparameterized application.
    pub fn new(name: impl Into<String>, targets: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            name: name.into(),
            targets: targets.into_iter().collect(),
            controls: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Create an application with explicit controls.
    pub fn controlled(
        name: impl Into<String>,
        controls: impl IntoIterator<Item = QubitId>,
        targets: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self {
            controls: controls.into_iter().collect(),
            ..Self::new(name, targets)
        }
    }

    /// Set the parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters = parameters.into_iter().collect();
        self
    }

    /// Set the controls.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.controls = controls.into_iter().collect();
        self
    }

    /// All acted-upon qubits, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Total number of qubits touched.
    pub fn num_qubits(&self) -> usize {
        self.controls.len() + self.targets.len()
    }

    /// Check if the application carries any controls.
    pub fn is_controlled(&self) -> bool {
        !self.controls.is_empty()
    }

    /// Check the structural invariants that do not depend on the registry.
    pub fn validate(&self, num_qubits: u32) -> IrResult<()> {
        let context = || Some(self.name.clone());

        if self.targets.is_empty() {
            return Err(IrError::EmptyTargets(self.name.clone()));
        }

        let mut seen: Vec<QubitId> = Vec::with_capacity(self.num_qubits());
        for qubit in self.qubits() {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: context(),
                });
            }
            if seen.contains(&qubit) {
                let overlaps = self.controls.contains(&qubit) && self.targets.contains(&qubit);
                return Err(if overlaps {
                    IrError::OverlappingControlTarget {
                        qubit,
                        gate_name: context(),
                    }
                } else {
                    IrError::DuplicateQubit {
                        qubit,
                        gate_name: context(),
                    }
                });
            }
            seen.push(qubit);
        }

        if let Some(position) = self.parameters.iter().position(|p| !p.is_finite()) {
            return Err(IrError::NonFiniteParameter {
                gate_name: self.name.clone(),
                position,
            });
        }

        Ok(())
    }
}
