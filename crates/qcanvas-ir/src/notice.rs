//! Per-instruction conversion notices.
//!
//! Importers and exporters never abort on a single bad instruction. They
//! drop it, log a warning, and record a [`Notice`] so the caller can see
//! exactly what was lost.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::registry::{Representation, ShapeMismatch};

/// Why an instruction was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum SkipReason {
    /// A qubit operand could not be mapped to a circuit index.
    UnresolvedQubit {
        /// What failed to resolve.
        detail: String,
    },
    /// Qubit or parameter shape disagrees with the registry.
    Shape {
        /// The disagreement.
        mismatch: ShapeMismatch,
    },
    /// The registry has no way to build this gate in the target representation.
    NoRecipe {
        /// Representation being exported to.
        representation: Representation,
    },
    /// Measurement, reset, barrier and classical control have no canonical form.
    NonUnitary {
        /// The statement kind.
        statement: String,
    },
    /// The instruction breaks a circuit invariant.
    Invalid {
        /// What was wrong.
        detail: String,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnresolvedQubit { detail } => write!(f, "unresolved qubit: {detail}"),
            SkipReason::Shape { mismatch } => write!(f, "{mismatch}"),
            SkipReason::NoRecipe { representation } => {
                write!(f, "no {representation} equivalent")
            }
            SkipReason::NonUnitary { statement } => {
                write!(f, "'{statement}' has no canonical equivalent")
            }
            SkipReason::Invalid { detail } => write!(f, "{detail}"),
        }
    }
}

impl From<ShapeMismatch> for SkipReason {
    fn from(mismatch: ShapeMismatch) -> Self {
        SkipReason::Shape { mismatch }
    }
}

/// Something a conversion wants the caller to know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The instruction at `index` was dropped.
    Skipped {
        /// Position in the source instruction list.
        index: usize,
        /// Gate or statement name as seen in the source.
        gate: String,
        /// Why it was dropped.
        reason: SkipReason,
    },
    /// The instruction at `index` matched no registry rule and was kept under a fallback name.
    Unrecognized {
        /// Position in the source instruction list.
        index: usize,
        /// Name exactly as the source spelled it.
        raw_name: String,
        /// Name used in the canonical circuit.
        fallback: String,
    },
}

impl Notice {
    /// Position of the instruction this notice refers to.
    pub fn index(&self) -> usize {
        match self {
            Notice::Skipped { index, .. } | Notice::Unrecognized { index, .. } => *index,
        }
    }

    /// Check if this notice reports a dropped instruction.
    pub fn is_skip(&self) -> bool {
        matches!(self, Notice::Skipped { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Skipped {
                index,
                gate,
                reason,
            } => write!(f, "instruction {index} ('{gate}') skipped: {reason}"),
            Notice::Unrecognized {
                index,
                raw_name,
                fallback,
            } => write!(
                f,
                "instruction {index} ('{raw_name}') not in registry, kept as '{fallback}'"
            ),
        }
    }
}

/// The result of a conversion together with its notices.
#[derive(Debug, Clone)]
pub struct Converted<T> {
    /// The converted artifact.
    pub value: T,
    /// Everything that was dropped or guessed, in source order.
    pub notices: Vec<Notice>,
}

impl<T> Converted<T> {
    /// Wrap a value with no notices.
    pub fn new(value: T) -> Self {
        Self {
            value,
            notices: Vec::new(),
        }
    }

    /// True when nothing was dropped or guessed.
    pub fn is_lossless(&self) -> bool {
        self.notices.is_empty()
    }

    /// Number of dropped instructions.
    pub fn skipped(&self) -> usize {
        self.notices.iter().filter(|n| n.is_skip()).count()
    }

    /// Transform the value, keeping the notices.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        Converted {
            value: f(self.value),
            notices: self.notices,
        }
    }

    /// Drop the notices.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Collects notices during a conversion and logs each one as it arrives.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dropped instruction.
    pub fn skip(&mut self, index: usize, gate: impl Into<String>, reason: impl Into<SkipReason>) {
        let gate = gate.into();
        let reason = reason.into();
        warn!(index, gate = %gate, "skipping instruction: {reason}");
        self.notices.push(Notice::Skipped {
            index,
            gate,
            reason,
        });
    }

    /// Record an instruction kept under a fallback name.
    pub fn unrecognized(
        &mut self,
        index: usize,
        raw_name: impl Into<String>,
        fallback: impl Into<String>,
    ) {
        let raw_name = raw_name.into();
        let fallback = fallback.into();
        warn!(index, raw = %raw_name, "unrecognized gate kept as '{fallback}'");
        self.notices.push(Notice::Unrecognized {
            index,
            raw_name,
            fallback,
        });
    }

    /// Notices recorded so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Attach the notices to the finished value.
    pub fn finish<T>(self, value: T) -> Converted<T> {
        Converted {
            value,
            notices: self.notices,
        }
    }
}
