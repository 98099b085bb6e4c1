//! Adjacent self-inverse cancellation.

use qcanvas_ir::{Circuit, GateApplication};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::Pass;

/// Gates that are their own inverse and cancel in adjacent pairs.
pub const SELF_INVERSE_GATES: [&str; 4] = ["h", "x", "y", "z"];

/// Removes adjacent pairs of identical self-inverse single-qubit gates.
///
/// Pairing is one greedy left-to-right scan: after a pair at `i` is dropped
/// the scan resumes at `i + 2`, so a pair that only becomes adjacent because
/// of an earlier drop survives. `[X, H, H, X]` becomes `[X, X]`, not `[]`.
///
/// The output always has stale statistics, even when nothing was removed.
pub struct RemoveSelfInversePairs;

impl RemoveSelfInversePairs {
    /// Registered name of this pass.
    pub const NAME: &'static str = "remove_self_inverse_pairs";

    /// Create a new pass.
    pub fn new() -> Self {
        Self
    }

    fn cancels(a: &GateApplication, b: &GateApplication) -> bool {
        SELF_INVERSE_GATES.contains(&a.name.as_str())
            && a.name == b.name
            && a.controls.is_empty()
            && b.controls.is_empty()
            && a.parameters.is_empty()
            && b.parameters.is_empty()
            && a.targets.len() == 1
            && a.targets == b.targets
    }
}

impl Default for RemoveSelfInversePairs {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemoveSelfInversePairs {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
        let gates = &circuit.gates;
        let mut kept = Vec::with_capacity(gates.len());
        let mut i = 0;

        while i < gates.len() {
            if i + 1 < gates.len() && Self::cancels(&gates[i], &gates[i + 1]) {
                i += 2;
            } else {
                kept.push(gates[i].clone());
                i += 1;
            }
        }

        debug!(
            removed = gates.len() - kept.len(),
            remaining = kept.len(),
            "self-inverse cancellation"
        );

        Ok(circuit.with_gates(kept))
    }
}
