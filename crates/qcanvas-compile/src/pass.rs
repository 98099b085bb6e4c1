//! The pass trait.

use qcanvas_ir::Circuit;

use crate::error::CompileResult;

/// A rewrite over a canonical circuit.
///
/// Passes never mutate their input: `run` returns a new circuit. A pass that
/// changes the gate sequence must leave the result's statistics cleared so
/// callers know to recompute them.
pub trait Pass: Send + Sync {
    /// The name the pass is registered under.
    fn name(&self) -> &str;

    /// Produce the rewritten circuit.
    fn run(&self, circuit: &Circuit) -> CompileResult<Circuit>;

    /// Check if this pass should run on the given circuit.
    ///
    /// A skipped pass leaves the circuit untouched, statistics included.
    fn should_run(&self, _circuit: &Circuit) -> bool {
        true
    }
}
