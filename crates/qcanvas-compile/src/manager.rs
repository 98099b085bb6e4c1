//! Pass manager for running named pass pipelines.

use tracing::{debug, info, instrument, warn};

use qcanvas_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::registry::PassRegistry;

/// How unknown pass names are treated when building a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassPolicy {
    /// Unknown names are logged and skipped.
    #[default]
    Lenient,
    /// Unknown names are rejected.
    Strict,
}

/// Manages and executes a sequence of passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Build a pipeline from pass names, in the order given.
    ///
    /// Under [`PassPolicy::Lenient`] an unknown name contributes nothing. Under
    /// [`PassPolicy::Strict`] it fails the whole build.
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
        registry: &PassRegistry,
        policy: PassPolicy,
    ) -> CompileResult<Self> {
        let mut pm = Self::new();
        for name in names {
            let name = name.as_ref();
            match registry.create(name) {
                Some(pass) => pm.passes.push(pass),
                None if policy == PassPolicy::Strict => {
                    return Err(CompileError::UnknownPass {
                        name: name.to_string(),
                        available: registry.names().join(", "),
                    });
                }
                None => warn!(pass = name, "unknown pass ignored"),
            }
        }
        Ok(pm)
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes in order. The input circuit is untouched.
    ///
    /// With no passes the result equals the input, statistics included.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits))]
    pub fn run(&self, circuit: &Circuit) -> CompileResult<Circuit> {
        info!(
            "Running pass manager with {} passes on {} gates",
            self.passes.len(),
            circuit.len()
        );

        let mut current = circuit.clone();
        for pass in &self.passes {
            if pass.should_run(&current) {
                debug!("Running pass: {}", pass.name());
                current = pass.run(&current)?;
                debug!("Pass {} completed, gates: {}", pass.name(), current.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!("Pass manager completed, gates: {}", current.len());
        Ok(current)
    }

    /// Names of the queued passes, in order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply named passes to a circuit with the standard registry.
pub fn apply_passes<S: AsRef<str>>(
    circuit: &Circuit,
    names: &[S],
    policy: PassPolicy,
) -> CompileResult<Circuit> {
    PassManager::from_names(names, &PassRegistry::standard(), policy)?.run(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::RemoveSelfInversePairs;
    use qcanvas_ir::QubitId;

    fn hh_x() -> Circuit {
        let mut circuit = Circuit::new(2);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.with_fresh_stats()
    }

    #[test]
    fn test_empty_pass_manager_is_identity() {
        let pm = PassManager::new();
        assert!(pm.is_empty());

        let circuit = hh_x();
        assert_eq!(pm.run(&circuit).unwrap(), circuit);
    }

    #[test]
    fn test_add_pass() {
        let mut pm = PassManager::new();
        pm.add_pass(RemoveSelfInversePairs);
        assert_eq!(pm.len(), 1);

        let out = pm.run(&hh_x()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.stats_are_stale());
    }

    #[test]
    fn test_unknown_name_lenient() {
        let pm = PassManager::from_names(
            &["no_such_pass"],
            &PassRegistry::standard(),
            PassPolicy::Lenient,
        )
        .unwrap();
        assert!(pm.is_empty());

        let circuit = hh_x();
        let out = pm.run(&circuit).unwrap();
        assert_eq!(out.gates, circuit.gates);
    }

    #[test]
    fn test_unknown_name_strict() {
        let err = PassManager::from_names(
            &["remove_self_inverse_pairs", "no_such_pass"],
            &PassRegistry::standard(),
            PassPolicy::Strict,
        )
        .err()
        .unwrap();
        match err {
            CompileError::UnknownPass { name, available } => {
                assert_eq!(name, "no_such_pass");
                assert_eq!(available, "remove_self_inverse_pairs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_names_run_in_order() {
        let pm = PassManager::from_names(
            &["remove_self_inverse_pairs", "remove_self_inverse_pairs"],
            &PassRegistry::standard(),
            PassPolicy::Strict,
        )
        .unwrap();
        assert_eq!(
            pm.pass_names(),
            ["remove_self_inverse_pairs", "remove_self_inverse_pairs"]
        );
    }

    #[test]
    fn test_apply_passes() {
        let out = apply_passes(&hh_x(), &["remove_self_inverse_pairs"], PassPolicy::Lenient)
            .unwrap()
            .with_fresh_stats();
        assert_eq!(out.gates.len(), 1);
        assert_eq!(out.depth, Some(1));
    }
}
