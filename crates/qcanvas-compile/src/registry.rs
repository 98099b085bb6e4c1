//! Name-to-pass lookup.

use rustc_hash::FxHashMap;

use crate::pass::Pass;
use crate::passes::RemoveSelfInversePairs;

type PassFactory = fn() -> Box<dyn Pass>;

/// Passes that can be requested by name.
///
/// Stores constructors rather than instances, so every pipeline built from
/// the registry owns fresh passes.
#[derive(Clone)]
pub struct PassRegistry {
    factories: FxHashMap<&'static str, PassFactory>,
}

impl PassRegistry {
    /// A registry with no passes.
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// A registry with every built-in pass.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(RemoveSelfInversePairs::NAME, remove_self_inverse_pairs);
        registry
    }

    /// Register a pass under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, factory: PassFactory) {
        self.factories.insert(name, factory);
    }

    /// Instantiate the pass registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Pass>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Check if a pass is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn remove_self_inverse_pairs() -> Box<dyn Pass> {
    Box::new(RemoveSelfInversePairs::new())
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for PassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassRegistry")
            .field("passes", &self.names())
            .finish()
    }
}
