//! The framework lookup seam.
//!
//! The flow aggregator never reaches for a global store: callers inject
//! whatever provider fits their runtime (in-memory for tests and batch jobs,
//! directory-backed in `cf-store`).

use std::collections::BTreeMap;

use cf_core::entities::Framework;

/// Supplies read-only framework definitions by id.
pub trait FrameworkProvider {
    /// The framework with `framework_id`, or `None` if it is not defined.
    fn framework(&self, framework_id: &str) -> Option<&Framework>;

    /// Ids of every framework this provider can supply, sorted.
    fn framework_ids(&self) -> Vec<String>;
}

/// Frameworks held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrameworks {
    frameworks: BTreeMap<String, Framework>,
}

impl InMemoryFrameworks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a framework, replacing any previous definition with the same id.
    pub fn insert(&mut self, framework: Framework) {
        self.frameworks.insert(framework.id.clone(), framework);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl FromIterator<Framework> for InMemoryFrameworks {
    fn from_iter<T: IntoIterator<Item = Framework>>(iter: T) -> Self {
        let mut provider = Self::new();
        for framework in iter {
            provider.insert(framework);
        }
        provider
    }
}

impl FrameworkProvider for InMemoryFrameworks {
    fn framework(&self, framework_id: &str) -> Option<&Framework> {
        self.frameworks.get(framework_id)
    }

    fn framework_ids(&self) -> Vec<String> {
        self.frameworks.keys().cloned().collect()
    }
}
