//! The shared, append-only control mapping registry.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use cf_core::entities::ControlMapping;
use cf_core::responses::Counterpart;

use crate::curated::curated_mappings;
use crate::error::MappingError;

/// Append-only store of control mappings.
///
/// Cloning the registry shares the underlying store. Readers only contend
/// with an in-progress append, never with each other, and records are never
/// mutated or removed once added.
#[derive(Debug, Clone, Default)]
pub struct ControlMappingRegistry {
    entries: Arc<RwLock<Vec<Arc<ControlMapping>>>>,
}

impl ControlMappingRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in curated mappings.
    #[must_use]
    pub fn with_curated() -> Self {
        let registry = Self::new();
        registry.extend(curated_mappings());
        registry
    }

    /// Append a mapping. Duplicates are accepted; avoiding them is the
    /// caller's responsibility.
    pub fn add(&self, mapping: ControlMapping) {
        self.write().push(Arc::new(mapping));
    }

    /// Append several mappings under a single lock acquisition.
    pub fn extend(&self, mappings: impl IntoIterator<Item = ControlMapping>) {
        let mut entries = self.write();
        entries.extend(mappings.into_iter().map(Arc::new));
    }

    /// Load a JSON array of mappings from `path` and append them.
    ///
    /// Returns the number of mappings added. Nothing is added if any record
    /// is invalid.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Io` if the file cannot be read,
    /// `MappingError::Parse` if it is not a mapping array, or
    /// `MappingError::Invalid` if a record has an empty id or control.
    pub fn extend_from_json(&self, path: &Path) -> Result<usize, MappingError> {
        let raw = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mappings: Vec<ControlMapping> =
            serde_json::from_str(&raw).map_err(|source| MappingError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for mapping in &mappings {
            validate(mapping)?;
        }

        let count = mappings.len();
        self.extend(mappings);
        tracing::debug!(path = %path.display(), count, "loaded control mappings");
        Ok(count)
    }

    /// Every mapping with `control_id` on either side, in insertion order.
    ///
    /// A mapping returned when querying its source control is also returned
    /// when querying its target control.
    #[must_use]
    pub fn query_by_control(&self, control_id: &str) -> Vec<ControlMapping> {
        self.filter(|mapping| mapping.involves(control_id))
    }

    /// Every mapping joining the two frameworks, in either direction.
    #[must_use]
    pub fn query_between(&self, framework_a: &str, framework_b: &str) -> Vec<ControlMapping> {
        self.filter(|mapping| mapping.connects(framework_a, framework_b))
    }

    /// The controls on the far side of each mapping touching `control_id`.
    #[must_use]
    pub fn counterparts(&self, control_id: &str) -> Vec<Counterpart> {
        self.read()
            .iter()
            .filter_map(|mapping| {
                mapping
                    .other_side(control_id)
                    .map(|(framework_id, other_control)| Counterpart {
                        framework_id: framework_id.to_string(),
                        control_id: other_control.to_string(),
                        strength: mapping.strength,
                        mapping_id: mapping.id.clone(),
                    })
            })
            .collect()
    }

    /// Snapshot of every mapping, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<ControlMapping> {
        self.filter(|_| true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn filter(&self, predicate: impl Fn(&ControlMapping) -> bool) -> Vec<ControlMapping> {
        self.read()
            .iter()
            .filter(|mapping| predicate(mapping))
            .map(|mapping| ControlMapping::clone(mapping))
            .collect()
    }

    // Entries are only ever pushed, so a writer that panicked cannot leave a
    // half-written record behind; recovering from poison is safe.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<ControlMapping>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<ControlMapping>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate(mapping: &ControlMapping) -> Result<(), MappingError> {
    let required = [
        ("id", &mapping.id),
        ("source_framework_id", &mapping.source_framework_id),
        ("source_control_id", &mapping.source_control_id),
        ("target_framework_id", &mapping.target_framework_id),
        ("target_control_id", &mapping.target_control_id),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(MappingError::Invalid {
                id: mapping.id.clone(),
                reason: format!("{field} is empty"),
            });
        }
    }
    Ok(())
}
