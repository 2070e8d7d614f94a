//! Central schema registry for canonical ComplyFlow types.

use std::collections::HashMap;

use cf_core::{entities, responses};
use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas for every canonical record and CLI response.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Inputs ---
        register!(schemas, "framework", entities::Framework);
        register!(schemas, "question", entities::Question);
        register!(schemas, "assessment", entities::Assessment);
        register!(schemas, "evidence_ref", entities::EvidenceRef);
        register!(schemas, "library_evidence", entities::LibraryEvidence);

        // --- Derived records ---
        register!(schemas, "gap", entities::Gap);
        register!(schemas, "flow", entities::Flow);
        register!(schemas, "task_spec", entities::TaskSpec);
        register!(schemas, "control_stub", entities::ControlStub);
        register!(schemas, "control_mapping", entities::ControlMapping);
        register!(schemas, "evidence_record", entities::EvidenceRecord);

        // --- Responses ---
        register!(schemas, "batch_outcome", responses::BatchOutcome);
        register!(
            schemas,
            "control_persist_response",
            responses::ControlPersistResponse
        );
        register!(schemas, "remediation_plan", responses::RemediationPlan);
        register!(
            schemas,
            "mapping_query_response",
            responses::MappingQueryResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Compilation(format!("{name}: {e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
