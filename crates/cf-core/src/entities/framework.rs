use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionPriority;
use crate::errors::CoreError;

/// A single assessable requirement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub guidance: Option<String>,
    pub priority: Option<QuestionPriority>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// An ordered group of questions inside a section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A top-level division of a framework (e.g., a CSF function).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A compliance framework definition. Loaded once, read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Framework {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Framework {
    /// Number of questions across all sections and categories.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.categories)
            .map(|category| category.questions.len())
            .sum()
    }

    /// Find a section by id.
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    /// Check structural invariants: non-empty ids, unique question ids.
    ///
    /// Question ids key the response map, so a duplicate would make two
    /// questions share one answer and one gap id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violation found.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("framework id is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "framework {}: section '{}' has an empty id",
                    self.id, section.name
                )));
            }
            for category in &section.categories {
                if category.id.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "framework {}: category '{}' in section {} has an empty id",
                        self.id, category.name, section.id
                    )));
                }
                for question in &category.questions {
                    if question.id.trim().is_empty() {
                        return Err(CoreError::Validation(format!(
                            "framework {}: question in category {} has an empty id",
                            self.id, category.id
                        )));
                    }
                    if !seen.insert(question.id.as_str()) {
                        return Err(CoreError::Validation(format!(
                            "framework {}: duplicate question id {}",
                            self.id, question.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
