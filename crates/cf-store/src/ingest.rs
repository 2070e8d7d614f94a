//! Ingestion adapters: alternate and legacy JSON shapes → canonical records.
//!
//! Framework catalogs and assessments exported by older tooling name the same
//! field several ways (`question` / `text` / `title`, `helpText`, `controls`
//! for questions, `code` for ids, camelCase keys). Every alias is resolved
//! here, once, so nothing downstream of this module sees anything but the
//! canonical shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use cf_core::entities::{
    Assessment, Category, EvidenceRef, Framework, LibraryEvidence, Question, ResponseMap, Section,
};
use cf_core::enums::{EvidenceType, QuestionPriority};
use serde_json::{Map, Value};

use crate::error::StoreError;

const ID: &[&str] = &["id", "code"];
const NAME: &[&str] = &["name", "title"];
const DESCRIPTION: &[&str] = &["description"];

const SECTIONS: &[&str] = &["sections", "functions"];
const CATEGORIES: &[&str] = &["categories", "subcategories"];
const QUESTIONS: &[&str] = &["questions", "controls"];

const QUESTION_TEXT: &[&str] = &["question", "text", "title"];
const GUIDANCE: &[&str] = &["guidance", "help_text", "helpText"];
const PRIORITY: &[&str] = &["priority"];
const REFERENCES: &[&str] = &["references"];
const EXAMPLES: &[&str] = &["examples"];

const FRAMEWORK_ID: &[&str] = &["framework_id", "frameworkId"];
const RESPONSES: &[&str] = &["responses", "answers"];
const EVIDENCE: &[&str] = &["evidence"];
const EVIDENCE_LINKS: &[&str] = &["evidence_links", "evidenceLinks"];
const UPDATED_AT: &[&str] = &["updated_at", "updatedAt"];

const EVIDENCE_TYPE: &[&str] = &["type", "evidence_type", "evidenceType"];
const QUESTION_ID: &[&str] = &["question_id", "questionId"];
const CONTROL_ID: &[&str] = &["control_id", "controlId"];
const UPLOADED_AT: &[&str] = &["uploaded_at", "uploadedAt"];
const METADATA: &[&str] = &["metadata"];

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

fn as_object<'a>(value: &'a Value, kind: &'static str) -> Result<&'a Map<String, Value>, StoreError> {
    value
        .as_object()
        .ok_or_else(|| StoreError::ingest(kind, format!("expected an object, found {}", type_name(value))))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The first non-null value among `names`.
fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| !value.is_null())
}

/// A string field. Numeric ids are accepted and rendered as strings.
fn text(object: &Map<String, Value>, names: &[&str]) -> Option<String> {
    match field(object, names)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_or_default(object: &Map<String, Value>, names: &[&str]) -> String {
    text(object, names).unwrap_or_default()
}

/// A list of strings; a lone string is treated as a one-item list.
fn text_list(object: &Map<String, Value>, names: &[&str]) -> Vec<String> {
    match field(object, names) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn children<'a>(object: &'a Map<String, Value>, names: &[&str]) -> &'a [Value] {
    field(object, names)
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

fn timestamp(
    object: &Map<String, Value>,
    names: &[&str],
    kind: &'static str,
) -> Result<Option<DateTime<Utc>>, StoreError> {
    let Some(value) = field(object, names) else {
        return Ok(None);
    };
    let raw = value
        .as_str()
        .ok_or_else(|| StoreError::ingest(kind, format!("{} must be an RFC 3339 string", names[0])))?;
    raw.parse::<DateTime<Utc>>()
        .map(Some)
        .map_err(|e| StoreError::ingest(kind, format!("{} '{raw}': {e}", names[0])))
}

fn metadata(object: &Map<String, Value>) -> BTreeMap<String, Value> {
    field(object, METADATA)
        .and_then(Value::as_object)
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

fn evidence_type(object: &Map<String, Value>) -> EvidenceType {
    text(object, EVIDENCE_TYPE).map_or(EvidenceType::Other, |raw| EvidenceType::parse_lenient(&raw))
}

// ---------------------------------------------------------------------------
// Frameworks
// ---------------------------------------------------------------------------

fn question_from(value: &Value) -> Result<Question, StoreError> {
    let object = as_object(value, "question")?;
    let id = text_or_default(object, ID);
    let question_text = text(object, QUESTION_TEXT)
        .ok_or_else(|| StoreError::ingest("question", format!("question '{id}' has no text")))?;

    let priority = text(object, PRIORITY).and_then(|raw| {
        let parsed = QuestionPriority::parse_lenient(&raw);
        if parsed.is_none() {
            tracing::debug!(question_id = %id, priority = %raw, "ignoring unknown priority");
        }
        parsed
    });

    Ok(Question {
        id,
        text: question_text,
        guidance: text(object, GUIDANCE),
        priority,
        references: text_list(object, REFERENCES),
        examples: text_list(object, EXAMPLES),
    })
}

fn category_from(value: &Value) -> Result<Category, StoreError> {
    let object = as_object(value, "category")?;
    Ok(Category {
        id: text_or_default(object, ID),
        name: text_or_default(object, NAME),
        description: text_or_default(object, DESCRIPTION),
        questions: children(object, QUESTIONS)
            .iter()
            .map(question_from)
            .collect::<Result<_, _>>()?,
    })
}

fn section_from(value: &Value) -> Result<Section, StoreError> {
    let object = as_object(value, "section")?;
    Ok(Section {
        id: text_or_default(object, ID),
        name: text_or_default(object, NAME),
        description: text_or_default(object, DESCRIPTION),
        categories: children(object, CATEGORIES)
            .iter()
            .map(category_from)
            .collect::<Result<_, _>>()?,
    })
}

/// Translate a framework catalog in any supported shape.
///
/// # Errors
///
/// Returns `StoreError::Ingest` if a node is not an object or a question has
/// no text, or `StoreError::Invalid` if the result has empty or duplicate ids.
pub fn framework_from_value(value: &Value) -> Result<Framework, StoreError> {
    let object = as_object(value, "framework")?;
    let framework = Framework {
        id: text_or_default(object, ID),
        name: text_or_default(object, NAME),
        version: text_or_default(object, &["version"]),
        sections: children(object, SECTIONS)
            .iter()
            .map(section_from)
            .collect::<Result<_, _>>()?,
    };
    framework.validate()?;
    Ok(framework)
}

// ---------------------------------------------------------------------------
// Assessments and evidence
// ---------------------------------------------------------------------------

/// Coerce one raw response value.
///
/// Integers are kept as-is (range is checked by the gap extractor). Numeric
/// strings are parsed. Anything else yields `None`.
fn response_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build a response map, dropping values that are not integers.
#[must_use]
pub fn responses_from_value(value: &Value) -> ResponseMap {
    let Some(object) = value.as_object() else {
        if !value.is_null() {
            tracing::warn!(found = type_name(value), "responses are not an object; ignoring");
        }
        return ResponseMap::new();
    };

    let mut responses = ResponseMap::new();
    for (question_id, raw) in object {
        match response_value(raw) {
            Some(parsed) => responses.insert(question_id.clone(), parsed),
            None => tracing::warn!(
                %question_id,
                value = %raw,
                "non-numeric response value; treating question as unanswered"
            ),
        }
    }
    responses
}

fn evidence_ref_from(value: &Value) -> Result<EvidenceRef, StoreError> {
    let object = as_object(value, "evidence reference")?;
    Ok(EvidenceRef {
        id: text(object, ID),
        title: text_or_default(object, NAME),
        description: text_or_default(object, DESCRIPTION),
        evidence_type: evidence_type(object),
        control_id: text(object, CONTROL_ID),
        uploaded_at: timestamp(object, UPLOADED_AT, "evidence reference")?,
        metadata: metadata(object),
    })
}

fn evidence_map(object: &Map<String, Value>) -> Result<BTreeMap<String, Vec<EvidenceRef>>, StoreError> {
    let Some(by_question) = field(object, EVIDENCE).and_then(Value::as_object) else {
        return Ok(BTreeMap::new());
    };
    by_question
        .iter()
        .map(|(question_id, refs)| {
            let refs = refs
                .as_array()
                .map_or(&[][..], Vec::as_slice)
                .iter()
                .map(evidence_ref_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((question_id.clone(), refs))
        })
        .collect()
}

fn evidence_links(object: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    let Some(by_question) = field(object, EVIDENCE_LINKS).and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    by_question
        .keys()
        .map(|question_id| (question_id.clone(), text_list(by_question, &[question_id.as_str()])))
        .collect()
}

/// Translate an exported assessment in any supported shape.
///
/// # Errors
///
/// Returns `StoreError::Ingest` if the id, framework id, or update time is
/// missing or malformed.
pub fn assessment_from_value(value: &Value) -> Result<Assessment, StoreError> {
    let object = as_object(value, "assessment")?;
    let id = text(object, ID).ok_or_else(|| StoreError::ingest("assessment", "missing id"))?;
    let framework_id = text(object, FRAMEWORK_ID)
        .ok_or_else(|| StoreError::ingest("assessment", format!("{id} has no framework id")))?;
    let updated_at = timestamp(object, UPDATED_AT, "assessment")?
        .ok_or_else(|| StoreError::ingest("assessment", format!("{id} has no updated_at")))?;

    Ok(Assessment {
        responses: field(object, RESPONSES).map_or_else(ResponseMap::new, responses_from_value),
        evidence: evidence_map(object)?,
        evidence_links: evidence_links(object),
        id,
        framework_id,
        updated_at,
    })
}

fn library_item_from(value: &Value) -> Result<LibraryEvidence, StoreError> {
    let object = as_object(value, "library evidence")?;
    let id = text(object, ID).ok_or_else(|| StoreError::ingest("library evidence", "missing id"))?;
    let uploaded_at = timestamp(object, UPLOADED_AT, "library evidence")?
        .ok_or_else(|| StoreError::ingest("library evidence", format!("{id} has no uploaded_at")))?;

    Ok(LibraryEvidence {
        title: text_or_default(object, NAME),
        description: text_or_default(object, DESCRIPTION),
        evidence_type: evidence_type(object),
        question_id: text(object, QUESTION_ID),
        control_id: text(object, CONTROL_ID),
        metadata: metadata(object),
        id,
        uploaded_at,
    })
}

/// Translate an evidence library: either a bare array or `{"evidence": [...]}`.
///
/// # Errors
///
/// Returns `StoreError::Ingest` if an item lacks an id or upload time.
pub fn library_from_value(value: &Value) -> Result<Vec<LibraryEvidence>, StoreError> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(object) => children(object, &["evidence", "items"]),
        other => {
            return Err(StoreError::ingest(
                "evidence library",
                format!("expected an array, found {}", type_name(other)),
            ));
        }
    };
    items.iter().map(library_item_from).collect()
}

#[cfg(test)]
mod tests {
    use cf_core::errors::CoreError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn legacy_framework_shape_is_normalized() {
        let raw = json!({
            "code": "legacy",
            "title": "Legacy Catalog",
            "version": 2,
            "functions": [{
                "code": "PR",
                "title": "Protect",
                "subcategories": [{
                    "id": "PR.AA",
                    "name": "Identity Management",
                    "controls": [{
                        "code": "PR.AA-01",
                        "question": "Are identities managed?",
                        "helpText": "Consider service accounts.",
                        "priority": "HIGH",
                        "examples": "Central IdP"
                    }, {
                        "id": "PR.AA-02",
                        "title": "Are credentials rotated?",
                        "priority": "urgent"
                    }]
                }]
            }]
        });

        let framework = framework_from_value(&raw).unwrap();
        assert_eq!(framework.id, "legacy");
        assert_eq!(framework.name, "Legacy Catalog");
        assert_eq!(framework.version, "2");

        let category = &framework.sections[0].categories[0];
        assert_eq!(category.id, "PR.AA");
        let first = &category.questions[0];
        assert_eq!(first.id, "PR.AA-01");
        assert_eq!(first.text, "Are identities managed?");
        assert_eq!(first.guidance.as_deref(), Some("Consider service accounts."));
        assert_eq!(first.priority, Some(QuestionPriority::High));
        assert_eq!(first.examples, vec!["Central IdP"]);

        let second = &category.questions[1];
        assert_eq!(second.text, "Are credentials rotated?");
        assert_eq!(second.priority, None);
    }

    #[test]
    fn canonical_aliases_win_over_legacy_ones() {
        let raw = json!({"id": "q", "question": "canonical", "text": "alt"});
        assert_eq!(question_from(&raw).unwrap().text, "canonical");
    }

    #[test]
    fn question_without_text_is_rejected() {
        let raw = json!({"id": "fw", "sections": [{"id": "s", "categories": [
            {"id": "c", "questions": [{"id": "q1"}]}
        ]}]});
        let err = framework_from_value(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized question record: question 'q1' has no text");
    }

    #[test]
    fn duplicate_question_ids_fail_validation() {
        let raw = json!({"id": "fw", "sections": [{"id": "s", "categories": [
            {"id": "c", "questions": [
                {"id": "q1", "text": "a"},
                {"id": "q1", "text": "b"}
            ]}
        ]}]});
        let err = framework_from_value(&raw).unwrap_err();
        assert!(matches!(err, StoreError::Invalid(CoreError::Validation(_))));
    }

    #[test]
    fn response_values_are_coerced() {
        let responses = responses_from_value(&json!({
            "q1": 2,
            "q2": " 1 ",
            "q3": 2.5,
            "q4": true,
            "q5": "yes",
            "q6": null,
            "q7": 7
        }));
        let kept: Vec<(&str, i64)> = responses.iter().collect();
        assert_eq!(kept, vec![("q1", 2), ("q2", 1), ("q7", 7)]);
    }

    #[rstest]
    #[case(json!(0), Some(0))]
    #[case(json!(3), Some(3))]
    #[case(json!(-1), Some(-1))]
    #[case(json!("2"), Some(2))]
    #[case(json!(" 3\n"), Some(3))]
    #[case(json!(1.0), None)]
    #[case(json!(false), None)]
    #[case(json!("partial"), None)]
    #[case(json!([1]), None)]
    #[case(json!({"value": 1}), None)]
    fn single_response_value_coercion(#[case] raw: Value, #[case] expected: Option<i64>) {
        assert_eq!(response_value(&raw), expected);
    }

    #[test]
    fn camel_case_assessment_is_normalized() {
        let raw = json!({
            "id": "asm-1",
            "frameworkId": "nist-csf-2.0",
            "updatedAt": "2026-05-01T12:00:00Z",
            "responses": {"GV.PO-01": "3"},
            "evidence": {
                "GV.PO-01": [{"title": "Policy", "type": "Doc", "controlId": "A.5.1"}]
            },
            "evidenceLinks": {"GV.PO-01": ["lib-1"], "ID.AM-01": "lib-2"}
        });

        let assessment = assessment_from_value(&raw).unwrap();
        assert_eq!(assessment.framework_id, "nist-csf-2.0");
        assert_eq!(assessment.responses.get("GV.PO-01"), Some(3));

        let reference = &assessment.evidence["GV.PO-01"][0];
        assert_eq!(reference.evidence_type, EvidenceType::Document);
        assert_eq!(reference.control_id.as_deref(), Some("A.5.1"));
        assert_eq!(reference.id, None);

        assert_eq!(assessment.evidence_links["ID.AM-01"], vec!["lib-2"]);
        assert_eq!(assessment.evidence_reference_count(), 3);
    }

    #[test]
    fn assessment_requires_update_time() {
        let raw = json!({"id": "asm-1", "framework_id": "fw"});
        let err = assessment_from_value(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized assessment record: asm-1 has no updated_at");
    }

    #[test]
    fn library_accepts_wrapped_and_bare_arrays() {
        let item = json!({
            "id": "lib-1",
            "title": "Backup log",
            "type": "logs",
            "questionId": "PR.DS-11",
            "uploadedAt": "2026-03-03T00:00:00Z"
        });
        let bare = library_from_value(&json!([item.clone()])).unwrap();
        let wrapped = library_from_value(&json!({"evidence": [item]})).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].evidence_type, EvidenceType::Log);
        assert_eq!(bare[0].question_id.as_deref(), Some("PR.DS-11"));
    }
}
