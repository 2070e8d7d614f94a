//! Gap extraction: a depth-first walk of framework → section → category → question.

use cf_core::entities::{
    Category, FULLY_IMPLEMENTED, Framework, Gap, Question, ResponseMap, Section,
};
use cf_core::ids;

use crate::severity::{Classification, classify, normalize_response};

/// Emit one gap per question that is unanswered or answered `0`/`1`.
///
/// Output follows traversal order: sections, then categories, then questions,
/// exactly as they appear in the framework. The order is stable across calls
/// but carries no priority meaning. Empty sections, categories, and frameworks
/// contribute nothing.
#[must_use]
pub fn extract_gaps(assessment_id: &str, framework: &Framework, responses: &ResponseMap) -> Vec<Gap> {
    let mut gaps = Vec::new();

    for section in &framework.sections {
        for category in &section.categories {
            for question in &category.questions {
                let raw = responses.get(&question.id);
                let current = raw.and_then(normalize_response);
                if let (Some(value), None) = (raw, current) {
                    tracing::warn!(
                        question_id = %question.id,
                        value,
                        "response value out of range; treating question as unanswered"
                    );
                }

                if let Classification::Gap(severity) = classify(raw, question.priority) {
                    gaps.push(Gap {
                        gap_id: ids::gap_id(assessment_id, &question.id),
                        question_id: question.id.clone(),
                        section_id: section.id.clone(),
                        category_id: category.id.clone(),
                        severity,
                        current_response: current,
                        recommended_response: FULLY_IMPLEMENTED,
                    });
                }
            }
        }
    }

    tracing::debug!(
        assessment_id,
        framework_id = %framework.id,
        questions = framework.question_count(),
        gaps = gaps.len(),
        "extracted gaps"
    );

    gaps
}

/// The framework nodes a gap was derived from.
#[derive(Debug, Clone, Copy)]
pub struct GapLocation<'a> {
    pub framework: &'a Framework,
    pub section: &'a Section,
    pub category: &'a Category,
    pub question: &'a Question,
}

/// Resolve a gap back to its section, category, and question.
///
/// The question id is the key. Section and category ids only need to agree,
/// so a framework that repeats a section or category id still resolves every
/// gap it produced.
///
/// Returns `None` if the gap was extracted from a different framework.
#[must_use]
pub fn locate<'a>(framework: &'a Framework, gap: &Gap) -> Option<GapLocation<'a>> {
    framework
        .sections
        .iter()
        .filter(|section| section.id == gap.section_id)
        .flat_map(|section| {
            section
                .categories
                .iter()
                .filter(|category| category.id == gap.category_id)
                .map(move |category| (section, category))
        })
        .find_map(|(section, category)| {
            category
                .questions
                .iter()
                .find(|question| question.id == gap.question_id)
                .map(|question| GapLocation {
                    framework,
                    section,
                    category,
                    question,
                })
        })
}
