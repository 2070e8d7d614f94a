//! Function-taxonomy inference from section identifiers and names.
//!
//! The mapping is an explicit ordered rule table: the first rule whose keyword
//! occurs (case-insensitively) in either the section id or the section name
//! wins. Function names come first, then domain-keyword heuristics. When no
//! rule matches the section is tagged [`DEFAULT_FUNCTION`].

use cf_core::enums::FunctionTag;

/// One keyword → tag rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyRule {
    /// Lowercase substring to look for.
    pub keyword: &'static str,
    pub tag: FunctionTag,
}

const fn rule(keyword: &'static str, tag: FunctionTag) -> TaxonomyRule {
    TaxonomyRule { keyword, tag }
}

/// Rules in precedence order.
pub const RULES: &[TaxonomyRule] = &[
    rule("govern", FunctionTag::Govern),
    rule("identify", FunctionTag::Identify),
    rule("protect", FunctionTag::Protect),
    rule("detect", FunctionTag::Detect),
    rule("respond", FunctionTag::Respond),
    rule("recover", FunctionTag::Recover),
    rule("risk", FunctionTag::Identify),
    rule("access", FunctionTag::Protect),
    rule("monitor", FunctionTag::Detect),
    rule("incident", FunctionTag::Respond),
    rule("backup", FunctionTag::Recover),
];

/// Tag used when no rule matches.
pub const DEFAULT_FUNCTION: FunctionTag = FunctionTag::Identify;

/// The first rule matching the section, if any.
#[must_use]
pub fn matching_rule(section_id: &str, section_name: &str) -> Option<&'static TaxonomyRule> {
    let id = section_id.to_lowercase();
    let name = section_name.to_lowercase();
    RULES
        .iter()
        .find(|rule| id.contains(rule.keyword) || name.contains(rule.keyword))
}

/// Canonical function tag for a section. Total and deterministic.
#[must_use]
pub fn map_to_function(section_id: &str, section_name: &str) -> FunctionTag {
    matching_rule(section_id, section_name).map_or(DEFAULT_FUNCTION, |rule| rule.tag)
}
