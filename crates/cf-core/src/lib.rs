//! # cf-core
//!
//! Canonical types, id derivation, and error types for ComplyFlow.
//!
//! This crate provides the foundational types shared across all ComplyFlow crates:
//! - Framework definition structs (framework → section → category → question)
//! - Assessment records (response map, evidence references, evidence links)
//! - Derived remediation artifacts (gaps, task specs, control stubs, evidence records)
//! - Cross-framework control mappings
//! - The `Flow` aggregate produced by one analysis run
//! - Ordered enums (severity, priority, function tag, lifecycle statuses)
//! - Deterministic id derivation helpers
//! - Batch and plan response envelopes
//!
//! Every struct has exactly one canonical field set. Legacy or alternate
//! input shapes are translated at the ingestion boundary (`cf-store`), never here.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
