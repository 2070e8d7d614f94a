//! # cf-mappings
//!
//! Cross-framework control mapping registry.
//!
//! - [`ControlMappingRegistry`]: shared, append-only store queryable from either
//!   side of a mapping
//! - [`curated`]: the built-in curated mapping set (NIST CSF 2.0, ISO/IEC
//!   27001:2022, SOC 2, CIS Controls v8)
//!
//! The registry is curated and growable. It makes no claim of completeness:
//! an empty query result means "no curated mapping", not "no relationship".

pub mod curated;
mod error;
mod registry;

pub use error::MappingError;
pub use registry::ControlMappingRegistry;
