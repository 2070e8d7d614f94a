//! # cf-schema
//!
//! JSON Schema registry for ComplyFlow.
//!
//! Canonical types are defined in `cf-core` with `#[derive(JsonSchema)]`.
//! This crate collects their schemas under stable names, validates arbitrary
//! JSON against them, and backs the `cfl schema` command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
