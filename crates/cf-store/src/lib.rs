//! # cf-store
//!
//! Everything in ComplyFlow that touches the filesystem or an external
//! collaborator:
//!
//! - [`ingest`]: legacy and alternate JSON shapes → canonical records, once,
//!   at the boundary
//! - [`providers`]: directory-backed framework provider and assessment /
//!   evidence-library loaders
//! - [`service`]: the task-creation and control-persistence collaborator traits
//! - [`sinks`]: JSONL implementations of those traits
//! - [`batch`]: sequential batch task creation with partial-failure reporting

pub mod batch;
pub mod error;
pub mod ingest;
pub mod providers;
pub mod service;
pub mod sinks;

pub use batch::{create_tasks, persist_controls};
pub use error::StoreError;
pub use providers::{DirectoryFrameworks, load_assessment, load_evidence_library, load_framework};
pub use service::{ControlPersistenceService, TaskCreationService};
pub use sinks::{JsonlControlSink, JsonlTaskSink};
