//! Entity structs for all ComplyFlow domain objects.
//!
//! Framework and assessment records are inputs owned by external providers.
//! Gaps, task specs, control stubs, evidence records, and flows are derived
//! on every analysis call and never persisted by the core.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod assessment;
mod control;
mod evidence;
mod flow;
mod framework;
mod gap;
mod mapping;
mod task_spec;

pub use assessment::{Assessment, EvidenceRef, LibraryEvidence, ResponseMap};
pub use control::ControlStub;
pub use evidence::EvidenceRecord;
pub use flow::{Flow, SeverityCounts};
pub use framework::{Category, Framework, Question, Section};
pub use gap::{FULLY_IMPLEMENTED, Gap};
pub use mapping::ControlMapping;
pub use task_spec::{TaskMetadata, TaskSpec};
