//! # cf-analysis
//!
//! The pure core of ComplyFlow: everything between a framework definition plus
//! an assessment and the remediation artifacts derived from them.
//!
//! - [`severity`]: response value + question priority → gap severity
//! - [`estimation`]: severity + priority → effort hours and due dates
//! - [`taxonomy`]: section id/name → canonical function tag (ordered rule table)
//! - [`gaps`]: depth-first gap extraction over section → category → question
//! - [`synthesis`]: gap → task specification and control stub
//! - [`evidence`]: evidence references → deduplicated evidence records
//! - [`flow`]: gap output → the `Flow` aggregate with capability flags
//! - [`provider`]: the injected framework lookup seam
//!
//! Nothing in this crate performs I/O. Given identical inputs every function
//! returns identical output, so results can be cached or recomputed freely.
//! Only the framework lookup in [`flow::build_flow`] can fail.

pub mod error;
pub mod estimation;
pub mod evidence;
pub mod flow;
pub mod gaps;
pub mod provider;
pub mod severity;
pub mod synthesis;
pub mod taxonomy;

pub use error::AnalysisError;
pub use flow::{assemble_flow, build_flow, build_flow_for};
pub use gaps::{GapLocation, extract_gaps, locate};
pub use provider::{FrameworkProvider, InMemoryFrameworks};
pub use severity::{Classification, classify};
pub use synthesis::{TaskOptions, synthesize_control, synthesize_plan, synthesize_task};
