pub mod analyze;
pub mod controls;
pub mod dispatch;
pub mod evidence;
pub mod gaps;
pub mod mappings;
pub mod plan;
pub mod schema;
pub mod shared;
pub mod tasks;
