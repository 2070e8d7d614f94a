pub mod inputs;
pub mod limit;
