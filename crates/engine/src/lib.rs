// In crates/engine/src/lib.rs

pub mod error;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunRequest, StrategyRun};
