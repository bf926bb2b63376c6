//! Detection of common beginner mistakes.
//!
//! Each rule lives in its own file and returns at most one [`Finding`].
//! Rules are stateless; [`detect_mistakes`] builds a fresh list per call.

mod indentation;
mod magic_numbers;
mod runner;
mod structure;
mod types;
mod unused;

pub use runner::detect_mistakes;
pub use types::{Finding, FindingKind, MistakeThresholds};
