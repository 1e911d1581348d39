//! CLI command implementations.

mod apply;
mod check;
mod keywords;

pub use apply::{ApplyArgs, run_apply};
pub use check::{CheckArgs, run_check};
pub use keywords::{KeywordsArgs, run_keywords};
