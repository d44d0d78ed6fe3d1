//! Engine module - exercise lookup and per-attempt dispatch
//!
//! Re-exports only. All logic in submodules.

mod registry;
mod dispatcher;

pub use registry::{AnalyzerFactory, AnalyzerRegistry, Resolved, normalize_key};
pub use dispatcher::FormEngine;
