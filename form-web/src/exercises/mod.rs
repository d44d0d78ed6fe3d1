//! Exercises module - one phase state machine per movement pattern
//!
//! Re-exports only. All logic in submodules.

mod analyzer;
mod body;
mod squat;
mod cat_camel;
mod side_bend;
mod hip_hinge;
mod prone_extension;
mod generic;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::{ExerciseAnalyzer, FrameContext, rep_feedback};
pub use body::{Midline, mean_elbow_angle, mean_knee_angle};
pub use squat::{SquatAnalyzer, SquatPhase, SquatSignals, SquatStep, SquatThresholds, CompletedSquat};
pub use cat_camel::{CatCamelAnalyzer, CatCamelPhase, CatCamelThresholds};
pub use side_bend::{SideBendAnalyzer, SideBendPhase, SideBendThresholds};
pub use hip_hinge::{HipHingeAnalyzer, HipHingePhase, HipHingeThresholds};
pub use prone_extension::{ProneExtensionAnalyzer, ProneExtensionPhase, ProneExtensionThresholds};
pub use generic::GenericAnalyzer;
