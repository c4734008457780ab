//! Sensitivity levels and the threshold table they select.

mod sensitivity_level;
mod thresholds;

pub use sensitivity_level::SensitivityLevel;
pub use thresholds::{RaThresholds, SensitivityProfile, SensitivityThresholds};
