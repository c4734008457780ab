//! Traffic and resolution advisories and the logic that issues them.

mod advisory_base;
mod advisory_engine;
mod maneuver;

pub use advisory_base::{AdvisoryState, RaKind, RaSense, ResolutionAdvisory, TrafficAdvisory};
pub use advisory_engine::AdvisoryEngine;
