//! The tick-driven world around the own aircraft and everything it hands to the cockpit.

mod autopilot;
mod banner;
mod display;
mod sim_config;
mod simulator;
#[cfg(test)]
mod tests;
mod traffic;

pub use autopilot::ApMode;
pub use banner::AuralAlert;
pub use display::{DisplayColor, DisplayEntry, RaDisplay, SymbolType, ThreatLevel, TrafficDisplay, VerticalTrend};
pub use sim_config::{ConfigError, SimConfig};
pub use simulator::{Simulator, TickOutput};
pub use traffic::{RandomTraffic, TrafficGenerator};
