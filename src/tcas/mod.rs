//! The collision avoidance unit: operating mode, active thresholds and the surveillance cycle.

mod tcas_mode;
mod tcas_unit;

pub use tcas_mode::{TcasMode, TcasVersion};
pub use tcas_unit::TcasUnit;
