mod aircraft_state;
mod transponder;

pub use aircraft_state::AircraftState;
pub use transponder::{Transponder, TransponderMode};
