use crate::advisory::ResolutionAdvisory;
use crate::aircraft::AircraftState;
use crate::common::math::{clamped_fpm, step_towards};
use chrono::TimeDelta;
use strum_macros::{Display, EnumString};

/// What the autopilot flies.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ApMode {
    /// Capture and hold the target altitude.
    #[strum(serialize = "alt")]
    AltitudeHold,
    /// Fly the required rate of the active RA, altitude hold otherwise.
    #[strum(serialize = "ra")]
    RaFollow,
}

/// Vertical autopilot of the own aircraft.
#[derive(Debug)]
pub struct Autopilot {
    mode: ApMode,
    commanded_vs_fpm: i32,
}

impl Autopilot {
    /// Commanded rate per foot of altitude error.
    const ALT_HOLD_GAIN: f64 = 3.0;
    const MAX_COMMAND_FPM: i32 = 3000;
    /// Largest change of the actual vertical rate within one tick.
    const MAX_RATE_STEP_FPM: i32 = 450;

    pub fn new(mode: ApMode) -> Self { Self { mode, commanded_vs_fpm: 0 } }

    pub fn mode(&self) -> ApMode { self.mode }
    pub fn commanded_vs_fpm(&self) -> i32 { self.commanded_vs_fpm }
    pub fn set_mode(&mut self, mode: ApMode) { self.mode = mode; }

    /// Updates the command, slews the own vertical rate towards it and integrates the altitude.
    ///
    /// # Arguments
    /// - `ownship`: The own aircraft, mutated in place.
    /// - `ra`: The RA of this tick, if any.
    /// - `dt`: Scaled time step of this tick.
    pub fn step(&mut self, ownship: &mut AircraftState, ra: Option<&ResolutionAdvisory>, dt: TimeDelta) {
        self.commanded_vs_fpm = match (self.mode, ra) {
            (ApMode::RaFollow, Some(ra)) => ra.required_vs_fpm(),
            _ => {
                let error_ft = ownship.target_altitude_ft() - ownship.altitude_ft();
                clamped_fpm(error_ft * Self::ALT_HOLD_GAIN).clamp(-Self::MAX_COMMAND_FPM, Self::MAX_COMMAND_FPM)
            }
        };
        let rate = step_towards(ownship.vertical_rate_fpm(), self.commanded_vs_fpm, Self::MAX_RATE_STEP_FPM);
        ownship.set_vertical_rate_fpm(rate);
        ownship.advance_altitude(dt);
    }
}
