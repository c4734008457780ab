use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Threat tier of a contact, ordered by precedence.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display)]
pub enum TrackState {
    Other,
    Proximate,
    IntruderTa,
    ThreatRa,
}

impl TrackState {
    /// Whether the contact warrants at least a traffic advisory.
    pub fn is_intruder(self) -> bool { self >= TrackState::IntruderTa }
}

/// Derived per-contact snapshot, rebuilt from scratch every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Id of the intruder this track was derived from.
    pub intruder_id: String,
    pub intruder_altitude_ft: f64,
    pub intruder_vertical_rate_fpm: i32,

    pub bearing_deg: f64,
    pub range_nm: f64,
    /// Intruder altitude minus own altitude.
    pub relative_altitude_ft: f64,

    /// Finite-difference range rate, negative while closing.
    pub range_rate_kt: f64,
    pub closure_rate_kt: f64,
    /// Vertical closing speed, zero unless `relAlt` and the `own - intruder` rate differ in sign.
    pub vertical_closure_fpm: i32,

    pub range_tau_s: f64,
    pub vertical_tau_s: f64,

    pub altitude_reporting: bool,
    pub state: TrackState,

    /// Whole seconds to the earlier of the two taus, [`Track::NO_CONFLICT_S`] if neither closes.
    pub time_to_conflict_s: u32,
    pub last_update: DateTime<Utc>,
}

impl Track {
    /// Sentinel time to conflict of a contact that does not close on either axis.
    pub const NO_CONFLICT_S: u32 = 999;
}
