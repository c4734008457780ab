use super::{
    tau::{modified_tau_trigger, range_tau_s, vertical_closure_fpm, vertical_tau_s, vertical_trigger},
    track::{Track, TrackState},
};
use crate::aircraft::{AircraftState, Transponder};
use crate::common::math::{SECS_PER_HOUR, floor_secs_or, secs_f64};
use crate::sensitivity::SensitivityThresholds;
use crate::tcas::TcasMode;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Range sample kept per intruder for the finite-difference range rate.
#[derive(Debug, Clone, Copy)]
struct RangeSample {
    range_nm: f64,
    t: DateTime<Utc>,
}

/// Builds [`Track`]s from the own aircraft and the intruder roster.
///
/// The previous-range cache is the only state carried from one update to the next.
/// Entries must be evicted together with their intruder, see [`Tracker::retain_roster`].
#[derive(Debug, Default)]
pub struct Tracker {
    prev_range: HashMap<String, RangeSample>,
}

impl Tracker {
    /// Range within which any contact is at least proximate traffic.
    const PROXIMATE_RANGE_NM: f64 = 6.0;
    /// Altitude band within which any contact is at least proximate traffic.
    const PROXIMATE_ALT_FT: f64 = 1200.0;
    /// Lower bound on the elapsed time between two range samples.
    const MIN_SAMPLE_DT_S: f64 = 1e-3;

    pub fn new() -> Self { Self::default() }

    /// Recomputes every track for this tick.
    ///
    /// # Arguments
    /// - `now`: Timestamp of this update, used for the range rate.
    /// - `ownship`: The own aircraft.
    /// - `intruders`: All surveilled intruders.
    /// - `transponders`: Transponders by intruder id, a missing entry counts as altitude-reporting.
    /// - `mode`: Current operating mode.
    /// - `thresholds`: The active threshold bundle.
    ///
    /// # Returns
    /// - Tracks keyed by intruder id.
    pub fn update(
        &mut self,
        now: DateTime<Utc>,
        ownship: &AircraftState,
        intruders: &[AircraftState],
        transponders: &HashMap<String, Transponder>,
        mode: TcasMode,
        thresholds: &SensitivityThresholds,
    ) -> HashMap<String, Track> {
        intruders
            .iter()
            .map(|ac| {
                let altitude_reporting =
                    transponders.get(ac.id()).is_none_or(Transponder::altitude_reporting);
                let track = self.track_for(now, ownship, ac, altitude_reporting, mode, thresholds);
                (ac.id().to_string(), track)
            })
            .collect()
    }

    fn track_for(
        &mut self,
        now: DateTime<Utc>,
        ownship: &AircraftState,
        ac: &AircraftState,
        altitude_reporting: bool,
        mode: TcasMode,
        thresholds: &SensitivityThresholds,
    ) -> Track {
        let rel_pos = ownship.pos().to(&ac.pos());
        let range_nm = rel_pos.abs();
        let bearing_deg = rel_pos.compass_bearing();
        let rel_alt_ft = ac.altitude_ft() - ownship.altitude_ft();

        let range_rate_kt = self.range_rate_kt(ac.id(), range_nm, now);
        let closure_rate_kt = (-range_rate_kt).max(0.0);
        let v_closure =
            vertical_closure_fpm(rel_alt_ft, ownship.vertical_rate_fpm(), ac.vertical_rate_fpm());

        let range_tau = range_tau_s(range_nm, closure_rate_kt);
        let vertical_tau = vertical_tau_s(rel_alt_ft, v_closure);

        let ta_fires = modified_tau_trigger(range_nm, closure_rate_kt, thresholds.ta_tau_s(), thresholds.ta_dmod_nm())
            && vertical_trigger(rel_alt_ft, v_closure, thresholds.ta_tau_s(), thresholds.ta_zthr_ft());
        let ra_fires = mode.allows_ra()
            && altitude_reporting
            && thresholds.ra().is_some_and(|ra| {
                modified_tau_trigger(range_nm, closure_rate_kt, ra.tau_s(), ra.dmod_nm())
                    && vertical_trigger(rel_alt_ft, v_closure, ra.tau_s(), ra.zthr_ft())
            });

        let state = if ra_fires {
            TrackState::ThreatRa
        } else if ta_fires {
            TrackState::IntruderTa
        } else if range_nm <= Self::PROXIMATE_RANGE_NM && rel_alt_ft.abs() <= Self::PROXIMATE_ALT_FT {
            TrackState::Proximate
        } else {
            TrackState::Other
        };

        Track {
            intruder_id: ac.id().to_string(),
            intruder_altitude_ft: ac.altitude_ft(),
            intruder_vertical_rate_fpm: ac.vertical_rate_fpm(),
            bearing_deg,
            range_nm,
            relative_altitude_ft: rel_alt_ft,
            range_rate_kt,
            closure_rate_kt,
            vertical_closure_fpm: v_closure,
            range_tau_s: range_tau,
            vertical_tau_s: vertical_tau,
            altitude_reporting,
            state,
            time_to_conflict_s: floor_secs_or(range_tau.min(vertical_tau), Track::NO_CONFLICT_S),
            last_update: now,
        }
    }

    /// Range rate in knots against the cached sample, zero on the first sample.
    fn range_rate_kt(&mut self, id: &str, range_nm: f64, now: DateTime<Utc>) -> f64 {
        let sample = RangeSample { range_nm, t: now };
        match self.prev_range.insert(id.to_string(), sample) {
            None => 0.0,
            Some(prev) => {
                let dt_s = secs_f64(now - prev.t).max(Self::MIN_SAMPLE_DT_S);
                (range_nm - prev.range_nm) / dt_s * SECS_PER_HOUR
            }
        }
    }

    /// Drops every cached sample whose intruder is not in `roster`.
    pub fn retain_roster<'a>(&mut self, roster: impl IntoIterator<Item = &'a str>) {
        let live: HashSet<&str> = roster.into_iter().collect();
        self.prev_range.retain(|id, _| live.contains(id.as_str()));
    }

    /// Number of intruders with a cached range sample.
    pub fn cached_len(&self) -> usize { self.prev_range.len() }
}
