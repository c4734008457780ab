use super::advisory_base::{RaKind, RaSense};
use crate::aircraft::AircraftState;
use crate::common::math::SECS_PER_MIN;
use crate::fatal;
use crate::tracking::Track;
use std::cmp::Ordering;

/// Senses in scan order, upward first.
const SENSES: [(RaKind, RaSense); 2] = [(RaKind::Climb, RaSense::Upward), (RaKind::Descend, RaSense::Downward)];
/// Strengths in scan order, weakest first.
const STRENGTHS_FPM: [i32; 4] = [1500, 2500, 3500, 4400];
/// Time to CPA assumed when the contact is not closing in range.
const DEFAULT_T_CPA_S: f64 = 25.0;
const MIN_T_CPA_S: f64 = 1.0;
const MAX_T_CPA_S: f64 = 45.0;

/// Chosen vertical maneuver.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Maneuver {
    pub kind: RaKind,
    pub sense: RaSense,
    pub vs_fpm: i32,
}

/// A scored candidate rate.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    maneuver: Maneuver,
    achieves_alim: bool,
    non_crossing: bool,
    /// Change from the current own vertical rate.
    disruption_fpm: u32,
    separation_ft: f64,
}

impl Candidate {
    /// Lexicographic score: ALIM first, then no crossing, then least disruption, then
    /// most separation. `Greater` means `self` is the better candidate.
    fn cmp_score(&self, other: &Self) -> Ordering {
        self.achieves_alim
            .cmp(&other.achieves_alim)
            .then(self.non_crossing.cmp(&other.non_crossing))
            .then(other.disruption_fpm.cmp(&self.disruption_fpm))
            .then(self.separation_ft.total_cmp(&other.separation_ft))
    }

    /// A candidate that ends the scan: nothing later can be preferred.
    fn is_sufficient(&self) -> bool { self.achieves_alim && self.non_crossing }
}

/// Estimated seconds to closest approach, bounded to `[1, 45]`.
pub fn time_to_cpa_s(track: &Track) -> f64 {
    let t = if track.range_tau_s.is_finite() { track.range_tau_s } else { DEFAULT_T_CPA_S };
    t.clamp(MIN_T_CPA_S, MAX_T_CPA_S)
}

#[allow(clippy::float_cmp)]
fn evaluate(track: &Track, ownship: &AircraftState, t_cpa_s: f64, alim_ft: f64, maneuver: Maneuver) -> Candidate {
    let own_cpa = ownship.altitude_ft() + f64::from(maneuver.vs_fpm) * t_cpa_s / SECS_PER_MIN;
    let intruder_cpa =
        track.intruder_altitude_ft + f64::from(track.intruder_vertical_rate_fpm) * t_cpa_s / SECS_PER_MIN;
    let separation_ft = (own_cpa - intruder_cpa).abs();

    let rel_now = track.intruder_altitude_ft - ownship.altitude_ft();
    let rel_cpa = intruder_cpa - own_cpa;
    let crossing = rel_now == 0.0 || rel_now * rel_cpa < 0.0;

    Candidate {
        maneuver,
        achieves_alim: separation_ft >= alim_ft,
        non_crossing: !crossing,
        disruption_fpm: maneuver.vs_fpm.abs_diff(ownship.vertical_rate_fpm()),
        separation_ft,
    }
}

/// Picks the sense and strength of a corrective RA against `track`.
///
/// Candidates are scanned climb before descend, weakest strength first. The scan stops at
/// the first candidate that reaches ALIM without crossing the intruder altitude, even if a
/// later one would disturb the own flight path less. Otherwise the best scoring candidate
/// wins and ties keep the earlier one.
///
/// # Arguments
/// - `track`: The primary threat.
/// - `ownship`: The own aircraft.
/// - `alim_ft`: Separation to reach at closest approach.
///
/// # Returns
/// - The selected [`Maneuver`].
pub fn select_maneuver(track: &Track, ownship: &AircraftState, alim_ft: f64) -> Maneuver {
    let t_cpa_s = time_to_cpa_s(track);
    let mut best: Option<Candidate> = None;

    'scan: for (kind, sense) in SENSES {
        for strength in STRENGTHS_FPM {
            let maneuver = Maneuver { kind, sense, vs_fpm: sense.sign() * strength };
            let cand = evaluate(track, ownship, t_cpa_s, alim_ft, maneuver);
            if best.is_none_or(|b| cand.cmp_score(&b) == Ordering::Greater) {
                best = Some(cand);
            }
            if cand.is_sufficient() {
                break 'scan;
            }
        }
    }

    let Some(best) = best else {
        fatal!("Maneuver selection scanned no candidates against {}", track.intruder_id);
    };
    best.maneuver
}
