use super::{
    advisory_base::{AdvisoryState, ResolutionAdvisory, TrafficAdvisory},
    maneuver::select_maneuver,
};
use crate::aircraft::AircraftState;
use crate::sensitivity::SensitivityThresholds;
use crate::tcas::TcasMode;
use crate::tracking::{Track, TrackState};
use crate::{advisory, event};
use chrono::{DateTime, Utc};

/// Turns classified tracks into the current TA and RA.
///
/// Holds the only advisory state carried across ticks: the active TA, the active RA and
/// the id of the primary threat the RA was computed against.
#[derive(Debug, Default)]
pub struct AdvisoryEngine {
    ta: Option<TrafficAdvisory>,
    ra: Option<ResolutionAdvisory>,
    primary_threat: Option<String>,
}

impl AdvisoryEngine {
    pub fn new() -> Self { Self::default() }

    pub fn ta(&self) -> Option<&TrafficAdvisory> { self.ta.as_ref() }
    pub fn ra(&self) -> Option<&ResolutionAdvisory> { self.ra.as_ref() }
    pub fn primary_threat(&self) -> Option<&str> { self.primary_threat.as_deref() }

    /// Updates the advisories from this tick's tracks.
    ///
    /// # Arguments
    /// - `now`: Timestamp of this tick, becomes the issue time of new advisories.
    /// - `ownship`: The own aircraft.
    /// - `mode`: Current operating mode.
    /// - `thresholds`: The active threshold bundle.
    /// - `tracks`: All tracks of this tick.
    ///
    /// # Returns
    /// - The current `(TA, RA)` pair.
    pub fn update<'a>(
        &mut self,
        now: DateTime<Utc>,
        ownship: &AircraftState,
        mode: TcasMode,
        thresholds: &SensitivityThresholds,
        tracks: impl IntoIterator<Item = &'a Track>,
    ) -> (Option<TrafficAdvisory>, Option<ResolutionAdvisory>) {
        let current: Vec<&Track> = tracks.into_iter().collect();
        self.update_ta(now, &current);

        let Some(alim_ft) = thresholds.alim_ft().filter(|_| mode.allows_ra()) else {
            self.clear_ra("RA inhibited");
            return (self.ta, None);
        };

        let primary = current
            .iter()
            .filter(|t| t.state == TrackState::ThreatRa)
            .min_by(|a, b| {
                a.range_tau_s
                    .total_cmp(&b.range_tau_s)
                    .then(a.range_nm.total_cmp(&b.range_nm))
                    .then_with(|| a.intruder_id.cmp(&b.intruder_id))
            });
        let Some(primary) = primary else {
            self.clear_ra("clear of conflict");
            return (self.ta, None);
        };
        if self.primary_threat.as_deref() != Some(primary.intruder_id.as_str()) {
            event!("Primary threat is now {}", primary.intruder_id);
            self.primary_threat = Some(primary.intruder_id.clone());
        }

        let next_ra = match self.ra {
            Some(active) if primary.relative_altitude_ft.abs() >= alim_ft => {
                if active.state() != AdvisoryState::Weakened {
                    advisory!(
                        "RA weakened to LEVEL OFF, {:.0} ft vertical separation against {}",
                        primary.relative_altitude_ft.abs(),
                        primary.intruder_id
                    );
                }
                active.weakened(alim_ft)
            }
            _ => {
                let maneuver = select_maneuver(primary, ownship, alim_ft);
                let ra = ResolutionAdvisory::corrective(now, maneuver.kind, maneuver.sense, maneuver.vs_fpm, alim_ft);
                if self.ra.is_none_or(|prev| prev.kind() != ra.kind() || prev.required_vs_fpm() != ra.required_vs_fpm()) {
                    advisory!(
                        "RA {} at {:+} fpm against {} (range {:.2} nm, tau {:.1} s)",
                        ra.kind(),
                        ra.required_vs_fpm(),
                        primary.intruder_id,
                        primary.range_nm,
                        primary.range_tau_s
                    );
                }
                ra
            }
        };
        self.ra = Some(next_ra);
        (self.ta, self.ra)
    }

    fn update_ta(&mut self, now: DateTime<Utc>, tracks: &[&Track]) {
        let intruders = tracks.iter().filter(|t| t.state.is_intruder()).count();
        if intruders == 0 {
            if self.ta.take().is_some() {
                advisory!("TA cleared");
            }
            return;
        }
        if self.ta.is_none() {
            advisory!("TA issued, {intruders} intruder(s)");
            self.ta = Some(TrafficAdvisory::new(now));
        }
    }

    fn clear_ra(&mut self, reason: &str) {
        self.primary_threat = None;
        if self.ra.take().is_some() {
            advisory!("RA terminated, {reason}");
        }
    }
}
