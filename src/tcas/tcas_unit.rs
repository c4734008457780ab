use super::{TcasMode, TcasVersion};
use crate::advisory::{AdvisoryEngine, ResolutionAdvisory, TrafficAdvisory};
use crate::aircraft::{AircraftState, Transponder};
use crate::sensitivity::{SensitivityLevel, SensitivityProfile, SensitivityThresholds};
use crate::tracking::{Track, Tracker};
use crate::{event, log};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// One installed collision avoidance unit.
///
/// Owns the threshold selection, the [`Tracker`] and the [`AdvisoryEngine`] and runs
/// them in order once per surveillance cycle.
#[derive(Debug)]
pub struct TcasUnit {
    version: TcasVersion,
    mode: TcasMode,
    profile: SensitivityProfile,
    current_sl: SensitivityLevel,
    active: SensitivityThresholds,
    tracks: HashMap<String, Track>,
    tracker: Tracker,
    engine: AdvisoryEngine,
}

impl TcasUnit {
    /// Creates a unit running the default threshold table at `initial_sl`.
    pub fn new(mode: TcasMode, initial_sl: SensitivityLevel) -> Self {
        Self::with_profile(TcasVersion::V7_1, mode, SensitivityProfile::default_v71(), initial_sl)
    }

    pub fn with_profile(
        version: TcasVersion,
        mode: TcasMode,
        profile: SensitivityProfile,
        initial_sl: SensitivityLevel,
    ) -> Self {
        let active = profile.thresholds(initial_sl);
        Self {
            version,
            mode,
            profile,
            current_sl: initial_sl,
            active,
            tracks: HashMap::new(),
            tracker: Tracker::new(),
            engine: AdvisoryEngine::new(),
        }
    }

    pub fn version(&self) -> TcasVersion { self.version }
    pub fn mode(&self) -> TcasMode { self.mode }
    pub fn current_sl(&self) -> SensitivityLevel { self.current_sl }
    pub fn thresholds(&self) -> &SensitivityThresholds { &self.active }
    pub fn tracks(&self) -> &HashMap<String, Track> { &self.tracks }
    pub fn ta(&self) -> Option<&TrafficAdvisory> { self.engine.ta() }
    pub fn ra(&self) -> Option<&ResolutionAdvisory> { self.engine.ra() }
    pub fn primary_threat(&self) -> Option<&str> { self.engine.primary_threat() }

    /// Switches to `sl` and reloads the active thresholds.
    ///
    /// # Returns
    /// - `true` if the level actually changed.
    pub fn set_sl(&mut self, sl: SensitivityLevel) -> bool {
        if sl == self.current_sl {
            return false;
        }
        log!("Sensitivity level {} -> {}", self.current_sl, sl);
        self.current_sl = sl;
        self.active = self.profile.thresholds(sl);
        true
    }

    pub fn set_mode(&mut self, mode: TcasMode) {
        if mode != self.mode {
            log!("TCAS mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Runs one surveillance cycle: tracking followed by the advisory update.
    ///
    /// # Arguments
    /// - `now`: Timestamp of this cycle.
    /// - `ownship`: The own aircraft.
    /// - `intruders`: All surveilled intruders.
    /// - `transponders`: Transponders by intruder id.
    ///
    /// # Returns
    /// - The current `(TA, RA)` pair.
    pub fn surveil(
        &mut self,
        now: DateTime<Utc>,
        ownship: &AircraftState,
        intruders: &[AircraftState],
        transponders: &HashMap<String, Transponder>,
    ) -> (Option<TrafficAdvisory>, Option<ResolutionAdvisory>) {
        self.tracks = self.tracker.update(now, ownship, intruders, transponders, self.mode, &self.active);
        event!("Surveilled {} intruder(s) at {}", self.tracks.len(), self.current_sl);
        self.engine.update(now, ownship, self.mode, &self.active, self.tracks.values())
    }

    /// Forgets every intruder that is not in `roster`.
    pub fn retain_roster<'a>(&mut self, roster: impl IntoIterator<Item = &'a str> + Clone) {
        self.tracker.retain_roster(roster.clone());
        let live: Vec<&str> = roster.into_iter().collect();
        self.tracks.retain(|id, _| live.contains(&id.as_str()));
    }

    /// Number of intruders the tracker still holds a range sample for.
    pub fn cached_len(&self) -> usize { self.tracker.cached_len() }
}
