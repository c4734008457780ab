use super::{
    autopilot::{ApMode, Autopilot},
    banner::{AuralAlert, Banner},
    display::{DisplayEntry, RaDisplay, TrafficDisplay, display_entries},
    sim_config::SimConfig,
    traffic::TrafficGenerator,
};
use crate::advisory::{ResolutionAdvisory, TrafficAdvisory};
use crate::aircraft::{AircraftState, Transponder};
use crate::common::{
    Vec2D,
    math::{secs_f64, time_delta_from_secs},
};
use crate::sensitivity::SensitivityLevel;
use crate::tcas::{TcasMode, TcasUnit};
use crate::tracking::Track;
use crate::zones::AirspaceVolume;
use crate::{info, log, warn};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Everything a tick hands to the cockpit displays.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub ta: Option<TrafficAdvisory>,
    pub ra: Option<ResolutionAdvisory>,
    pub display_entries: Vec<DisplayEntry>,
}

/// The simulated world around one own aircraft.
///
/// Owns the sim clock. Every tick advances it by the scaled time step and uses the result
/// as "now" for surveillance, advisories, banners and spawning.
pub struct Simulator<G: TrafficGenerator> {
    clock: DateTime<Utc>,
    time_scale: f64,
    max_intruders: usize,
    ownship: AircraftState,
    unit: TcasUnit,
    protected_volume: AirspaceVolume,
    intruders: Vec<AircraftState>,
    transponders: HashMap<String, Transponder>,
    traffic: G,
    autopilot: Autopilot,
    banner: Banner,
    traffic_display: TrafficDisplay,
    ra_display: RaDisplay,
    last_output: TickOutput,
}

impl<G: TrafficGenerator> Simulator<G> {
    const OWN_ID: &'static str = "OWN";
    const OWN_ALTITUDE_FT: f64 = 12000.0;
    const OWN_GS_KT: f64 = 250.0;
    /// Intruders further out than this leave the simulation.
    const CULL_RANGE_NM: f64 = 16.0;
    const TARGET_ALT_STEP_FT: f64 = 100.0;

    /// Creates a simulation with the own aircraft level at 12000 ft.
    ///
    /// # Arguments
    /// - `config`: Time scale, capacity and initial modes.
    /// - `traffic`: Source of new intruders.
    /// - `start`: Initial value of the sim clock.
    pub fn new(config: &SimConfig, traffic: G, start: DateTime<Utc>) -> Self {
        let ownship =
            AircraftState::new(Self::OWN_ID, Self::OWN_ALTITUDE_FT, 0, Self::OWN_GS_KT, 0.0, Vec2D::zero());
        let unit = TcasUnit::new(config.tcas_mode, SensitivityLevel::from_altitude_ft(ownship.altitude_ft()));
        let protected_volume = AirspaceVolume::from_thresholds(unit.current_sl(), unit.thresholds());
        Self {
            clock: start,
            time_scale: config.time_scale,
            max_intruders: config.max_intruders,
            ownship,
            unit,
            protected_volume,
            intruders: Vec::new(),
            transponders: HashMap::new(),
            traffic,
            autopilot: Autopilot::new(config.ap_mode),
            banner: Banner::default(),
            traffic_display: TrafficDisplay::default(),
            ra_display: RaDisplay::default(),
            last_output: TickOutput::default(),
        }
    }

    pub fn clock(&self) -> DateTime<Utc> { self.clock }
    pub fn time_scale(&self) -> f64 { self.time_scale }
    pub fn ownship(&self) -> &AircraftState { &self.ownship }
    pub fn intruders(&self) -> &[AircraftState] { &self.intruders }
    pub fn transponders(&self) -> &HashMap<String, Transponder> { &self.transponders }
    pub fn tracks(&self) -> &HashMap<String, Track> { self.unit.tracks() }
    pub fn unit(&self) -> &TcasUnit { &self.unit }
    pub fn current_sl(&self) -> SensitivityLevel { self.unit.current_sl() }
    pub fn protected_volume(&self) -> &AirspaceVolume { &self.protected_volume }
    pub fn commanded_vs_fpm(&self) -> i32 { self.autopilot.commanded_vs_fpm() }
    pub fn ap_mode(&self) -> ApMode { self.autopilot.mode() }
    pub fn tcas_mode(&self) -> TcasMode { self.unit.mode() }
    pub fn traffic_display(&self) -> &TrafficDisplay { &self.traffic_display }
    pub fn ra_display(&self) -> &RaDisplay { &self.ra_display }
    pub fn last_output(&self) -> &TickOutput { &self.last_output }

    /// Banner text at the current sim time, empty when nothing is on display.
    pub fn banner(&self) -> &'static str { self.banner.text(self.clock) }

    /// Alert behind the current banner.
    pub fn banner_alert(&self) -> Option<AuralAlert> { self.banner.alert(self.clock) }

    /// Moves the autopilot target altitude by `steps` increments of 100 ft.
    pub fn bump_target_altitude(&mut self, steps: i32) {
        let target = self.ownship.target_altitude_ft() + f64::from(steps) * Self::TARGET_ALT_STEP_FT;
        self.ownship.set_target_altitude_ft(target);
        log!("Target altitude set to {target:.0} ft");
    }

    /// Turns the own aircraft by `delta_deg`, wrapping into `[0, 360)`.
    pub fn bump_heading(&mut self, delta_deg: f64) {
        self.ownship.set_heading_deg(self.ownship.heading_deg() + delta_deg);
    }

    pub fn set_ap_mode(&mut self, mode: ApMode) {
        if mode != self.autopilot.mode() {
            log!("Autopilot mode {} -> {}", self.autopilot.mode(), mode);
            self.autopilot.set_mode(mode);
        }
    }

    pub fn set_tcas_mode(&mut self, mode: TcasMode) { self.unit.set_mode(mode); }

    /// Selects a traffic display range, see [`TrafficDisplay::select_range`].
    pub fn select_display_range(&mut self, range_nm: f64) -> bool { self.traffic_display.select_range(range_nm) }

    /// Advances the simulation by one tick.
    ///
    /// A zero or negative `dt` leaves the world untouched and repeats the previous output.
    ///
    /// # Arguments
    /// - `dt`: Real time since the previous tick, scaled by the time scale.
    ///
    /// # Returns
    /// - The advisories and display entries of this tick.
    pub fn tick(&mut self, dt: TimeDelta) -> TickOutput {
        let sim_dt = time_delta_from_secs(secs_f64(dt) * self.time_scale);
        if sim_dt <= TimeDelta::zero() {
            return self.last_output.clone();
        }
        self.clock += sim_dt;
        let now = self.clock;

        self.update_sensitivity();
        self.spawn(now);
        for ac in &mut self.intruders {
            ac.advance(sim_dt);
        }
        self.cull();

        let (ta, ra) = self.unit.surveil(now, &self.ownship, &self.intruders, &self.transponders);
        if let Some(alert) = AuralAlert::for_advisories(ta.as_ref(), ra.as_ref()) {
            self.banner.raise(alert, now);
        }
        self.autopilot.step(&mut self.ownship, ra.as_ref(), sim_dt);

        self.last_output = TickOutput { ta, ra, display_entries: display_entries(self.unit.tracks().values()) };
        self.last_output.clone()
    }

    fn update_sensitivity(&mut self) {
        let sl = SensitivityLevel::from_altitude_ft(self.ownship.altitude_ft());
        if self.unit.set_sl(sl) {
            self.protected_volume = AirspaceVolume::from_thresholds(sl, self.unit.thresholds());
        }
    }

    fn spawn(&mut self, now: DateTime<Utc>) {
        if self.intruders.len() >= self.max_intruders {
            return;
        }
        let Some((ac, xpdr)) = self.traffic.poll_spawn(now, &self.ownship) else {
            return;
        };
        if self.intruders.iter().any(|live| live.id() == ac.id()) {
            warn!("Dropped spawn of {}, callsign already in use", ac.id());
            return;
        }
        info!(
            "Spawned {} at {} ({:.1} nm), {:+.0} ft, {} fpm, squawk {} ({})",
            ac.id(),
            ac.pos(),
            ac.pos().abs(),
            ac.altitude_ft() - self.ownship.altitude_ft(),
            ac.vertical_rate_fpm(),
            xpdr.squawk(),
            xpdr.mode_s_address()
        );
        self.transponders.insert(ac.id().to_string(), xpdr);
        self.intruders.push(ac);
    }

    fn cull(&mut self) {
        let own_pos = self.ownship.pos();
        let (kept, culled): (Vec<_>, Vec<_>) = self
            .intruders
            .drain(..)
            .partition(|ac| own_pos.euclid_distance(&ac.pos()) < Self::CULL_RANGE_NM);
        self.intruders = kept;
        for ac in culled {
            log!("Culled {} at {:.1} nm", ac.id(), own_pos.euclid_distance(&ac.pos()));
            self.transponders.remove(ac.id());
        }
        self.unit.retain_roster(self.intruders.iter().map(AircraftState::id));
    }
}
