use super::autopilot::Autopilot;
use super::banner::Banner;
use super::{
    ApMode, AuralAlert, ConfigError, DisplayColor, DisplayEntry, RaDisplay, RandomTraffic, SimConfig, Simulator,
    SymbolType, ThreatLevel, TrafficDisplay, TrafficGenerator, VerticalTrend,
};
use crate::advisory::{RaKind, RaSense, ResolutionAdvisory, TrafficAdvisory};
use crate::aircraft::{AircraftState, Transponder, TransponderMode};
use crate::common::Vec2D;
use crate::sensitivity::SensitivityLevel;
use crate::tcas::TcasMode;
use crate::tracking::{Track, TrackState};
use chrono::{DateTime, TimeDelta, Utc};
use itertools::Itertools;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::{HashMap, VecDeque};

fn t0() -> DateTime<Utc> { DateTime::from_timestamp(1_700_000_000, 0).unwrap() }

/// Spawns a fixed list of intruders, each once its time has come.
struct ScriptedTraffic {
    queue: VecDeque<(DateTime<Utc>, AircraftState)>,
}

impl ScriptedTraffic {
    fn new(spawns: Vec<(DateTime<Utc>, AircraftState)>) -> Self { Self { queue: spawns.into() } }

    fn none() -> Self { Self::new(Vec::new()) }
}

impl TrafficGenerator for ScriptedTraffic {
    fn poll_spawn(&mut self, now: DateTime<Utc>, _: &AircraftState) -> Option<(AircraftState, Transponder)> {
        if self.queue.front().is_some_and(|(at, _)| *at <= now) {
            self.queue.pop_front().map(|(_, ac)| (ac, Transponder::mode_s_vfr(0xABCDEF)))
        } else {
            None
        }
    }
}

fn config(mode: TcasMode) -> SimConfig { SimConfig { time_scale: 1.0, tcas_mode: mode, ..SimConfig::default() } }

/// Head-on intruder 200 ft above, 3.9 nm out after two one-second ticks.
fn head_on_at_3_9() -> AircraftState {
    AircraftState::new("AC42", 12200.0, 0, 480.0, 180.0, Vec2D::new(0.0, 3.9 + 2.0 * 480.0 / 3600.0))
}

fn sim_with(mode: TcasMode, spawns: Vec<(DateTime<Utc>, AircraftState)>) -> Simulator<ScriptedTraffic> {
    Simulator::new(&config(mode), ScriptedTraffic::new(spawns), t0())
}

#[test]
fn test_zero_dt_is_a_no_op() {
    let mut sim = sim_with(TcasMode::TaRa, vec![(t0(), head_on_at_3_9())]);
    let out = sim.tick(TimeDelta::zero());
    assert!(out.ta.is_none() && out.ra.is_none() && out.display_entries.is_empty());
    assert_eq!(sim.clock(), t0());
    assert!(sim.intruders().is_empty());

    let first = sim.tick(TimeDelta::seconds(1));
    let positions = sim.intruders().iter().map(|ac| (ac.pos(), ac.altitude_ft())).collect_vec();
    let own_alt = sim.ownship().altitude_ft();
    for dt in [TimeDelta::zero(), TimeDelta::seconds(-1)] {
        let again = sim.tick(dt);
        assert_eq!(again.display_entries, first.display_entries);
        assert_eq!(sim.intruders().iter().map(|ac| (ac.pos(), ac.altitude_ft())).collect_vec(), positions);
        assert!((sim.ownship().altitude_ft() - own_alt).abs() < f64::EPSILON);
        assert_eq!(sim.clock(), t0() + TimeDelta::seconds(1));
    }
}

#[test]
fn test_clock_runs_scaled() {
    let mut sim = Simulator::new(&SimConfig::default(), ScriptedTraffic::none(), t0());
    sim.tick(TimeDelta::seconds(2));
    assert_eq!(sim.clock(), t0() + TimeDelta::seconds(3));
    assert!((sim.time_scale() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_head_on_scenario_issues_descend() {
    let mut sim = sim_with(TcasMode::TaRa, vec![(t0(), head_on_at_3_9())]);
    assert_eq!(sim.current_sl(), SensitivityLevel::SL6);
    sim.set_ap_mode(ApMode::RaFollow);

    let first = sim.tick(TimeDelta::seconds(1));
    assert!(first.ra.is_none());
    assert_eq!(sim.tracks()["AC42"].state, TrackState::Proximate);

    let out = sim.tick(TimeDelta::seconds(1));
    let ra = out.ra.unwrap();
    assert!(out.ta.is_some());
    assert_eq!(ra.kind(), RaKind::Descend);
    assert_eq!(ra.sense(), RaSense::Downward);
    assert_eq!(ra.required_vs_fpm(), -1500);
    assert_eq!(ra.issued_at(), sim.clock());
    assert_eq!(sim.banner(), "DESCEND, DESCEND");
    assert_eq!(sim.banner_alert(), Some(AuralAlert::Descend));
    assert_eq!(sim.commanded_vs_fpm(), -1500);
    assert_eq!(sim.ownship().vertical_rate_fpm(), -450);
    assert!((sim.ownship().altitude_ft() - 11992.5).abs() < 1e-6);

    let entry = &out.display_entries[0];
    assert_eq!(entry.id, "AC42");
    assert_eq!(entry.threat_level, ThreatLevel::ResolutionAdvisory);
    assert_eq!((entry.color, entry.symbol), (DisplayColor::Red, SymbolType::Square));
    assert_eq!(entry.altitude_tag(), "+02");
}

#[test]
fn test_head_on_scenario_ta_only() {
    let mut sim = sim_with(TcasMode::TaOnly, vec![(t0(), head_on_at_3_9())]);
    sim.tick(TimeDelta::seconds(1));
    let out = sim.tick(TimeDelta::seconds(1));
    assert!(out.ta.is_some());
    assert!(out.ra.is_none());
    assert_eq!(sim.banner(), "TRAFFIC, TRAFFIC");
    assert_eq!(out.display_entries[0].color, DisplayColor::Yellow);
}

#[test]
fn test_standby_mode_switch_clears_ra() {
    let mut sim = sim_with(TcasMode::TaRa, vec![(t0(), head_on_at_3_9())]);
    sim.tick(TimeDelta::seconds(1));
    assert!(sim.tick(TimeDelta::seconds(1)).ra.is_some());
    sim.set_tcas_mode(TcasMode::Standby);
    let out = sim.tick(TimeDelta::seconds(1));
    assert_eq!(sim.tcas_mode(), TcasMode::Standby);
    assert!(out.ta.is_some());
    assert!(out.ra.is_none());
    assert_eq!(out.display_entries.len(), 1);
}

#[test]
fn test_cull_drops_transponder_and_cache() {
    let leaving = AircraftState::new("AC77", 12000.0, 0, 360.0, 0.0, Vec2D::new(0.0, 15.85));
    let staying = AircraftState::new("AC78", 14000.0, 0, 200.0, 90.0, Vec2D::new(0.0, 10.0));
    let mut sim = sim_with(TcasMode::TaRa, vec![(t0(), leaving), (t0(), staying)]);
    sim.tick(TimeDelta::seconds(1));
    assert_eq!(sim.intruders().len(), 2);
    assert_eq!(sim.unit().cached_len(), 2);
    assert_eq!(sim.transponders().len(), 2);

    sim.tick(TimeDelta::seconds(1));
    assert_eq!(sim.intruders().iter().map(AircraftState::id).collect_vec(), vec!["AC78"]);
    assert!(!sim.transponders().contains_key("AC77"));
    assert!(!sim.tracks().contains_key("AC77"));
    assert_eq!(sim.tracks().len(), 1);
    assert_eq!(sim.unit().cached_len(), 1);
}

#[test]
fn test_spawn_collision_and_capacity() {
    let ac = |id: &str, north: f64| AircraftState::new(id, 15000.0, 0, 200.0, 90.0, Vec2D::new(0.0, north));
    let spawns = vec![(t0(), ac("AC11", 8.0)), (t0(), ac("AC11", 9.0)), (t0(), ac("AC12", 10.0)), (t0(), ac("AC13", 11.0))];
    let mut sim = Simulator::new(
        &SimConfig { time_scale: 1.0, max_intruders: 2, ..SimConfig::default() },
        ScriptedTraffic::new(spawns),
        t0(),
    );
    for _ in 0..4 {
        sim.tick(TimeDelta::seconds(1));
    }
    let ids = sim.intruders().iter().map(AircraftState::id).sorted().collect_vec();
    assert_eq!(ids, vec!["AC11", "AC12"]);
    assert!((sim.intruders()[0].pos().y() - 8.0).abs() < 1e-9);
}

#[test]
fn test_climb_through_sl_boundary_refreshes_volume() {
    let mut sim = sim_with(TcasMode::TaRa, Vec::new());
    sim.bump_target_altitude(85);
    assert!((sim.ownship().target_altitude_ft() - 20500.0).abs() < f64::EPSILON);
    for _ in 0..400 {
        sim.tick(TimeDelta::seconds(1));
        if sim.current_sl() == SensitivityLevel::SL7 {
            break;
        }
    }
    assert_eq!(sim.current_sl(), SensitivityLevel::SL7);
    assert!(sim.ownship().altitude_ft() >= 20000.0);
    assert_eq!(sim.protected_volume().sl(), SensitivityLevel::SL7);
    assert_eq!(sim.protected_volume().uses_thresholds().sl(), SensitivityLevel::SL7);
    assert_eq!(sim.unit().thresholds().sl(), SensitivityLevel::SL7);
}

#[test]
fn test_operator_controls() {
    let mut sim = sim_with(TcasMode::TaRa, Vec::new());
    sim.bump_heading(-5.0);
    assert!((sim.ownship().heading_deg() - 355.0).abs() < 1e-9);
    sim.bump_heading(10.0);
    assert!((sim.ownship().heading_deg() - 5.0).abs() < 1e-9);
    assert_eq!(sim.ap_mode(), ApMode::AltitudeHold);
    sim.set_ap_mode(ApMode::RaFollow);
    assert_eq!(sim.ap_mode(), ApMode::RaFollow);
    assert!((sim.traffic_display().selected_range_nm() - 5.0).abs() < f64::EPSILON);
    assert!(sim.select_display_range(10.0));
    assert!(!sim.select_display_range(7.0));
    assert!((sim.traffic_display().selected_range_nm() - 10.0).abs() < f64::EPSILON);
    assert_eq!(sim.ra_display().scale_max_vs_fpm(), 3000);
}

#[test]
fn test_autopilot_altitude_hold() {
    let mut own = AircraftState::new("OWN", 12000.0, 0, 250.0, 0.0, Vec2D::zero());
    own.set_target_altitude_ft(20000.0);
    let mut ap = Autopilot::new(ApMode::RaFollow);
    let mut rates = Vec::new();
    for _ in 0..8 {
        ap.step(&mut own, None, TimeDelta::seconds(1));
        rates.push(own.vertical_rate_fpm());
    }
    assert_eq!(ap.commanded_vs_fpm(), 3000);
    assert_eq!(rates, vec![450, 900, 1350, 1800, 2250, 2700, 3000, 3000]);
    assert!(own.altitude_ft() > 12000.0);
}

#[test]
fn test_autopilot_follows_level_off() {
    let mut own = AircraftState::new("OWN", 12000.0, -1500, 250.0, 0.0, Vec2D::zero());
    let level = ResolutionAdvisory::corrective(t0(), RaKind::Descend, RaSense::Downward, -1500, 400.0).weakened(400.0);
    let mut ap = Autopilot::new(ApMode::RaFollow);
    ap.step(&mut own, Some(&level), TimeDelta::seconds(1));
    assert_eq!(ap.commanded_vs_fpm(), 0);
    assert_eq!(own.vertical_rate_fpm(), -1050);

    // altitude hold ignores the RA
    let mut hold = Autopilot::new(ApMode::AltitudeHold);
    let mut level_own = AircraftState::new("OWN", 12000.0, 0, 250.0, 0.0, Vec2D::zero());
    let climb = ResolutionAdvisory::corrective(t0(), RaKind::Climb, RaSense::Upward, 2500, 400.0);
    hold.step(&mut level_own, Some(&climb), TimeDelta::seconds(1));
    assert_eq!(hold.commanded_vs_fpm(), 0);
    assert_eq!(level_own.vertical_rate_fpm(), 0);
}

#[test]
fn test_banner_window_and_overwrite() {
    let mut banner = Banner::default();
    assert_eq!(banner.text(t0()), "");
    banner.raise(AuralAlert::Traffic, t0());
    assert_eq!(banner.text(t0() + TimeDelta::seconds(4)), "TRAFFIC, TRAFFIC");
    assert_eq!(banner.text(t0() + TimeDelta::seconds(4) + TimeDelta::nanoseconds(1)), "");
    banner.raise(AuralAlert::Climb, t0() + TimeDelta::seconds(1));
    assert_eq!(banner.text(t0() + TimeDelta::seconds(6)), "CLIMB, CLIMB");
    assert_eq!(AuralAlert::LevelOff.to_string(), "LEVEL OFF, LEVEL OFF");
}

#[test]
fn test_alert_selection() {
    let ta = TrafficAdvisory::new(t0());
    let climb = ResolutionAdvisory::corrective(t0(), RaKind::Climb, RaSense::Upward, 1500, 400.0);
    assert_eq!(AuralAlert::for_advisories(None, None), None);
    assert_eq!(AuralAlert::for_advisories(Some(&ta), None), Some(AuralAlert::Traffic));
    assert_eq!(AuralAlert::for_advisories(Some(&ta), Some(&climb)), Some(AuralAlert::Climb));
    assert_eq!(AuralAlert::for_advisories(None, Some(&climb.weakened(400.0))), Some(AuralAlert::LevelOff));
}

fn track(id: &str, state: TrackState, rel_alt_ft: f64, vs_fpm: i32) -> Track {
    Track {
        intruder_id: id.to_string(),
        intruder_altitude_ft: 12000.0 + rel_alt_ft,
        intruder_vertical_rate_fpm: vs_fpm,
        bearing_deg: 45.0,
        range_nm: 4.0,
        relative_altitude_ft: rel_alt_ft,
        range_rate_kt: 0.0,
        closure_rate_kt: 0.0,
        vertical_closure_fpm: 0,
        range_tau_s: f64::INFINITY,
        vertical_tau_s: f64::INFINITY,
        altitude_reporting: true,
        state,
        time_to_conflict_s: Track::NO_CONFLICT_S,
        last_update: t0(),
    }
}

#[test]
fn test_display_entry_attributes() {
    let other = DisplayEntry::from_track(&track("AC30", TrackState::Other, -1100.0, -900));
    assert_eq!((other.color, other.symbol, other.filled), (DisplayColor::White, SymbolType::Diamond, false));
    assert_eq!(other.vertical_trend, VerticalTrend::Descending);
    assert_eq!(other.threat_level, ThreatLevel::NonThreat);
    assert_eq!(other.altitude_tag(), "-11");

    let prox = DisplayEntry::from_track(&track("AC31", TrackState::Proximate, 40.0, 500));
    assert_eq!((prox.color, prox.symbol, prox.filled), (DisplayColor::Cyan, SymbolType::Diamond, true));
    assert_eq!(prox.vertical_trend, VerticalTrend::Level);
    assert_eq!(prox.altitude_tag(), "+00");

    let ta = DisplayEntry::from_track(&track("AC32", TrackState::IntruderTa, 300.0, 501));
    assert_eq!((ta.color, ta.symbol), (DisplayColor::Yellow, SymbolType::Circle));
    assert_eq!(ta.vertical_trend, VerticalTrend::Climbing);
}

#[test]
fn test_display_entries_sorted_by_id() {
    let tracks: HashMap<String, Track> = ["AC55", "AC12", "AC31"]
        .into_iter()
        .map(|id| (id.to_string(), track(id, TrackState::Other, 0.0, 0)))
        .collect();
    let entries = super::display::display_entries(tracks.values());
    assert_eq!(entries.iter().map(|e| e.id.as_str()).collect_vec(), vec!["AC12", "AC31", "AC55"]);
}

#[test]
fn test_display_scales() {
    let mut scope = TrafficDisplay::default();
    assert!(scope.in_range(5.0));
    assert!(!scope.in_range(5.1));
    assert!(scope.select_range(3.0));
    assert!(!scope.in_range(4.0));
    let vsi = RaDisplay::default();
    assert!((vsi.deflection(1500) - 0.5).abs() < 1e-9);
    assert!((vsi.deflection(-4500) + 1.0).abs() < 1e-9);
}

/// Polls `traffic` every 100 ms of sim time for `secs` seconds.
fn poll_for(traffic: &mut impl TrafficGenerator, secs: i64) -> Vec<(DateTime<Utc>, AircraftState, Transponder)> {
    let own = AircraftState::new("OWN", 12000.0, 0, 250.0, 0.0, Vec2D::zero());
    (0..=secs * 10)
        .map(|i| t0() + TimeDelta::milliseconds(100 * i))
        .filter_map(|now| traffic.poll_spawn(now, &own).map(|(ac, xpdr)| (now, ac, xpdr)))
        .collect()
}

#[test]
fn test_seeded_traffic_is_reproducible() {
    let a = poll_for(&mut RandomTraffic::new(StdRng::seed_from_u64(7), 0.3), 60);
    let b = poll_for(&mut RandomTraffic::new(StdRng::seed_from_u64(7), 0.3), 60);
    assert!(!a.is_empty());
    assert_eq!(a.len(), b.len());
    for ((ta, aa, xa), (tb, ab, xb)) in a.iter().zip(&b) {
        assert_eq!(ta, tb);
        assert_eq!(aa, ab);
        assert_eq!(xa, xb);
    }
}

#[test]
fn test_spawn_pacing() {
    let spawns = poll_for(&mut RandomTraffic::new(StdRng::seed_from_u64(11), 0.3), 120);
    assert!(spawns.len() >= 30);
    for ((prev, ..), (next, ..)) in spawns.iter().tuple_windows() {
        let gap = *next - *prev;
        assert!(gap > TimeDelta::milliseconds(1600), "{gap}");
        assert!(gap <= TimeDelta::milliseconds(3300), "{gap}");
    }
}

#[test]
fn test_threat_spawn_geometry() {
    for (_, ac, xpdr) in poll_for(&mut RandomTraffic::new(StdRng::seed_from_u64(3), 1.0), 120) {
        let range = ac.pos().abs();
        assert!((0.8..=2.2).contains(&range), "{range}");
        let rel_alt = ac.altitude_ft() - 12000.0;
        assert!(rel_alt.abs() <= 500.0);
        assert!([500, 1000, 1500].contains(&ac.vertical_rate_fpm().abs()));
        if rel_alt > 0.0 {
            assert!(ac.vertical_rate_fpm() < 0);
        } else {
            assert!(ac.vertical_rate_fpm() > 0);
        }
        assert!((280.0..=520.0).contains(&ac.ground_speed_kt()));
        let to_own = ac.pos().to(&Vec2D::zero()).compass_bearing();
        let off = (ac.heading_deg() - to_own).abs();
        assert!(off < 1e-6 || (off - 360.0).abs() < 1e-6);
        assert_eq!(xpdr.mode(), TransponderMode::ModeS);
        assert_eq!(xpdr.squawk(), "1200");
        assert!(xpdr.altitude_reporting());
        assert_eq!(xpdr.mode_s_address().len(), 6);
        let num: u32 = ac.id().strip_prefix("AC").unwrap().parse().unwrap();
        assert!((10..=99).contains(&num));
    }
}

#[test]
fn test_background_spawn_geometry() {
    for (_, ac, _) in poll_for(&mut RandomTraffic::new(StdRng::seed_from_u64(5), 0.0), 120) {
        assert!((2.0..=12.0).contains(&ac.pos().abs()));
        assert!((ac.altitude_ft() - 12000.0).abs() <= 3000.0);
        assert_eq!(ac.vertical_rate_fpm() % 500, 0);
        assert!(ac.vertical_rate_fpm().abs() <= 2000);
        assert!((180.0..=480.0).contains(&ac.ground_speed_kt()));
        let polar_deg = ac.pos().y().atan2(ac.pos().x()).to_degrees();
        let off = (ac.heading_deg() - (polar_deg + 180.0).rem_euclid(360.0)).abs();
        assert!(off < 1e-6 || (off - 360.0).abs() < 1e-6);
    }
}

fn env(pairs: &[(&str, &str)]) -> Result<SimConfig, ConfigError> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    SimConfig::from_lookup(move |key| map.get(key).cloned())
}

#[test]
fn test_config_from_lookup() {
    assert_eq!(env(&[]).unwrap(), SimConfig::default());

    let cfg = env(&[("TCAS_MODE", "ta_only"), ("TCAS_AP_MODE", "RA"), ("TCAS_SEED", "42"), ("TCAS_TICK_MS", "50")])
        .unwrap();
    assert_eq!(cfg.tcas_mode, TcasMode::TaOnly);
    assert_eq!(cfg.ap_mode, ApMode::RaFollow);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.tick.as_millis(), 50);

    assert_eq!(
        env(&[("TCAS_TIME_SCALE", "fast")]),
        Err(ConfigError::Unparseable("TCAS_TIME_SCALE", "fast".to_string()))
    );
    assert_eq!(
        env(&[("TCAS_THREAT_PROB", "1.5")]),
        Err(ConfigError::OutOfRange("TCAS_THREAT_PROB", "1.5".to_string()))
    );
    assert!(env(&[("TCAS_MODE", "off")]).is_err());
    assert!(env(&[("TCAS_TICK_MS", "0")]).is_err());
}
