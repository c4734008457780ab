#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod advisory;
mod aircraft;
mod common;
mod logger;
mod sensitivity;
mod sim;
mod tcas;
mod tracking;
mod zones;

use crate::sim::{RandomTraffic, SimConfig, Simulator, ThreatLevel, TickOutput, TrafficGenerator};
use chrono::{TimeDelta, Utc};
use rand::{SeedableRng, rngs::StdRng};
use tokio::time::{self, Instant, MissedTickBehavior};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match SimConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => fatal!("Invalid configuration: {e:?}"),
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "Starting TCAS simulation: mode {}, AP {}, time scale {}x, {} intruders max, seed {seed}",
        config.tcas_mode, config.ap_mode, config.time_scale, config.max_intruders
    );

    let traffic = RandomTraffic::new(StdRng::seed_from_u64(seed), config.threat_prob);
    let mut sim = Simulator::new(&config, traffic, Utc::now());
    let sim_start = sim.clock();

    let mut interval = time::interval(config.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let started = Instant::now();
    let mut last = started;
    let mut banner = "";
    let mut ticks = 0u64;
    let mut ra_ticks = 0u64;

    while started.elapsed() < config.run_for {
        interval.tick().await;
        let now = Instant::now();
        let dt = TimeDelta::from_std(now - last).unwrap_or(TimeDelta::zero());
        last = now;

        let out = sim.tick(dt);
        ticks += 1;
        if out.ra.is_some() {
            ra_ticks += 1;
        }
        if sim.banner() != banner {
            banner = sim.banner();
            if !banner.is_empty() {
                advisory!("\"{banner}\"");
            }
        }
        report(&sim, &out, ticks);
    }
    info!(
        "Simulation finished after {ticks} ticks, {} sim seconds, RA active in {ra_ticks} ticks",
        (sim.clock() - sim_start).num_seconds()
    );
}

/// Prints a status line roughly once per second of real time.
fn report<G: TrafficGenerator>(sim: &Simulator<G>, out: &TickOutput, ticks: u64) {
    if ticks % 30 != 0 {
        return;
    }
    let own = sim.ownship();
    let zone = out
        .display_entries
        .iter()
        .filter_map(|e| sim.tracks().get(&e.id))
        .map(|t| t.time_to_conflict_s)
        .min()
        .and_then(|ttc| sim.protected_volume().innermost_zone_for(ttc));
    log!(
        "{} ALT {:.0} ft VS {:+} fpm (cmd {:+}) HDG {:03.0} | {} contacts, {} in {} nm | zone {}",
        sim.current_sl(),
        own.altitude_ft(),
        own.vertical_rate_fpm(),
        sim.commanded_vs_fpm(),
        own.heading_deg(),
        out.display_entries.len(),
        out.display_entries.iter().filter(|e| sim.traffic_display().in_range(e.range_nm)).count(),
        sim.traffic_display().selected_range_nm(),
        zone.map_or_else(|| "-".to_string(), |z| z.to_string())
    );
    for entry in out.display_entries.iter().filter(|e| e.threat_level >= ThreatLevel::TrafficAdvisory) {
        event!(
            "{} {} brg {:03.0} rng {:.2} nm {} {}",
            entry.id,
            entry.threat_level,
            entry.bearing_deg,
            entry.range_nm,
            entry.altitude_tag(),
            entry.vertical_trend
        );
    }
}
