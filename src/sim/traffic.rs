use crate::aircraft::{AircraftState, Transponder};
use crate::common::{
    Vec2D,
    math::{secs_f64, wrap_degrees},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

/// Source of new intruders, polled once per tick while the roster has room.
pub trait TrafficGenerator {
    /// Returns the intruder to spawn at `now`, if any.
    ///
    /// # Arguments
    /// - `now`: Current sim time.
    /// - `ownship`: The own aircraft, spawn geometry is relative to it.
    fn poll_spawn(&mut self, now: DateTime<Utc>, ownship: &AircraftState) -> Option<(AircraftState, Transponder)>;
}

/// Random intruders at a random pace, a share of them set up as threats.
///
/// Threats start close, head straight at the own aircraft and converge vertically.
/// Background traffic starts further out and flies through the area on an arbitrary
/// course.
#[derive(Debug)]
pub struct RandomTraffic<R: Rng> {
    rng: R,
    threat_prob: f64,
    last_spawn: Option<DateTime<Utc>>,
    next_interval_s: f64,
}

impl<R: Rng> RandomTraffic<R> {
    const SPAWN_INTERVAL_S: RangeInclusive<f64> = 1.6..=3.2;

    const THREAT_RANGE_NM: RangeInclusive<f64> = 0.8..=2.2;
    const THREAT_ALT_OFFSET_FT: RangeInclusive<i32> = -500..=500;
    const THREAT_GS_KT: RangeInclusive<f64> = 280.0..=520.0;

    const BACKGROUND_RANGE_NM: RangeInclusive<f64> = 2.0..=12.0;
    const BACKGROUND_ALT_OFFSET_FT: RangeInclusive<i32> = -3000..=3000;
    const BACKGROUND_GS_KT: RangeInclusive<f64> = 180.0..=480.0;

    const VS_STEP_FPM: i32 = 500;
    const MODE_S_ADDRESS_SPACE: u32 = 1 << 24;

    pub fn new(mut rng: R, threat_prob: f64) -> Self {
        let next_interval_s = rng.random_range(Self::SPAWN_INTERVAL_S);
        Self { rng, threat_prob: threat_prob.clamp(0.0, 1.0), last_spawn: None, next_interval_s }
    }

    fn threat(&mut self, own: &AircraftState) -> (Vec2D<f64>, f64, i32, f64) {
        let pos = Vec2D::from_polar(
            self.rng.random_range(0.0..TAU),
            self.rng.random_range(Self::THREAT_RANGE_NM),
        );
        let heading_deg = pos.to(&own.pos()).compass_bearing();
        let altitude_ft = own.altitude_ft() + f64::from(self.rng.random_range(Self::THREAT_ALT_OFFSET_FT));
        let steps = self.rng.random_range(1..=3);
        let sign = if altitude_ft > own.altitude_ft() { -1 } else { 1 };
        let vs_fpm = sign * steps * Self::VS_STEP_FPM;
        (pos, altitude_ft, vs_fpm, heading_deg)
    }

    fn background(&mut self, own: &AircraftState) -> (Vec2D<f64>, f64, i32, f64) {
        let theta = self.rng.random_range(0.0..TAU);
        let pos = Vec2D::from_polar(theta, self.rng.random_range(Self::BACKGROUND_RANGE_NM));
        let heading_deg = wrap_degrees(theta.to_degrees() + 180.0);
        let altitude_ft = own.altitude_ft() + f64::from(self.rng.random_range(Self::BACKGROUND_ALT_OFFSET_FT));
        let vs_fpm = self.rng.random_range(-4..=4) * Self::VS_STEP_FPM;
        (pos, altitude_ft, vs_fpm, heading_deg)
    }
}

impl<R: Rng> TrafficGenerator for RandomTraffic<R> {
    fn poll_spawn(&mut self, now: DateTime<Utc>, ownship: &AircraftState) -> Option<(AircraftState, Transponder)> {
        let last = *self.last_spawn.get_or_insert(now);
        if secs_f64(now - last) <= self.next_interval_s {
            return None;
        }
        self.last_spawn = Some(now);
        self.next_interval_s = self.rng.random_range(Self::SPAWN_INTERVAL_S);

        let is_threat = self.rng.random_bool(self.threat_prob);
        let (pos, altitude_ft, vs_fpm, heading_deg) =
            if is_threat { self.threat(ownship) } else { self.background(ownship) };
        let gs_kt = self.rng.random_range(if is_threat { Self::THREAT_GS_KT } else { Self::BACKGROUND_GS_KT });

        let callsign = format!("AC{}", self.rng.random_range(10..=99));
        let xpdr = Transponder::mode_s_vfr(self.rng.random_range(0..Self::MODE_S_ADDRESS_SPACE));
        let ac = AircraftState::new(callsign, altitude_ft, vs_fpm, gs_kt, heading_deg, pos);
        Some((ac, xpdr))
    }
}
