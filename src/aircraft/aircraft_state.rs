use crate::common::{
    Vec2D,
    math::{SECS_PER_HOUR, SECS_PER_MIN, secs_f64, wrap_degrees},
};
use chrono::TimeDelta;

/// Kinematic state of a single aircraft, own or intruder.
///
/// Plain mutable record: the simulator integrates it every tick, the tracker only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    /// Callsign, unique among the live intruders.
    id: String,
    /// Pressure altitude in feet.
    altitude_ft: f64,
    /// Vertical rate in feet per minute, positive when climbing.
    vertical_rate_fpm: i32,
    /// Ground speed in knots.
    ground_speed_kt: f64,
    /// Compass heading in degrees.
    heading_deg: f64,
    /// Planar position in nautical miles, own aircraft sits at the origin.
    pos: Vec2D<f64>,
    /// Autopilot altitude setpoint in feet.
    target_altitude_ft: f64,
}

impl AircraftState {
    pub fn new(
        id: impl Into<String>,
        altitude_ft: f64,
        vertical_rate_fpm: i32,
        ground_speed_kt: f64,
        heading_deg: f64,
        pos: Vec2D<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            altitude_ft,
            vertical_rate_fpm,
            ground_speed_kt,
            heading_deg: wrap_degrees(heading_deg),
            pos,
            target_altitude_ft: altitude_ft,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn altitude_ft(&self) -> f64 { self.altitude_ft }
    pub fn vertical_rate_fpm(&self) -> i32 { self.vertical_rate_fpm }
    pub fn ground_speed_kt(&self) -> f64 { self.ground_speed_kt }
    pub fn heading_deg(&self) -> f64 { self.heading_deg }
    pub fn pos(&self) -> Vec2D<f64> { self.pos }
    pub fn target_altitude_ft(&self) -> f64 { self.target_altitude_ft }

    pub fn set_vertical_rate_fpm(&mut self, rate: i32) { self.vertical_rate_fpm = rate; }
    pub fn set_heading_deg(&mut self, heading_deg: f64) { self.heading_deg = wrap_degrees(heading_deg); }
    pub fn set_target_altitude_ft(&mut self, target: f64) { self.target_altitude_ft = target; }

    /// Integrates the planar position along the current heading over `dt`.
    pub fn advance_position(&mut self, dt: TimeDelta) {
        let dist_nm = self.ground_speed_kt / SECS_PER_HOUR * secs_f64(dt);
        self.pos = self.pos + Vec2D::from_heading(self.heading_deg, dist_nm);
    }

    /// Integrates the altitude from the current vertical rate over `dt`.
    pub fn advance_altitude(&mut self, dt: TimeDelta) {
        self.altitude_ft += f64::from(self.vertical_rate_fpm) * secs_f64(dt) / SECS_PER_MIN;
    }

    /// Integrates both the planar position and the altitude over `dt`.
    pub fn advance(&mut self, dt: TimeDelta) {
        self.advance_position(dt);
        self.advance_altitude(dt);
    }
}
