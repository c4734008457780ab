use chrono::TimeDelta;
use num::ToPrimitive;

/// Smallest closure rate (kt) treated as actually closing.
pub const CLOSURE_EPS_KT: f64 = 1e-6;
/// Seconds per hour, converts nm / kt into seconds.
pub const SECS_PER_HOUR: f64 = 3600.0;
/// Seconds per minute, converts ft / fpm into seconds.
pub const SECS_PER_MIN: f64 = 60.0;

/// Converts a floating point vertical rate into whole feet per minute.
///
/// The value is clamped into the `i32` range before conversion, `NaN` maps to zero.
///
/// # Arguments
/// - `rate`: Vertical rate in feet per minute.
///
/// # Returns
/// - The truncated rate as `i32`.
pub fn clamped_fpm(rate: f64) -> i32 {
    if rate.is_nan() {
        return 0;
    }
    rate.clamp(f64::from(i32::MIN), f64::from(i32::MAX)).trunc().to_i32().unwrap_or(0)
}

/// Floors a time estimate into whole seconds, or returns `sentinel` when it is not finite.
pub fn floor_secs_or(secs: f64, sentinel: u32) -> u32 {
    if secs.is_finite() {
        secs.max(0.0).floor().to_u32().unwrap_or(sentinel)
    } else {
        sentinel
    }
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f64) -> f64 { deg.rem_euclid(360.0) }

/// Moves `current` towards `target` by at most `max_step`.
pub fn step_towards(current: i32, target: i32, max_step: i32) -> i32 {
    let delta = target.saturating_sub(current).clamp(-max_step, max_step);
    current.saturating_add(delta)
}

/// Converts a `TimeDelta` into fractional seconds with nanosecond resolution.
#[allow(clippy::cast_precision_loss)]
pub fn secs_f64(dt: TimeDelta) -> f64 {
    dt.num_seconds() as f64 + f64::from(dt.subsec_nanos()) / 1e9
}

/// Converts fractional seconds into a `TimeDelta`, rounded to whole nanoseconds.
#[allow(clippy::cast_possible_truncation)]
pub fn time_delta_from_secs(secs: f64) -> TimeDelta {
    TimeDelta::nanoseconds((secs * 1e9).round() as i64)
}
