use crate::common::math::{CLOSURE_EPS_KT, SECS_PER_HOUR, SECS_PER_MIN};

/// Range tau in seconds, infinite unless the contact is closing.
pub fn range_tau_s(range_nm: f64, closure_kt: f64) -> f64 {
    if closure_kt > CLOSURE_EPS_KT { range_nm / closure_kt * SECS_PER_HOUR } else { f64::INFINITY }
}

/// Vertical tau in seconds, infinite without vertical closure.
pub fn vertical_tau_s(rel_alt_ft: f64, vertical_closure_fpm: i32) -> f64 {
    if vertical_closure_fpm > 0 {
        rel_alt_ft.abs() / f64::from(vertical_closure_fpm) * SECS_PER_MIN
    } else {
        f64::INFINITY
    }
}

/// Horizontal modified-tau test.
///
/// Fires inside the DMOD floor regardless of closure, otherwise when range tau is within
/// the limit. Without closure only the floor can fire.
pub fn modified_tau_trigger(range_nm: f64, closure_kt: f64, tau_limit_s: u32, dmod_nm: f64) -> bool {
    if range_nm <= dmod_nm {
        return true;
    }
    range_tau_s(range_nm, closure_kt) <= f64::from(tau_limit_s)
}

/// Vertical counterpart of [`modified_tau_trigger`] using the ZTHR floor.
pub fn vertical_trigger(rel_alt_ft: f64, vertical_closure_fpm: i32, tau_limit_s: u32, zthr_ft: f64) -> bool {
    if rel_alt_ft.abs() <= zthr_ft {
        return true;
    }
    vertical_tau_s(rel_alt_ft, vertical_closure_fpm) <= f64::from(tau_limit_s)
}

/// Closing speed on the vertical axis.
///
/// The rate difference is taken as `own - intruder` against a relative altitude of
/// `intruder - own`. Closure is counted only when the two have opposite signs, otherwise
/// it is zero.
pub fn vertical_closure_fpm(rel_alt_ft: f64, own_vs_fpm: i32, intruder_vs_fpm: i32) -> i32 {
    let delta = own_vs_fpm.saturating_sub(intruder_vs_fpm);
    if rel_alt_ft * f64::from(delta) < 0.0 { delta.saturating_abs() } else { 0 }
}
