use super::sensitivity_level::SensitivityLevel;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Resolution advisory part of a threshold bundle.
///
/// Either the whole bundle is present for a level or none of it is, so it lives in a
/// single `Option` on [`SensitivityThresholds`].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RaThresholds {
    /// Range tau limit in seconds.
    tau_s: u32,
    /// Range floor (DMOD) in nautical miles.
    dmod_nm: f64,
    /// Altitude floor (ZTHR) in feet.
    zthr_ft: f64,
    /// Target vertical separation at closest approach in feet.
    alim_ft: f64,
}

impl RaThresholds {
    pub const fn new(tau_s: u32, dmod_nm: f64, zthr_ft: f64, alim_ft: f64) -> Self {
        Self { tau_s, dmod_nm, zthr_ft, alim_ft }
    }

    pub fn tau_s(&self) -> u32 { self.tau_s }
    pub fn dmod_nm(&self) -> f64 { self.dmod_nm }
    pub fn zthr_ft(&self) -> f64 { self.zthr_ft }
    pub fn alim_ft(&self) -> f64 { self.alim_ft }
}

/// Threshold bundle of a single sensitivity level.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SensitivityThresholds {
    sl: SensitivityLevel,
    ta_tau_s: u32,
    ta_dmod_nm: f64,
    ta_zthr_ft: f64,
    ra: Option<RaThresholds>,
}

impl SensitivityThresholds {
    pub const fn new(
        sl: SensitivityLevel,
        ta_tau_s: u32,
        ta_dmod_nm: f64,
        ta_zthr_ft: f64,
        ra: Option<RaThresholds>,
    ) -> Self {
        Self { sl, ta_tau_s, ta_dmod_nm, ta_zthr_ft, ra }
    }

    pub fn sl(&self) -> SensitivityLevel { self.sl }
    pub fn ta_tau_s(&self) -> u32 { self.ta_tau_s }
    pub fn ta_dmod_nm(&self) -> f64 { self.ta_dmod_nm }
    pub fn ta_zthr_ft(&self) -> f64 { self.ta_zthr_ft }

    /// RA thresholds, `None` means RAs are inhibited at this level.
    pub fn ra(&self) -> Option<&RaThresholds> { self.ra.as_ref() }

    /// ALIM of this level, if RAs are enabled.
    pub fn alim_ft(&self) -> Option<f64> { self.ra.map(|ra| ra.alim_ft) }
}

static V71_THRESHOLDS: LazyLock<HashMap<SensitivityLevel, SensitivityThresholds>> =
    LazyLock::new(|| {
        use SensitivityLevel::{SL2, SL3, SL4, SL5, SL6, SL7};
        let table = [
            // SL2 inhibits RAs entirely
            SensitivityThresholds::new(SL2, 20, 0.30, 850.0, None),
            SensitivityThresholds::new(SL3, 25, 0.33, 850.0, Some(RaThresholds::new(15, 0.20, 600.0, 300.0))),
            SensitivityThresholds::new(SL4, 30, 0.48, 850.0, Some(RaThresholds::new(20, 0.35, 600.0, 300.0))),
            SensitivityThresholds::new(SL5, 40, 0.75, 850.0, Some(RaThresholds::new(25, 0.55, 600.0, 350.0))),
            SensitivityThresholds::new(SL6, 45, 1.00, 850.0, Some(RaThresholds::new(30, 0.80, 600.0, 400.0))),
            SensitivityThresholds::new(SL7, 48, 1.30, 850.0, Some(RaThresholds::new(35, 1.10, 700.0, 600.0))),
        ];
        table.into_iter().map(|th| (th.sl(), th)).collect()
    });

/// Lookup table from sensitivity level to its threshold bundle.
#[derive(Debug, Clone)]
pub struct SensitivityProfile {
    thresholds: HashMap<SensitivityLevel, SensitivityThresholds>,
}

impl SensitivityProfile {
    /// The threshold table of logic version 7.1.
    pub fn default_v71() -> Self { Self { thresholds: V71_THRESHOLDS.clone() } }

    /// Returns the bundle for `sl`.
    ///
    /// # Panics
    /// Every profile covers all levels, a missing entry is a construction bug.
    pub fn thresholds(&self, sl: SensitivityLevel) -> SensitivityThresholds { self.thresholds[&sl] }
}

impl Default for SensitivityProfile {
    fn default() -> Self { Self::default_v71() }
}
