use chrono::{DateTime, Utc};
use strum_macros::Display;

/// Lifecycle of an advisory.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum AdvisoryState {
    Pending,
    Active,
    Weakened,
    Strengthened,
    Reversed,
    Terminated,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum RaSense {
    Upward,
    Downward,
    None,
}

impl RaSense {
    /// Sign applied to a strength to get the commanded vertical rate.
    pub fn sign(self) -> i32 {
        match self {
            RaSense::Upward => 1,
            RaSense::Downward => -1,
            RaSense::None => 0,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum RaKind {
    Climb,
    Descend,
    LevelOff,
    DoNotClimb,
    DoNotDescend,
    IncreaseClimb,
    IncreaseDescend,
    MaintainVerticalSpeed,
    CrossingClimb,
    CrossingDescend,
    CrossingMaintain,
}

/// Traffic advisory, an alert without guidance.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TrafficAdvisory {
    issued_at: DateTime<Utc>,
    state: AdvisoryState,
}

impl TrafficAdvisory {
    pub fn new(issued_at: DateTime<Utc>) -> Self { Self { issued_at, state: AdvisoryState::Active } }

    pub fn issued_at(&self) -> DateTime<Utc> { self.issued_at }
    pub fn state(&self) -> AdvisoryState { self.state }
}

/// Resolution advisory with its vertical guidance.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ResolutionAdvisory {
    issued_at: DateTime<Utc>,
    state: AdvisoryState,
    kind: RaKind,
    sense: RaSense,
    required_vs_fpm: i32,
    /// Allowed vertical rate band `(min, max)` in fpm.
    band_fpm: (i32, i32),
    alim_ft: f64,
}

impl ResolutionAdvisory {
    /// Half width of the green arc around the required rate.
    pub const BAND_HALF_WIDTH_FPM: i32 = 250;

    /// Fresh corrective advisory towards `required_vs_fpm`.
    pub fn corrective(
        issued_at: DateTime<Utc>,
        kind: RaKind,
        sense: RaSense,
        required_vs_fpm: i32,
        alim_ft: f64,
    ) -> Self {
        Self {
            issued_at,
            state: AdvisoryState::Active,
            kind,
            sense,
            required_vs_fpm,
            band_fpm: Self::guidance_band(kind, required_vs_fpm),
            alim_ft,
        }
    }

    /// Replaces `self` by a level-off, keeping the original issue time.
    pub fn weakened(&self, alim_ft: f64) -> Self {
        Self {
            issued_at: self.issued_at,
            state: AdvisoryState::Weakened,
            kind: RaKind::LevelOff,
            sense: RaSense::None,
            required_vs_fpm: 0,
            band_fpm: Self::guidance_band(RaKind::LevelOff, 0),
            alim_ft,
        }
    }

    fn guidance_band(kind: RaKind, required_vs_fpm: i32) -> (i32, i32) {
        let center = if kind == RaKind::LevelOff { 0 } else { required_vs_fpm };
        (
            center.saturating_sub(Self::BAND_HALF_WIDTH_FPM),
            center.saturating_add(Self::BAND_HALF_WIDTH_FPM),
        )
    }

    pub fn issued_at(&self) -> DateTime<Utc> { self.issued_at }
    pub fn state(&self) -> AdvisoryState { self.state }
    pub fn kind(&self) -> RaKind { self.kind }
    pub fn sense(&self) -> RaSense { self.sense }
    pub fn required_vs_fpm(&self) -> i32 { self.required_vs_fpm }
    pub fn min_allowed_vs_fpm(&self) -> i32 { self.band_fpm.0 }
    pub fn max_allowed_vs_fpm(&self) -> i32 { self.band_fpm.1 }
    pub fn alim_ft(&self) -> f64 { self.alim_ft }

    /// Whether `vs_fpm` lies inside the allowed band.
    pub fn complies(&self, vs_fpm: i32) -> bool { (self.band_fpm.0..=self.band_fpm.1).contains(&vs_fpm) }
}
