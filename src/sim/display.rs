use crate::tracking::{Track, TrackState};
use itertools::Itertools;
use strum_macros::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum VerticalTrend {
    Climbing,
    Descending,
    Level,
}

impl VerticalTrend {
    /// Rates within this band in either direction show as level.
    const LEVEL_BAND_FPM: i32 = 500;

    pub fn from_rate(vs_fpm: i32) -> Self {
        if vs_fpm > Self::LEVEL_BAND_FPM {
            VerticalTrend::Climbing
        } else if vs_fpm < -Self::LEVEL_BAND_FPM {
            VerticalTrend::Descending
        } else {
            VerticalTrend::Level
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display)]
pub enum ThreatLevel {
    NonThreat,
    Proximity,
    TrafficAdvisory,
    ResolutionAdvisory,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum DisplayColor {
    White,
    Cyan,
    Yellow,
    Red,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum SymbolType {
    Diamond,
    Circle,
    Square,
}

/// Everything the traffic display needs to paint one contact.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub id: String,
    pub bearing_deg: f64,
    pub range_nm: f64,
    pub relative_altitude_ft: f64,
    pub vertical_trend: VerticalTrend,
    pub threat_level: ThreatLevel,
    pub color: DisplayColor,
    pub symbol: SymbolType,
    /// Other traffic is drawn as a hollow symbol.
    pub filled: bool,
}

impl DisplayEntry {
    pub fn from_track(track: &Track) -> Self {
        let (threat_level, color, symbol) = match track.state {
            TrackState::ThreatRa => (ThreatLevel::ResolutionAdvisory, DisplayColor::Red, SymbolType::Square),
            TrackState::IntruderTa => (ThreatLevel::TrafficAdvisory, DisplayColor::Yellow, SymbolType::Circle),
            TrackState::Proximate => (ThreatLevel::Proximity, DisplayColor::Cyan, SymbolType::Diamond),
            TrackState::Other => (ThreatLevel::NonThreat, DisplayColor::White, SymbolType::Diamond),
        };
        Self {
            id: track.intruder_id.clone(),
            bearing_deg: track.bearing_deg,
            range_nm: track.range_nm,
            relative_altitude_ft: track.relative_altitude_ft,
            vertical_trend: VerticalTrend::from_rate(track.intruder_vertical_rate_fpm),
            threat_level,
            color,
            symbol,
            filled: track.state != TrackState::Other,
        }
    }

    /// Relative altitude tag in hundreds of feet with sign, e.g. `+02` or `-11`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn altitude_tag(&self) -> String {
        let hundreds = (self.relative_altitude_ft / 100.0).round() as i64;
        format!("{hundreds:+03}")
    }
}

/// Display entries for `tracks`, ordered by intruder id.
pub fn display_entries<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<DisplayEntry> {
    tracks.into_iter().map(DisplayEntry::from_track).sorted_by(|a, b| a.id.cmp(&b.id)).collect()
}

/// Range selection of the traffic display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficDisplay {
    selected_range_nm: f64,
}

impl TrafficDisplay {
    pub const RANGES_NM: [f64; 3] = [3.0, 5.0, 10.0];

    pub fn selected_range_nm(&self) -> f64 { self.selected_range_nm }

    /// Selects one of [`TrafficDisplay::RANGES_NM`], other values are ignored.
    ///
    /// # Returns
    /// - `true` if `range_nm` is a selectable range.
    #[allow(clippy::float_cmp)]
    pub fn select_range(&mut self, range_nm: f64) -> bool {
        if Self::RANGES_NM.contains(&range_nm) {
            self.selected_range_nm = range_nm;
            true
        } else {
            false
        }
    }

    /// Whether a contact at `range_nm` lies inside the selected range ring.
    pub fn in_range(&self, range_nm: f64) -> bool { range_nm <= self.selected_range_nm }
}

impl Default for TrafficDisplay {
    fn default() -> Self { Self { selected_range_nm: 5.0 } }
}

/// Vertical speed scale of the RA display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaDisplay {
    scale_max_vs_fpm: i32,
}

impl RaDisplay {
    pub fn scale_max_vs_fpm(&self) -> i32 { self.scale_max_vs_fpm }

    /// Needle deflection for `vs_fpm` as a fraction of full scale in `[-1, 1]`.
    pub fn deflection(&self, vs_fpm: i32) -> f64 {
        (f64::from(vs_fpm) / f64::from(self.scale_max_vs_fpm)).clamp(-1.0, 1.0)
    }
}

impl Default for RaDisplay {
    fn default() -> Self { Self { scale_max_vs_fpm: 3000 } }
}
