use super::protection_zone::{ProtectionZone, ZoneKind};
use crate::sensitivity::{SensitivityLevel, SensitivityThresholds};

const CAUTION: ProtectionZone = ProtectionZone::new(ZoneKind::Caution, 20, 48);
const WARNING: ProtectionZone = ProtectionZone::new(ZoneKind::Warning, 15, 35);
const COLLISION: ProtectionZone = ProtectionZone::new(ZoneKind::Collision, 0, 15);

/// The protected volume at one sensitivity level.
///
/// Purely informational: the bands are reported alongside the tracks but take no part in
/// classification or advisory selection.
#[derive(Debug, Clone, Copy)]
pub struct AirspaceVolume {
    sl: SensitivityLevel,
    uses_thresholds: SensitivityThresholds,
    zones: [ProtectionZone; 3],
}

impl AirspaceVolume {
    pub fn from_thresholds(sl: SensitivityLevel, thresholds: &SensitivityThresholds) -> Self {
        Self { sl, uses_thresholds: *thresholds, zones: [CAUTION, WARNING, COLLISION] }
    }

    pub fn sl(&self) -> SensitivityLevel { self.sl }
    pub fn uses_thresholds(&self) -> &SensitivityThresholds { &self.uses_thresholds }
    pub fn zones(&self) -> &[ProtectionZone; 3] { &self.zones }

    pub fn zone(&self, kind: ZoneKind) -> ProtectionZone {
        match kind {
            ZoneKind::Caution => self.zones[0],
            ZoneKind::Warning => self.zones[1],
            ZoneKind::Collision => self.zones[2],
        }
    }

    /// Innermost zone whose band contains `ttc_s`, if any.
    pub fn innermost_zone_for(&self, ttc_s: u32) -> Option<ZoneKind> {
        self.zones.iter().filter(|z| z.contains(ttc_s)).map(ProtectionZone::kind).max()
    }
}
