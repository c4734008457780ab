use strum_macros::{Display, EnumIter};

/// Kind of a [`ProtectionZone`], ordered from outermost to innermost.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display, EnumIter)]
pub enum ZoneKind {
    Caution,
    Warning,
    Collision,
}

/// A band of time-to-conflict values in whole seconds, bounds inclusive.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ProtectionZone {
    kind: ZoneKind,
    min_ttc_s: u32,
    max_ttc_s: u32,
}

impl ProtectionZone {
    pub const fn new(kind: ZoneKind, min_ttc_s: u32, max_ttc_s: u32) -> Self {
        Self { kind, min_ttc_s, max_ttc_s }
    }

    pub fn kind(&self) -> ZoneKind { self.kind }
    pub fn min_ttc_s(&self) -> u32 { self.min_ttc_s }
    pub fn max_ttc_s(&self) -> u32 { self.max_ttc_s }

    pub fn contains(&self, ttc_s: u32) -> bool { (self.min_ttc_s..=self.max_ttc_s).contains(&ttc_s) }
}
