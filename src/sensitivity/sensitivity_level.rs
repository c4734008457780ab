use strum_macros::{Display, EnumIter};

/// Sensitivity level, selects which threshold regime is active.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display, EnumIter)]
pub enum SensitivityLevel {
    SL2,
    SL3,
    SL4,
    SL5,
    SL6,
    SL7,
}

impl SensitivityLevel {
    /// Upper altitude bound (exclusive, ft) for each level, SL7 covers everything above.
    const ALTITUDE_BANDS: [(f64, SensitivityLevel); 5] = [
        (1000.0, SensitivityLevel::SL2),
        (2350.0, SensitivityLevel::SL3),
        (5000.0, SensitivityLevel::SL4),
        (10000.0, SensitivityLevel::SL5),
        (20000.0, SensitivityLevel::SL6),
    ];

    /// Selects the sensitivity level from the own aircraft altitude.
    pub fn from_altitude_ft(altitude_ft: f64) -> Self {
        Self::ALTITUDE_BANDS
            .iter()
            .find(|(upper, _)| altitude_ft < *upper)
            .map_or(SensitivityLevel::SL7, |(_, sl)| *sl)
    }

    /// Numeric level as printed on the control panel.
    pub fn number(self) -> u8 {
        match self {
            SensitivityLevel::SL2 => 2,
            SensitivityLevel::SL3 => 3,
            SensitivityLevel::SL4 => 4,
            SensitivityLevel::SL5 => 5,
            SensitivityLevel::SL6 => 6,
            SensitivityLevel::SL7 => 7,
        }
    }
}
