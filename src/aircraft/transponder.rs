use strum_macros::{Display, EnumString};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TransponderMode {
    #[strum(serialize = "A")]
    ModeA,
    #[strum(serialize = "C")]
    ModeC,
    #[strum(serialize = "S")]
    ModeS,
}

/// Transponder of an intruder as seen by surveillance.
///
/// Only the altitude-reporting flag feeds the decision logic: a contact that does not
/// report altitude can raise a TA but never an RA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transponder {
    mode: TransponderMode,
    squawk: String,
    altitude_reporting: bool,
    mode_s_address: String,
}

impl Transponder {
    pub fn new(mode: TransponderMode, squawk: &str, altitude_reporting: bool, address: u32) -> Self {
        Self {
            mode,
            squawk: squawk.to_string(),
            altitude_reporting,
            mode_s_address: format!("{:06X}", address & 0x00FF_FFFF),
        }
    }

    /// Mode-S transponder squawking VFR with altitude reporting on.
    pub fn mode_s_vfr(address: u32) -> Self { Self::new(TransponderMode::ModeS, "1200", true, address) }

    pub fn mode(&self) -> TransponderMode { self.mode }
    pub fn squawk(&self) -> &str { &self.squawk }
    pub fn altitude_reporting(&self) -> bool { self.altitude_reporting }
    pub fn mode_s_address(&self) -> &str { &self.mode_s_address }
}
