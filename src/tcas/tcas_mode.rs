use strum_macros::{Display, EnumString};

/// Operating mode selected on the control head.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TcasMode {
    /// Traffic advisories only, resolution advisories inhibited.
    Standby,
    TaOnly,
    TaRa,
}

impl TcasMode {
    pub fn allows_ra(self) -> bool { self == TcasMode::TaRa }
}

/// Collision avoidance logic version, informational.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display)]
pub enum TcasVersion {
    #[strum(serialize = "6.04A")]
    V6_04A,
    #[strum(serialize = "7.0")]
    V7_0,
    #[strum(serialize = "7.1")]
    V7_1,
}
