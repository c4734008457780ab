use crate::advisory::{RaKind, ResolutionAdvisory, TrafficAdvisory};
use chrono::{DateTime, TimeDelta, Utc};
use strum_macros::{Display, IntoStaticStr};

/// Aural alert announced for an advisory.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, IntoStaticStr)]
pub enum AuralAlert {
    #[strum(serialize = "CLIMB, CLIMB")]
    Climb,
    #[strum(serialize = "DESCEND, DESCEND")]
    Descend,
    #[strum(serialize = "LEVEL OFF, LEVEL OFF")]
    LevelOff,
    #[strum(serialize = "TRAFFIC, TRAFFIC")]
    Traffic,
}

impl AuralAlert {
    /// How long the banner stays up after the alert was last raised.
    pub fn duration(self) -> TimeDelta {
        match self {
            AuralAlert::Traffic => TimeDelta::seconds(4),
            _ => TimeDelta::seconds(5),
        }
    }

    /// The alert for this tick's advisories, RAs taking precedence over a TA.
    ///
    /// RA kinds without an announcement of their own raise nothing.
    pub fn for_advisories(ta: Option<&TrafficAdvisory>, ra: Option<&ResolutionAdvisory>) -> Option<Self> {
        match (ta, ra) {
            (_, Some(ra)) => match ra.kind() {
                RaKind::Climb => Some(AuralAlert::Climb),
                RaKind::Descend => Some(AuralAlert::Descend),
                RaKind::LevelOff => Some(AuralAlert::LevelOff),
                _ => None,
            },
            (Some(_), None) => Some(AuralAlert::Traffic),
            (None, None) => None,
        }
    }
}

/// Banner text shown on the traffic display.
///
/// A newer alert overwrites an older one, the text disappears once the alert's
/// duration has passed on the sim clock.
#[derive(Debug, Default)]
pub struct Banner {
    current: Option<(AuralAlert, DateTime<Utc>)>,
}

impl Banner {
    pub fn raise(&mut self, alert: AuralAlert, now: DateTime<Utc>) {
        self.current = Some((alert, now + alert.duration()));
    }

    /// The alert still on display at `now`.
    pub fn alert(&self, now: DateTime<Utc>) -> Option<AuralAlert> {
        self.current.filter(|(_, until)| now <= *until).map(|(alert, _)| alert)
    }

    /// Banner text at `now`, empty when nothing is on display.
    pub fn text(&self, now: DateTime<Utc>) -> &'static str { self.alert(now).map_or("", <&'static str>::from) }
}
