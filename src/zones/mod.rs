//! Coarse time-to-conflict bands around the own aircraft.

mod airspace_volume;
mod protection_zone;

pub use airspace_volume::AirspaceVolume;
pub use protection_zone::{ProtectionZone, ZoneKind};
