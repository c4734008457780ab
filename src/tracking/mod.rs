mod tau;
mod track;
mod tracker;

pub use track::{Track, TrackState};
pub use tracker::Tracker;
