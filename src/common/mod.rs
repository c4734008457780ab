pub(crate) mod math;
pub(crate) mod vec2d;

pub use vec2d::Vec2D;
