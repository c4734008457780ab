use num::traits::{Num, NumCast, real::Real};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Sub};

/// A planar vector generic over any numeric type.
///
/// Positions are expressed in nautical miles with `x` pointing east and `y` pointing north,
/// so compass angles are measured clockwise from the `y` axis.
///
/// # Type Parameters
/// * `T` - The functionality for the vector depends on traits implemented by `T`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Vec2D<T> {
    /// The east component of the vector.
    x: T,
    /// The north component of the vector.
    y: T,
}

impl<T> Vec2D<T>
where
    T: Real + NumCast,
{
    /// Computes the magnitude (absolute value) of the vector.
    ///
    /// # Returns
    /// The magnitude of the vector as a scalar of type `T`.
    pub fn abs(&self) -> T { self.x.hypot(self.y) }

    /// Creates a vector pointing from the current vector (`self`) to another vector (`other`).
    ///
    /// # Arguments
    /// * `other` - The target vector.
    ///
    /// # Returns
    /// A new vector representing the direction from `self` to `other`.
    pub fn to(&self, other: &Vec2D<T>) -> Vec2D<T> { Vec2D::new(other.x - self.x, other.y - self.y) }

    /// Computes the Euclidean distance between the current vector and another vector.
    pub fn euclid_distance(&self, other: &Self) -> T { self.to(other).abs() }

    /// Compass bearing of this vector in degrees, normalized to `[0, 360)`.
    ///
    /// North (`+y`) is 0°, east (`+x`) is 90°.
    pub fn compass_bearing(&self) -> T {
        let deg = self.x.atan2(self.y).to_degrees();
        T::from(360.0).map_or(deg, |full| (deg + full) % full)
    }

    /// Creates the displacement of `magnitude` along a compass `heading_deg`.
    ///
    /// # Arguments
    /// * `heading_deg` - Compass heading in degrees.
    /// * `magnitude` - Length of the resulting vector.
    pub fn from_heading(heading_deg: T, magnitude: T) -> Self {
        let rad = heading_deg.to_radians();
        Self::new(rad.sin() * magnitude, rad.cos() * magnitude)
    }

    /// Creates a point at polar angle `theta_rad` (counter-clockwise from `+x`) and `radius`.
    pub fn from_polar(theta_rad: T, radius: T) -> Self {
        Self::new(theta_rad.cos() * radius, theta_rad.sin() * radius)
    }
}

impl<T: Copy> Vec2D<T> {
    /// Creates a new vector with the given x and y components.
    pub const fn new(x: T, y: T) -> Self { Self { x, y } }

    /// Returns the east component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the north component of the vector.
    pub const fn y(&self) -> T { self.y }
}

impl<T: Num + Copy> Vec2D<T> {
    /// Creates a zero vector (x = 0, y = 0).
    pub fn zero() -> Self { Self::new(T::zero(), T::zero()) }
}

impl<T: Num> Add for Vec2D<T> {
    type Output = Vec2D<T>;

    fn add(self, rhs: Vec2D<T>) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Num> Sub for Vec2D<T> {
    type Output = Vec2D<T>;

    fn sub(self, rhs: Vec2D<T>) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T: Num + Copy> Mul<T> for Vec2D<T> {
    type Output = Vec2D<T>;

    /// Implements the `*` operator for a `Vec2D` and a scalar.
    fn mul(self, rhs: T) -> Self::Output {
        Self::Output {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<T: Display> Display for Vec2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.x, self.y)
    }
}
