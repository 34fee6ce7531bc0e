use derive_more::{Add, Mul, Neg, Sub};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `origin` to this point.
    pub fn relative_to(&self, origin: Point) -> Vector2 {
        Vector2::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(&self, v: Vector2) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Add, Sub, Mul, Neg)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        self * factor
    }

    pub fn to_polar(self) -> PolarVector {
        PolarVector::from_cartesian(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarVector {
    pub angle: f64,
    pub magnitude: f64,
}

impl PolarVector {
    pub fn new(angle: f64, magnitude: f64) -> Self {
        Self { angle, magnitude }
    }

    pub fn to_cartesian(&self) -> Vector2 {
        Vector2::new(
            self.magnitude * self.angle.cos(),
            self.magnitude * self.angle.sin(),
        )
    }

    /// The angle comes straight from `atan2` and lies in `(-PI, PI]`. A zero
    /// vector yields angle `0.0`, which is what `atan2(0, 0)` returns.
    pub fn from_cartesian(v: Vector2) -> Self {
        Self {
            angle: v.y.atan2(v.x),
            magnitude: v.length(),
        }
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Wraps any angle into `[0, TAU)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest angular distance between two angles, in `[0, PI]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    diff.min(TAU - diff)
}

pub fn angle_collision(a1: f64, a2: f64, min_separation: f64) -> bool {
    angular_distance(a1, a2) < min_separation
}

/// Pushes `proposed` out of every existing angle it collides with, snapping to
/// whichever of `existing ± min_separation` is closer. Existing angles are
/// visited in order and each one sees the already adjusted value.
pub fn constrain_angle(proposed: f64, existing: &[f64], min_separation: f64) -> f64 {
    existing
        .iter()
        .fold(normalize_angle(proposed), |current, &other| {
            if !angle_collision(current, other, min_separation) {
                return current;
            }
            let ahead = normalize_angle(other + min_separation);
            let behind = normalize_angle(other - min_separation);
            if angular_distance(current, ahead) <= angular_distance(current, behind) {
                ahead
            } else {
                behind
            }
        })
}

pub fn distance(a: Point, b: Point) -> f64 {
    a.relative_to(b).length()
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
