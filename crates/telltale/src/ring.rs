use crate::geometry::{Point, PolarVector, angular_distance, clamp, normalize_angle};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::TAU;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RingId {
    #[strum(to_string = "wind", serialize = "w")]
    Wind,
    #[strum(to_string = "boat", serialize = "b")]
    Boat,
}

impl RingId {
    pub fn other(&self) -> Self {
        match self {
            Self::Wind => Self::Boat,
            Self::Boat => Self::Wind,
        }
    }
}

/// Static shape of a ring: how radius maps to speed and how many handles it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub speed_cap: f64,
    /// Bounds as fractions of the shorter canvas side.
    pub min_fraction: f64,
    pub max_fraction: f64,
    pub spokes: usize,
}

impl RingSpec {
    pub const WIND: Self = Self {
        speed_cap: 30.0,
        min_fraction: 0.22,
        max_fraction: 0.45,
        spokes: 3,
    };

    pub const BOAT: Self = Self {
        speed_cap: 20.0,
        min_fraction: 0.08,
        max_fraction: 0.30,
        spokes: 4,
    };

    pub fn for_ring(id: RingId) -> Self {
        match id {
            RingId::Wind => Self::WIND,
            RingId::Boat => Self::BOAT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub spoke: usize,
    pub angle: f64,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub id: RingId,
    pub spec: RingSpec,
    angle: f64,
    radius: f64,
    min_radius: f64,
    max_radius: f64,
}

impl Ring {
    pub fn new(id: RingId, spec: RingSpec, angle: f64) -> Self {
        Self {
            id,
            spec,
            angle: normalize_angle(angle),
            radius: 0.0,
            min_radius: 0.0,
            max_radius: 0.0,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn spoke_count(&self) -> usize {
        self.spec.spokes.max(1)
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }

    pub(crate) fn set_radius(&mut self, radius: f64) {
        self.radius = clamp(radius, self.min_radius, self.max_radius);
    }

    /// Recomputes the radius bounds for a canvas whose shorter side is
    /// `shorter_side` pixels and pulls the current radius back inside them.
    pub(crate) fn update_bounds(&mut self, shorter_side: f64) {
        let side = shorter_side.max(0.0);
        self.min_radius = self.spec.min_fraction * side;
        self.max_radius = (self.spec.max_fraction * side).max(self.min_radius);
        self.set_radius(self.radius);
    }

    /// Linear map from radius to knots. Collapsed bounds read as zero.
    pub fn speed(&self) -> f64 {
        let span = self.max_radius - self.min_radius;
        if span <= f64::EPSILON {
            return 0.0;
        }
        ((self.radius - self.min_radius) / span * self.spec.speed_cap).max(0.0)
    }

    /// Places the radius so that `speed()` reads `knots`, clamped to the cap.
    pub(crate) fn set_speed(&mut self, knots: f64) {
        let fraction = if self.spec.speed_cap > 0.0 {
            clamp(knots / self.spec.speed_cap, 0.0, 1.0)
        } else {
            0.0
        };
        self.set_radius(self.min_radius + fraction * (self.max_radius - self.min_radius));
    }

    pub fn spoke_offset(&self, spoke: usize) -> f64 {
        spoke as f64 * TAU / self.spoke_count() as f64
    }

    pub fn handles(&self, center: Point) -> Vec<Handle> {
        (0..self.spoke_count())
            .map(|spoke| {
                let angle = normalize_angle(self.angle + self.spoke_offset(spoke));
                Handle {
                    spoke,
                    angle,
                    position: center.offset(PolarVector::new(angle, self.radius).to_cartesian()),
                }
            })
            .collect()
    }

    /// Spoke whose handle is angularly closest to `angle`.
    pub fn nearest_spoke(&self, angle: f64) -> usize {
        (0..self.spoke_count())
            .min_by(|&a, &b| {
                angular_distance(angle, self.angle + self.spoke_offset(a))
                    .total_cmp(&angular_distance(angle, self.angle + self.spoke_offset(b)))
            })
            .unwrap_or(0)
    }
}
