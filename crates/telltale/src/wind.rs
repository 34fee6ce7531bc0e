use crate::geometry::{PolarVector, normalize_angle, rad_to_deg};
use std::f64::consts::PI;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindVector {
    /// Radians, screen space (0 = east, clockwise).
    pub angle: f64,
    /// Knots.
    pub speed: f64,
}

impl WindVector {
    pub fn new(angle: f64, speed: f64) -> Self {
        Self { angle, speed }
    }

    fn as_polar(&self) -> PolarVector {
        PolarVector::new(self.angle, self.speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoatVector {
    pub heading: f64,
    pub speed: f64,
}

impl BoatVector {
    pub fn new(heading: f64, speed: f64) -> Self {
        Self { heading, speed }
    }

    fn as_polar(&self) -> PolarVector {
        PolarVector::new(self.heading, self.speed)
    }
}

/// Apparent wind is the true wind minus the boat's own velocity.
pub fn calculate_apparent_wind(true_wind: WindVector, boat: BoatVector) -> WindVector {
    let apparent = (true_wind.as_polar().to_cartesian() - boat.as_polar().to_cartesian()).to_polar();

    WindVector {
        angle: normalize_angle(apparent.angle),
        speed: apparent.magnitude.max(0.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, StrumDisplay)]
pub enum Compass {
    E,
    SE,
    S,
    SW,
    W,
    NW,
    N,
    NE,
}

impl Compass {
    /// Nearest of the eight compass points. Screen angles grow clockwise, so
    /// a quarter turn past east is south.
    pub fn from_angle(angle: f64) -> Self {
        let sector = ((normalize_angle(angle) / (PI / 4.0)).round() as usize) % 8;
        Self::iter().nth(sector).unwrap_or(Self::E)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum PointOfSail {
    #[strum(serialize = "in irons")]
    InIrons,
    #[strum(serialize = "close hauled")]
    CloseHauled,
    #[strum(serialize = "beam reach")]
    BeamReach,
    #[strum(serialize = "broad reach")]
    BroadReach,
    #[strum(serialize = "running")]
    Running,
}

impl PointOfSail {
    /// Classifies the apparent wind by where it comes from relative to the bow.
    ///
    /// `apparent.angle` is the direction the air moves, so the wind arrives from
    /// the opposite side. A wind arriving dead ahead means the boat is in irons.
    pub fn classify(apparent: WindVector, heading: f64) -> Self {
        let from = normalize_angle(apparent.angle + PI);
        let off_bow = rad_to_deg(crate::geometry::angular_distance(from, heading));

        match off_bow {
            d if d < 30.0 => Self::InIrons,
            d if d < 60.0 => Self::CloseHauled,
            d if d < 110.0 => Self::BeamReach,
            d if d < 150.0 => Self::BroadReach,
            _ => Self::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{approx_eq, deg_to_rad};

    #[test]
    fn test_head_wind() {
        let apparent = calculate_apparent_wind(WindVector::new(0.0, 10.0), BoatVector::new(0.0, 5.0));
        assert!(approx_eq(apparent.angle, 0.0));
        assert!(approx_eq(apparent.speed, 5.0));
    }

    #[test]
    fn test_tail_wind() {
        let apparent = calculate_apparent_wind(WindVector::new(PI, 10.0), BoatVector::new(0.0, 5.0));
        assert!((apparent.angle - PI).abs() < 1e-9);
        assert!(approx_eq(apparent.speed, 15.0));
    }

    #[test]
    fn test_stationary_boat_keeps_true_wind() {
        let true_wind = WindVector::new(deg_to_rad(135.0), 12.0);
        let apparent = calculate_apparent_wind(true_wind, BoatVector::new(deg_to_rad(70.0), 0.0));
        assert!(approx_eq(apparent.angle, true_wind.angle));
        assert!(approx_eq(apparent.speed, true_wind.speed));
    }

    #[test]
    fn test_calm_gives_reversed_boat_velocity() {
        let boat = BoatVector::new(deg_to_rad(30.0), 6.0);
        let apparent = calculate_apparent_wind(WindVector::new(0.0, 0.0), boat);
        assert!(approx_eq(apparent.speed, 6.0));
        assert!(approx_eq(apparent.angle, normalize_angle(boat.heading + PI)));
    }

    #[test]
    fn test_cross_wind() {
        let apparent =
            calculate_apparent_wind(WindVector::new(PI / 2.0, 10.0), BoatVector::new(0.0, 10.0));
        assert!(approx_eq(apparent.speed, 200f64.sqrt()));
        assert!(approx_eq(apparent.angle, deg_to_rad(135.0)));
    }

    #[test]
    fn test_equal_and_opposite_is_calm() {
        let apparent =
            calculate_apparent_wind(WindVector::new(0.0, 8.0), BoatVector::new(0.0, 8.0));
        assert!(apparent.speed.abs() < 1e-9);
        assert!((0.0..std::f64::consts::TAU).contains(&apparent.angle));
    }

    #[test]
    fn test_compass_from_angle() {
        assert_eq!(Compass::from_angle(0.0), Compass::E);
        assert_eq!(Compass::from_angle(deg_to_rad(90.0)), Compass::S);
        assert_eq!(Compass::from_angle(deg_to_rad(-90.0)), Compass::N);
        assert_eq!(Compass::from_angle(deg_to_rad(350.0)), Compass::E);
        assert_eq!(Compass::from_angle(deg_to_rad(225.0)), Compass::NW);
    }

    #[test]
    fn test_point_of_sail() {
        // air moving toward the stern means the wind comes over the bow
        let on_bow = WindVector::new(PI, 10.0);
        assert_eq!(PointOfSail::classify(on_bow, 0.0), PointOfSail::InIrons);

        let from_astern = WindVector::new(0.0, 10.0);
        assert_eq!(PointOfSail::classify(from_astern, 0.0), PointOfSail::Running);

        let abeam = WindVector::new(PI / 2.0, 10.0);
        assert_eq!(PointOfSail::classify(abeam, 0.0), PointOfSail::BeamReach);
        assert_eq!(PointOfSail::BeamReach.to_string(), "beam reach");
    }
}
