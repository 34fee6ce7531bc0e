pub mod view;

pub use view::draw;

use telltale::Diagram;
use telltale::geometry::rad_to_deg;
use telltale::wind::{Compass, PointOfSail};

pub const DEFAULT_WIDTH: i32 = 900;
pub const DEFAULT_HEIGHT: i32 = 700;
pub const HANDLE_RADIUS: f64 = 9.0;
pub const SELECTED_HANDLE_RADIUS: f64 = 12.0;
pub const TRACK_WIDTH: f64 = 2.0;
pub const BOUNDS_DASH: &[f64] = &[4.0, 6.0];
pub const ARROW_WIDTH: f64 = 4.0;
pub const ARROW_HEAD: f64 = 14.0;
pub const ROSE_GAP: f64 = 18.0; // distance past the outer wind bound
pub const ROSE_TICK: f64 = 8.0;
pub const FONT_SIZE: f64 = 14.0;
pub const READOUT_MARGIN: f64 = 16.0;

/// Pixels per knot, chosen so a capped true wind reaches the outer wind bound.
pub fn knots_to_pixels(diagram: &Diagram) -> f64 {
    let wind = diagram.wind_ring();
    if wind.spec.speed_cap <= 0.0 {
        return 0.0;
    }
    wind.max_radius() / wind.spec.speed_cap
}

pub fn readout_lines(diagram: &Diagram) -> [String; 3] {
    let true_wind = diagram.true_wind();
    let boat = diagram.boat_vector();
    let apparent = diagram.apparent_wind();

    [
        format!(
            "True wind  {:>5.1} kn  {:>3.0}° {}",
            true_wind.speed,
            rad_to_deg(true_wind.angle),
            Compass::from_angle(true_wind.angle)
        ),
        format!(
            "Boat       {:>5.1} kn  {:>3.0}° {}",
            boat.speed,
            rad_to_deg(boat.heading),
            Compass::from_angle(boat.heading)
        ),
        format!(
            "Apparent   {:>5.1} kn  {:>3.0}° {}  ({})",
            apparent.speed,
            rad_to_deg(apparent.angle),
            Compass::from_angle(apparent.angle),
            PointOfSail::classify(apparent, boat.heading)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use telltale::{RingSeed, RingSpec};

    fn diagram() -> Diagram {
        Diagram::new(
            RingSeed::new(RingSpec::WIND, PI, 10.0),
            RingSeed::new(RingSpec::BOAT, 0.0, 5.0),
            1000.0,
            1000.0,
        )
    }

    #[test]
    fn test_capped_wind_reaches_outer_bound() {
        let d = diagram();
        assert!((knots_to_pixels(&d) * 30.0 - d.wind_ring().max_radius()).abs() < 1e-9);
    }

    #[test]
    fn test_readout_lines() {
        let lines = readout_lines(&diagram());
        assert!(lines[0].contains("10.0 kn"));
        assert!(lines[0].ends_with(" W"));
        assert!(lines[1].contains("5.0 kn"));
        assert!(lines[2].contains("15.0 kn"));
        assert!(lines[2].ends_with("(in irons)"));
    }
}
