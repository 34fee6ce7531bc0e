use crate::geometry::{Point, deg_to_rad};
use crate::ring::{Handle, Ring, RingId, RingSpec};
use crate::wind::{BoatVector, WindVector, calculate_apparent_wind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasFrame {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl CanvasFrame {
    pub fn new(width: f64, height: f64) -> Self {
        let (width, height) = (width.max(0.0), height.max(0.0));
        Self {
            width,
            height,
            center_x: width / 2.0,
            center_y: height / 2.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Which spoke was grabbed and where the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub spoke: usize,
    pub point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionSession {
    pub selected: Option<RingId>,
    pub drag: Option<DragAnchor>,
}

impl InteractionSession {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeStep {
    /// Radians per left/right press.
    pub angle: f64,
    /// Fraction of the ring's max radius per up/down press.
    pub radius_fraction: f64,
}

impl Default for NudgeStep {
    fn default() -> Self {
        Self {
            angle: deg_to_rad(5.0),
            radius_fraction: 0.05,
        }
    }
}

/// Initial state for one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSeed {
    pub spec: RingSpec,
    pub angle: f64,
    pub speed: f64,
}

impl RingSeed {
    pub fn new(spec: RingSpec, angle: f64, speed: f64) -> Self {
        Self { spec, angle, speed }
    }
}

/// Owns both rings, the canvas frame and the derived apparent wind.
///
/// Every public mutator leaves the rings inside their bounds and the apparent
/// wind recomputed, so readers never see a stale value.
#[derive(Debug, Clone)]
pub struct Diagram {
    frame: CanvasFrame,
    wind: Ring,
    boat: Ring,
    apparent: WindVector,
    session: InteractionSession,
}

impl Diagram {
    pub fn new(wind: RingSeed, boat: RingSeed, width: f64, height: f64) -> Self {
        let frame = CanvasFrame::new(width, height);
        let mut diagram = Self {
            frame,
            wind: Ring::new(RingId::Wind, wind.spec, wind.angle),
            boat: Ring::new(RingId::Boat, boat.spec, boat.angle),
            apparent: WindVector::default(),
            session: InteractionSession::default(),
        };
        for (ring, seed) in [(&mut diagram.wind, wind), (&mut diagram.boat, boat)] {
            ring.update_bounds(frame.shorter_side());
            ring.set_speed(seed.speed);
        }
        diagram.recompute_apparent_wind();
        diagram
    }

    pub fn frame(&self) -> CanvasFrame {
        self.frame
    }

    pub fn wind_ring(&self) -> &Ring {
        &self.wind
    }

    pub fn boat_ring(&self) -> &Ring {
        &self.boat
    }

    pub fn ring(&self, id: RingId) -> &Ring {
        match id {
            RingId::Wind => &self.wind,
            RingId::Boat => &self.boat,
        }
    }

    fn ring_mut(&mut self, id: RingId) -> &mut Ring {
        match id {
            RingId::Wind => &mut self.wind,
            RingId::Boat => &mut self.boat,
        }
    }

    pub fn apparent_wind(&self) -> WindVector {
        self.apparent
    }

    pub fn true_wind(&self) -> WindVector {
        WindVector::new(self.wind.angle(), self.wind.speed())
    }

    pub fn boat_vector(&self) -> BoatVector {
        BoatVector::new(self.boat.angle(), self.boat.speed())
    }

    pub fn session(&self) -> InteractionSession {
        self.session
    }

    pub fn selected(&self) -> Option<RingId> {
        self.session.selected
    }

    pub fn speed_of(&self, id: RingId) -> f64 {
        self.ring(id).speed()
    }

    pub fn ring_handle_positions(&self, id: RingId) -> Vec<Handle> {
        self.ring(id).handles(self.frame.center())
    }

    pub fn update_canvas_dimensions(&mut self, width: f64, height: f64) {
        self.frame = CanvasFrame::new(width, height);
        let side = self.frame.shorter_side();
        self.wind.update_bounds(side);
        self.boat.update_bounds(side);
        log::debug!("Canvas resized to {}x{}", self.frame.width, self.frame.height);
        self.recompute_apparent_wind();
    }

    pub fn recompute_apparent_wind(&mut self) {
        self.apparent = calculate_apparent_wind(self.true_wind(), self.boat_vector());
        log::trace!(
            "Apparent wind {:.3} rad at {:.2} kn",
            self.apparent.angle,
            self.apparent.speed
        );
    }

    pub fn select_ring(&mut self, id: Option<RingId>) {
        if id != self.session.selected {
            self.session.drag = None;
        }
        self.session.selected = id;
    }

    pub fn start_drag(&mut self, id: RingId, anchor: DragAnchor) {
        self.session = InteractionSession {
            selected: Some(id),
            drag: Some(anchor),
        };
    }

    /// Applies an already interpreted angle and radius to the dragged ring.
    /// Does nothing when no drag is in progress.
    pub fn update_drag(&mut self, angle: f64, radius: f64) {
        let Some(id) = self.session.selected.filter(|_| self.session.is_dragging()) else {
            return;
        };
        let ring = self.ring_mut(id);
        ring.set_angle(angle);
        ring.set_radius(radius);
        self.recompute_apparent_wind();
    }

    /// Ends the drag but keeps the ring selected for keyboard follow-up.
    pub fn end_drag(&mut self) {
        self.session.drag = None;
    }

    pub fn move_selected(&mut self, direction: NudgeDirection, step: NudgeStep) {
        let Some(id) = self.session.selected else {
            return;
        };
        let ring = self.ring_mut(id);
        let radius_step = ring.max_radius() * step.radius_fraction;
        match direction {
            NudgeDirection::Left => ring.set_angle(ring.angle() - step.angle),
            NudgeDirection::Right => ring.set_angle(ring.angle() + step.angle),
            NudgeDirection::Up => ring.set_radius(ring.radius() + radius_step),
            NudgeDirection::Down => ring.set_radius(ring.radius() - radius_step),
        }
        self.recompute_apparent_wind();
    }

    pub fn set_ring_angle(&mut self, id: RingId, angle: f64) {
        self.ring_mut(id).set_angle(angle);
        self.recompute_apparent_wind();
    }

    pub fn set_ring_speed(&mut self, id: RingId, knots: f64) {
        self.ring_mut(id).set_speed(knots);
        self.recompute_apparent_wind();
    }

    /// Swaps in new ring specs, keeping angles and pixel radii where the new
    /// bounds allow.
    pub fn apply_specs(&mut self, wind: RingSpec, boat: RingSpec) {
        let side = self.frame.shorter_side();
        for (ring, spec) in [(&mut self.wind, wind), (&mut self.boat, boat)] {
            ring.spec = spec;
            ring.update_bounds(side);
        }
        self.recompute_apparent_wind();
    }
}
