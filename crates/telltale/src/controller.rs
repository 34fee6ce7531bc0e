use crate::geometry::{Point, clamp, constrain_angle, deg_to_rad};
use crate::model::{Diagram, DragAnchor, NudgeDirection, NudgeStep};
use crate::ring::RingId;
use strum::{EnumString, IntoEnumIterator};

/// Pointer input in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// The pointer left the surface or the gesture was taken away.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Key {
    #[strum(serialize = "Left", serialize = "KP_Left")]
    Left,
    #[strum(serialize = "Right", serialize = "KP_Right")]
    Right,
    #[strum(serialize = "Up", serialize = "KP_Up")]
    Up,
    #[strum(serialize = "Down", serialize = "KP_Down")]
    Down,
    Escape,
    #[strum(serialize = "Tab", serialize = "ISO_Left_Tab")]
    Tab,
    Other,
}

impl Key {
    /// Maps a toolkit key name such as `"Left"` or `"Escape"`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Other)
    }

    fn nudge(&self) -> Option<NudgeDirection> {
        match self {
            Self::Left => Some(NudgeDirection::Left),
            Self::Right => Some(NudgeDirection::Right),
            Self::Up => Some(NudgeDirection::Up),
            Self::Down => Some(NudgeDirection::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Max distance in pixels between the pointer and a ring for a hit.
    pub hit_tolerance: f64,
    pub nudge: NudgeStep,
    /// Minimum angle kept between the dragged handle and the other ring's
    /// handles when the two rings overlap. Zero disables it.
    pub min_separation: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            hit_tolerance: 20.0,
            nudge: NudgeStep::default(),
            min_separation: deg_to_rad(8.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTest {
    pub ring: RingId,
    pub spoke: usize,
    /// `|distance - radius|` for the winning ring.
    pub miss: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
}

impl Response {
    pub fn new(redraw: bool) -> Self {
        Self { redraw }
    }
}

/// Turns pointer and keyboard input into mutations on a [`Diagram`].
///
/// The controller keeps no ring state of its own; the selection and any
/// active drag live in the diagram's session.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    settings: ControllerSettings,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ControllerSettings) {
        self.settings = settings;
    }

    /// Picks the ring whose circle passes closest to `point`. On an exact tie
    /// the selected ring wins, then the wind ring.
    pub fn hit_test(&self, diagram: &Diagram, point: Point) -> Option<HitTest> {
        let polar = point.relative_to(diagram.frame().center()).to_polar();
        let selected = diagram.selected();

        RingId::iter()
            .map(|id| (id, (polar.magnitude - diagram.ring(id).radius()).abs()))
            .filter(|&(_, miss)| miss < self.settings.hit_tolerance)
            .min_by(|a, b| {
                a.1.total_cmp(&b.1)
                    .then_with(|| (Some(b.0) == selected).cmp(&(Some(a.0) == selected)))
            })
            .map(|(ring, miss)| HitTest {
                ring,
                spoke: diagram.ring(ring).nearest_spoke(polar.angle),
                miss,
            })
    }

    pub fn handle_pointer(&self, diagram: &mut Diagram, event: PointerEvent) -> Response {
        match event {
            PointerEvent::Down(point) => self.pointer_down(diagram, point),
            PointerEvent::Move(point) => self.pointer_move(diagram, point),
            PointerEvent::Up(_) | PointerEvent::Cancel => Self::release(diagram),
        }
    }

    fn pointer_down(&self, diagram: &mut Diagram, point: Point) -> Response {
        if diagram.session().is_dragging() {
            log::debug!("Dropping stale drag before new press");
            diagram.end_drag();
        }

        match self.hit_test(diagram, point) {
            Some(hit) => {
                log::debug!("Drag start on {} ring, spoke {}", hit.ring, hit.spoke);
                diagram.start_drag(
                    hit.ring,
                    DragAnchor {
                        spoke: hit.spoke,
                        point,
                    },
                );
                Response::new(true)
            }
            None => Self::select(diagram, None),
        }
    }

    fn pointer_move(&self, diagram: &mut Diagram, point: Point) -> Response {
        let session = diagram.session();
        let (Some(id), Some(anchor)) = (session.selected, session.drag) else {
            return Response::default();
        };

        let polar = point.relative_to(diagram.frame().center()).to_polar();
        let ring = diagram.ring(id);
        let other = diagram.ring(id.other());
        let radius = clamp(polar.magnitude, ring.min_radius(), ring.max_radius());

        let mut angle = polar.angle - ring.spoke_offset(anchor.spoke);
        if self.settings.min_separation > 0.0
            && (radius - other.radius()).abs() < self.settings.hit_tolerance
        {
            // ring angles that would put any of our spokes on one of theirs
            let blocked: Vec<f64> = diagram
                .ring_handle_positions(id.other())
                .iter()
                .flat_map(|h| (0..ring.spoke_count()).map(move |i| h.angle - ring.spoke_offset(i)))
                .collect();
            angle = constrain_angle(angle, &blocked, self.settings.min_separation);
        }

        diagram.update_drag(angle, radius);
        Response::new(true)
    }

    fn release(diagram: &mut Diagram) -> Response {
        if !diagram.session().is_dragging() {
            return Response::default();
        }
        log::debug!("Drag end");
        diagram.end_drag();
        Response::new(true)
    }

    fn select(diagram: &mut Diagram, id: Option<RingId>) -> Response {
        let changed = diagram.selected() != id;
        if changed {
            log::debug!("Selection {:?} -> {:?}", diagram.selected(), id);
        }
        diagram.select_ring(id);
        Response::new(changed)
    }

    pub fn handle_key(&self, diagram: &mut Diagram, key: Key) -> Response {
        match key {
            Key::Escape => Self::select(diagram, None),
            Key::Tab => {
                let next = diagram.selected().map_or(RingId::Wind, |id| id.other());
                Self::select(diagram, Some(next))
            }
            _ => match (key.nudge(), diagram.selected()) {
                (Some(direction), Some(_)) => {
                    diagram.move_selected(direction, self.settings.nudge);
                    Response::new(true)
                }
                _ => Response::default(),
            },
        }
    }

    /// Resizing only re-derives bounds and center. Angles are kept.
    pub fn handle_resize(&self, diagram: &mut Diagram, width: f64, height: f64) -> Response {
        diagram.update_canvas_dimensions(width, height);
        Response::new(true)
    }
}
