pub mod controller;
pub mod geometry;
pub mod model;
pub mod ring;
pub mod wind;

pub use controller::{Controller, ControllerSettings, Key, PointerEvent, Response};
pub use model::{CanvasFrame, Diagram, NudgeStep, RingSeed};
pub use ring::{RingId, RingSpec};
pub use wind::{BoatVector, WindVector, calculate_apparent_wind};
