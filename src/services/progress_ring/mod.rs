//! Circular progress ring: a pure mapping from a per-frame
//! [`RenderRequest`] to an ordered list of [`DrawCommand`]s, plus an egui
//! adapter that paints them.

mod color;
mod paint;
mod pulse;
mod render;
mod request;

pub use color::{resolve_fill_color, threshold_color};
pub use paint::{paint, show};
pub use pulse::pulse_phase;
pub use render::{render, DrawCommand, RingGeometry, MAJOR_TICK_EVERY, START_ANGLE, TICK_COUNT};
pub use request::{should_repaint, RenderRequest};
