use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use super::color::resolve_fill_color;
use super::request::RenderRequest;
use crate::models::countdown::{RgbaColor, WarningLevel};

pub const TICK_COUNT: usize = 60;
pub const MAJOR_TICK_EVERY: usize = 5;

/// 12 o'clock in screen coordinates (y grows downwards).
pub const START_ANGLE: f32 = -FRAC_PI_2;

const TICK_OUTER_RATIO: f32 = 0.48;
const MAJOR_TICK_RATIO: f32 = 0.06;
const MINOR_TICK_RATIO: f32 = 0.03;
const MAJOR_TICK_WIDTH: f32 = 2.0;
const MINOR_TICK_WIDTH: f32 = 1.0;
const RING_RATIO: f32 = 0.38;
const DOT_RATIO: f32 = 0.02;
const INNER_RING_WIDTH: f32 = 1.0;
const LABEL_RATIO: f32 = 0.2;

/// One drawing primitive, in the local coordinates of a `size` x `size`
/// square with the origin at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    TickMark {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: RgbaColor,
        major: bool,
    },
    StrokeCircle {
        center: Pos2,
        radius: f32,
        width: f32,
        color: RgbaColor,
    },
    /// Filled pie slice; a positive sweep runs clockwise on screen
    Sector {
        center: Pos2,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        color: RgbaColor,
    },
    /// Blurred stroked ring
    Glow {
        center: Pos2,
        radius: f32,
        width: f32,
        blur: f32,
        color: RgbaColor,
    },
    Text {
        center: Pos2,
        text: String,
        font_size: f32,
        color: RgbaColor,
    },
    Dot {
        center: Pos2,
        radius: f32,
        color: RgbaColor,
    },
}

/// Radii derived from the request size and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Pos2,
    pub tick_outer_radius: f32,
    pub ring_radius: f32,
    pub fill_radius: f32,
    pub dot_radius: f32,
}

impl RingGeometry {
    pub fn for_size(size: f32, stroke_width: f32) -> Self {
        let size = size.max(0.0);
        let ring_radius = size * RING_RATIO;
        Self {
            center: Pos2::new(size / 2.0, size / 2.0),
            tick_outer_radius: size * TICK_OUTER_RATIO,
            ring_radius,
            fill_radius: (ring_radius - stroke_width / 2.0).max(0.0),
            dot_radius: size * DOT_RATIO,
        }
    }

    fn point_at(&self, angle: f32, radius: f32) -> Pos2 {
        self.center + Vec2::angled(angle) * radius
    }
}

/// Map a request to its ordered draw list: ticks, base ring, progress
/// sector, glow, inner ring, then the label or centre dot.
///
/// Identical requests always produce identical output.
pub fn render(request: &RenderRequest) -> Vec<DrawCommand> {
    let style = &request.style;
    let size = request.size.max(0.0);
    let geometry = RingGeometry::for_size(size, style.stroke_width);
    let progress = if request.progress.is_nan() {
        0.0
    } else {
        request.progress.clamp(0.0, 1.0)
    };
    let fill_color = resolve_fill_color(progress, style);

    let mut commands = Vec::with_capacity(TICK_COUNT + 5);
    push_tick_marks(&mut commands, &geometry, size, style.tick_color);

    commands.push(DrawCommand::StrokeCircle {
        center: geometry.center,
        radius: geometry.ring_radius,
        width: style.stroke_width,
        color: style.circle_color,
    });

    if progress > 0.0 {
        commands.push(DrawCommand::Sector {
            center: geometry.center,
            radius: geometry.fill_radius,
            start_angle: START_ANGLE,
            sweep_angle: TAU * progress as f32 * request.direction.sign(),
            color: fill_color,
        });
    }

    if request.is_active && request.warning_level != WarningLevel::Normal {
        let phase = request.animation_value.clamp(0.0, 1.0);
        commands.push(DrawCommand::Glow {
            center: geometry.center,
            radius: geometry.ring_radius,
            width: style.stroke_width * 2.0,
            blur: style.glow_blur,
            color: fill_color.with_opacity(0.3 + 0.3 * phase),
        });
    }

    commands.push(DrawCommand::StrokeCircle {
        center: geometry.center,
        radius: geometry.fill_radius,
        width: INNER_RING_WIDTH,
        color: style.circle_color,
    });

    match request.label.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => commands.push(DrawCommand::Text {
            center: geometry.center,
            text: text.to_string(),
            font_size: style.label_font_size.unwrap_or(size * LABEL_RATIO),
            color: style.text_color,
        }),
        None => commands.push(DrawCommand::Dot {
            center: geometry.center,
            radius: geometry.dot_radius,
            color: fill_color,
        }),
    }

    commands
}

fn push_tick_marks(
    commands: &mut Vec<DrawCommand>,
    geometry: &RingGeometry,
    size: f32,
    color: RgbaColor,
) {
    let step = TAU / TICK_COUNT as f32;
    for index in 0..TICK_COUNT {
        let major = index % MAJOR_TICK_EVERY == 0;
        let (length, width) = if major {
            (size * MAJOR_TICK_RATIO, MAJOR_TICK_WIDTH)
        } else {
            (size * MINOR_TICK_RATIO, MINOR_TICK_WIDTH)
        };
        let angle = START_ANGLE + step * index as f32;
        commands.push(DrawCommand::TickMark {
            from: geometry.point_at(angle, geometry.tick_outer_radius - length),
            to: geometry.point_at(angle, geometry.tick_outer_radius),
            width,
            color,
            major,
        });
    }
}
