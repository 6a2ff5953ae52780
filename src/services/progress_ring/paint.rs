//! Replays progress ring draw commands on an egui painter.

use std::f32::consts::TAU;

use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};

use super::render::{render, DrawCommand};
use super::request::RenderRequest;
use crate::models::countdown::RgbaColor;

/// Segments used for a full-circle sector.
const SECTOR_SEGMENTS: f32 = 96.0;
/// egui has no blur, so a glow is drawn as widening translucent rings.
const GLOW_LAYERS: usize = 4;

fn rgba_to_color32(color: RgbaColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Allocate a `size` x `size` square in `ui` and draw the ring into it.
pub fn show(ui: &mut egui::Ui, request: &RenderRequest) -> egui::Response {
    let size = request.size.max(0.0);
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    if ui.is_rect_visible(rect) {
        paint(ui.painter(), rect.min, &render(request));
    }
    response
}

/// Draw `commands` with their local origin placed at `origin`.
pub fn paint(painter: &egui::Painter, origin: Pos2, commands: &[DrawCommand]) {
    let offset = origin.to_vec2();
    for command in commands {
        match command {
            DrawCommand::TickMark {
                from, to, width, color, ..
            } => {
                painter.line_segment(
                    [*from + offset, *to + offset],
                    Stroke::new(*width, rgba_to_color32(*color)),
                );
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                painter.circle_stroke(
                    *center + offset,
                    *radius,
                    Stroke::new(*width, rgba_to_color32(*color)),
                );
            }
            DrawCommand::Sector {
                center,
                radius,
                start_angle,
                sweep_angle,
                color,
            } => {
                painter.add(sector_shape(
                    *center + offset,
                    *radius,
                    *start_angle,
                    *sweep_angle,
                    rgba_to_color32(*color),
                ));
            }
            DrawCommand::Glow {
                center,
                radius,
                width,
                blur,
                color,
            } => {
                for layer in 0..GLOW_LAYERS {
                    let spread = *blur * layer as f32 / GLOW_LAYERS as f32;
                    let alpha = 1.0 / (layer + 1) as f32;
                    painter.circle_stroke(
                        *center + offset,
                        *radius,
                        Stroke::new(*width + spread, rgba_to_color32(color.with_opacity(alpha))),
                    );
                }
            }
            DrawCommand::Text {
                center,
                text,
                font_size,
                color,
            } => {
                painter.text(
                    *center + offset,
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional(*font_size),
                    rgba_to_color32(*color),
                );
            }
            DrawCommand::Dot {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(*center + offset, *radius, rgba_to_color32(*color));
            }
        }
    }
}

/// Triangle fan; sectors wider than half a turn are not convex, so a
/// convex polygon won't do.
fn sector_shape(center: Pos2, radius: f32, start_angle: f32, sweep_angle: f32, color: Color32) -> Shape {
    let segments = ((sweep_angle.abs() / TAU) * SECTOR_SEGMENTS).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for step in 0..=segments {
        let angle = start_angle + sweep_angle * step as f32 / segments as f32;
        mesh.colored_vertex(center + Vec2::angled(angle) * radius, color);
    }
    for step in 0..segments {
        mesh.add_triangle(0, step + 1, step + 2);
    }
    Shape::mesh(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::countdown::WarningLevel;

    #[test]
    fn full_sector_mesh_is_closed_fan() {
        let Shape::Mesh(mesh) = sector_shape(Pos2::ZERO, 10.0, 0.0, TAU, Color32::RED) else {
            panic!("expected a mesh");
        };
        assert_eq!(mesh.vertices.len(), SECTOR_SEGMENTS as usize + 2);
        assert_eq!(mesh.indices.len(), SECTOR_SEGMENTS as usize * 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn tiny_sector_still_has_a_triangle() {
        let Shape::Mesh(mesh) = sector_shape(Pos2::ZERO, 10.0, 0.0, -0.001, Color32::RED) else {
            panic!("expected a mesh");
        };
        assert_eq!(mesh.indices.len(), 3);
    }

    #[test]
    fn show_paints_into_a_frame() {
        let ctx = egui::Context::default();
        let request = RenderRequest {
            progress: 0.4,
            is_active: true,
            warning_level: WarningLevel::Warning,
            label: Some("24".into()),
            ..RenderRequest::default()
        };

        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = show(ui, &request);
                assert_eq!(response.rect.width(), request.size);
            });
        });

        assert!(!output.shapes.is_empty());
    }
}
