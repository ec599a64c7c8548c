//! Presentation overlays drawn on top of the blitted framebuffer
//!
//! Pure decoration: coordinate axes in the lower-left corner and a text
//! label at every registered vertex. Nothing here feeds back into the
//! scene.

use macroquad::prelude::*;

use crate::raster::Polygon;

const AXIS_THICKNESS: f32 = 3.0;
const LABEL_FONT_SIZE: f32 = 16.0;

/// Draw the OX and OY axes with arrowheads near the lower-left corner
pub fn draw_axes(height: f32) {
    // OX
    draw_line(15.0, height - 15.0, 150.0, height - 15.0, AXIS_THICKNESS, BLACK);
    draw_line(140.0, height - 20.0, 150.0, height - 15.0, AXIS_THICKNESS, BLACK);
    draw_line(140.0, height - 10.0, 150.0, height - 15.0, AXIS_THICKNESS, BLACK);
    draw_text("X", 150.0, height - 25.0, 20.0, BLACK);

    // OY
    draw_line(15.0, height - 15.0, 15.0, height - 150.0, AXIS_THICKNESS, BLACK);
    draw_line(10.0, height - 140.0, 15.0, height - 150.0, AXIS_THICKNESS, BLACK);
    draw_line(20.0, height - 140.0, 15.0, height - 150.0, AXIS_THICKNESS, BLACK);
    draw_text("Y", 10.0, height - 160.0, 20.0, BLACK);
}

/// Label every vertex with its world coordinates.
///
/// World y grows upward and screen y downward, so labels go through the
/// same `height − y` flip as the raster rows. When two vertices land on
/// the same screen position the later label is nudged by 16px so both stay
/// readable.
pub fn draw_vertex_labels(polygons: &[Polygon], height: f32) {
    let mut seen: Vec<(i32, i32)> = Vec::new();
    for polygon in polygons {
        for v in &polygon.vertices {
            let offset = if seen.contains(&(v.x, v.y)) { 16.0 } else { 0.0 };
            let label = format!("({}, {}, {})", v.x, v.y, v.z);
            draw_text(
                &label,
                v.x as f32 + offset,
                height - v.y as f32 + offset,
                LABEL_FONT_SIZE,
                BLACK,
            );
            seen.push((v.x, v.y));
        }
    }
}
