//! Framebuffer and the scanline render pass

use std::path::Path;

use super::math::{Crossing, Edge};
use super::types::{Color, Polygon};

#[cfg(feature = "multithreading")]
use rayon::prelude::*;

/// Error type for a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// An active polygon produced no boundary crossing on a scanline
    EmptySpan { y: i32 },
    /// An active polygon produced more than two distinct boundary
    /// crossings on a scanline (the outline is not row-simple)
    SplitSpan { y: i32, crossings: usize },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::EmptySpan { y } => {
                write!(f, "no boundary crossing on scanline {}", y)
            }
            RenderError::SplitSpan { y, crossings } => {
                write!(
                    f,
                    "{} distinct boundary crossings on scanline {}, expected at most 2",
                    crossings, y
                )
            }
        }
    }
}

/// Persistent RGB image buffer, row 0 at the top
pub struct Framebuffer {
    pub pixels: Vec<Color>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            pixels: vec![background; width * height],
            width,
            height,
        }
    }

    /// Reset every pixel to the background color
    pub fn clear(&mut self, background: Color) {
        self.pixels.fill(background);
    }

    pub fn pixel(&self, x: usize, row: usize) -> Color {
        self.pixels[row * self.width + x]
    }

    /// Map a world-y scanline to a buffer row: `row = height − y`.
    ///
    /// Defined for `1 ≤ y ≤ height`; anything else lies outside the image
    /// and gets no row (never wraps around).
    pub fn row_for_y(&self, y: i32) -> Option<usize> {
        if y >= 1 && y as usize <= self.height {
            Some(self.height - y as usize)
        } else {
            None
        }
    }

    fn write_row(&mut self, row: usize, colors: &[Color]) {
        let start = row * self.width;
        self.pixels[start..start + self.width].copy_from_slice(colors);
    }

    /// Flatten to RGBA bytes for the screen texture
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgba());
        }
        bytes
    }

    /// Save the buffer as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let mut bytes = Vec::with_capacity(self.width * self.height * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_bytes());
        }

        let img = image::RgbImage::from_raw(self.width as u32, self.height as u32, bytes)
            .ok_or_else(|| "framebuffer dimensions do not match pixel data".to_string())?;
        img.save(path)
            .map_err(|e| format!("Failed to save {}: {}", path.display(), e))
    }
}

/// Rasterize `polygons` into `fb` with one scanline sweep over their
/// combined vertical range.
///
/// Rows outside that range keep whatever the framebuffer already holds,
/// and an empty polygon list leaves the buffer untouched. All rows are
/// filled before any of them is written, so a failing pass never leaves a
/// partially updated framebuffer behind.
pub fn render_into(
    fb: &mut Framebuffer,
    polygons: &[Polygon],
    background: Color,
) -> Result<(), RenderError> {
    if polygons.is_empty() {
        return Ok(());
    }

    let mut y_min = polygons[0].y_min;
    let mut y_max = polygons[0].y_max;
    for p in &polygons[1..] {
        y_min = y_min.min(p.y_min);
        y_max = y_max.max(p.y_max);
    }

    let ys: Vec<i32> = (y_min..=y_max).collect();
    let width = fb.width;

    #[cfg(feature = "multithreading")]
    let rows = ys
        .par_iter()
        .map(|&y| fill_row(polygons, y, width, background))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "multithreading"))]
    let rows = ys
        .iter()
        .map(|&y| fill_row(polygons, y, width, background))
        .collect::<Result<Vec<_>, _>>()?;

    for (&y, row) in ys.iter().zip(rows.iter()) {
        if let Some(r) = fb.row_for_y(y) {
            fb.write_row(r, row);
        }
    }

    Ok(())
}

/// Fill one scanline: resolve every active polygon's span against a fresh
/// row color buffer and a fresh row depth buffer.
fn fill_row(
    polygons: &[Polygon],
    y: i32,
    width: usize,
    background: Color,
) -> Result<Vec<Color>, RenderError> {
    let mut colors = vec![background; width];
    // NEG_INFINITY marks "no fragment yet"; any finite depth beats it
    let mut depths = vec![f64::NEG_INFINITY; width];

    for polygon in polygons.iter().filter(|p| p.is_active(y)) {
        let spanning: Vec<&Edge> = polygon.edge_table.iter().filter(|e| e.spans(y)).collect();

        // Row-simplicity is decided on exact crossing positions: the two
        // edges meeting at a vertex always agree there, while their
        // truncated x values can land on adjacent integers and misreport
        // a convex outline as split.
        let mut positions: Vec<Crossing> = spanning.iter().map(|e| e.crossing_at(y)).collect();
        positions.sort_unstable();
        positions.dedup();

        if positions.is_empty() {
            return Err(RenderError::EmptySpan { y });
        }
        if positions.len() > 2 {
            return Err(RenderError::SplitSpan {
                y,
                crossings: positions.len(),
            });
        }

        // The fill boundaries themselves stay the min/max of the truncated
        // crossings, matching the intersector's truncation policy
        let mut left = spanning[0].x_at(y);
        let mut right = left;
        for edge in &spanning[1..] {
            let x = edge.x_at(y);
            left = left.min(x);
            right = right.max(x);
        }

        for x in left..=right {
            if x < 0 || x as usize >= width {
                continue;
            }
            let col = x as usize;
            let z = polygon.plane.depth_at(x, y);
            if z > depths[col] {
                colors[col] = polygon.color;
                depths[col] = z;
            }
        }
    }

    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::types::Vertex;

    const BG: Color = Color { r: 200, g: 200, b: 200 };
    const RED: Color = Color { r: 255, g: 0, b: 0 };
    const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    fn polygon(verts: &[(i32, i32, i32)], color: Color) -> Polygon {
        let verts = verts.iter().map(|&(x, y, z)| Vertex::new(x, y, z)).collect();
        Polygon::new(verts, color).unwrap()
    }

    #[test]
    fn triangle_fills_exactly_its_row_spans() {
        let mut fb = Framebuffer::new(16, 12, BG);
        let tri = polygon(&[(2, 1, 5), (8, 1, 5), (2, 7, 5)], RED);
        render_into(&mut fb, &[tri], BG).unwrap();

        // The hypotenuse runs from (8,1) to (2,7), so row y spans x in
        // [2, 9 − y] for y in 1..=7
        for y in 1..=11i32 {
            let row = fb.row_for_y(y).unwrap();
            for x in 0..16usize {
                let inside = (1..=7).contains(&y) && x >= 2 && x as i32 <= 9 - y;
                let expected = if inside { RED } else { BG };
                assert_eq!(fb.pixel(x, row), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn nearer_polygon_wins_regardless_of_order() {
        let near = polygon(&[(2, 2, 10), (10, 2, 10), (10, 8, 10), (2, 8, 10)], RED);
        let far = polygon(&[(4, 3, 5), (12, 3, 5), (12, 9, 5), (4, 9, 5)], BLUE);

        for polys in [
            vec![near.clone(), far.clone()],
            vec![far.clone(), near.clone()],
        ] {
            let mut fb = Framebuffer::new(16, 12, BG);
            render_into(&mut fb, &polys, BG).unwrap();
            let row = fb.row_for_y(5).unwrap();
            // In the overlap the nearer (greater z) rectangle shows
            assert_eq!(fb.pixel(6, row), RED);
            // Outside it the far one does
            assert_eq!(fb.pixel(11, row), BLUE);
        }
    }

    #[test]
    fn empty_polygon_list_is_a_no_op() {
        let mut fb = Framebuffer::new(8, 8, BG);
        render_into(&mut fb, &[], BG).unwrap();
        assert!(fb.pixels.iter().all(|&c| c == BG));
    }

    #[test]
    fn scaling_vertices_scales_the_render() {
        // The triangle from triangle_fills_exactly_its_row_spans, scaled
        // by 2: row 2·y spans x in [4, 18 − 2·y]
        let scaled: Vec<_> = [(2, 1, 5), (8, 1, 5), (2, 7, 5)]
            .iter()
            .map(|&(x, y, z)| (x * 2, y * 2, z * 2))
            .collect();
        let mut fb = Framebuffer::new(32, 20, BG);
        render_into(&mut fb, &[polygon(&scaled, RED)], BG).unwrap();

        for y in 1..=7i32 {
            let row = fb.row_for_y(2 * y).unwrap();
            let right = (18 - 2 * y) as usize;
            assert_eq!(fb.pixel(3, row), BG);
            assert_eq!(fb.pixel(4, row), RED);
            assert_eq!(fb.pixel(right, row), RED);
            assert_eq!(fb.pixel(right + 1, row), BG);
        }
    }

    #[test]
    fn row_mapping_is_bounds_checked() {
        let fb = Framebuffer::new(4, 10, BG);
        assert_eq!(fb.row_for_y(1), Some(9));
        assert_eq!(fb.row_for_y(10), Some(0));
        assert_eq!(fb.row_for_y(0), None);
        assert_eq!(fb.row_for_y(11), None);
        assert_eq!(fb.row_for_y(-3), None);
    }

    #[test]
    fn row_simple_violation_is_reported() {
        // Zigzag outline: interior scanlines cross the boundary at four
        // distinct x values
        let zig = polygon(&[(0, 0, 5), (4, 8, 5), (8, 0, 5), (12, 8, 5)], RED);
        let mut fb = Framebuffer::new(16, 12, BG);
        let err = render_into(&mut fb, &[zig], BG).unwrap_err();
        assert!(matches!(err, RenderError::SplitSpan { .. }));
        // A failed pass must not touch the framebuffer
        assert!(fb.pixels.iter().all(|&c| c == BG));
    }

    #[test]
    fn convex_quad_with_fractional_slopes_renders() {
        // Plainly convex, but no edge has an integer slope. On scanline 15
        // the two edges meeting at the vertex (14,15) truncate to adjacent
        // integers, which must not be mistaken for a third boundary.
        let quad = polygon(&[(2, 8, 5), (14, 15, 5), (4, 18, 5), (3, 15, 5)], RED);
        let mut fb = Framebuffer::new(20, 20, BG);
        render_into(&mut fb, &[quad], BG).unwrap();

        // Interior row y = 12: crossings at 18/7 and 62/7, span 2..=8
        let row = fb.row_for_y(12).unwrap();
        assert_eq!(fb.pixel(1, row), BG);
        for x in 2..=8 {
            assert_eq!(fb.pixel(x, row), RED, "column {}", x);
        }
        assert_eq!(fb.pixel(9, row), BG);

        // Vertex row y = 15: span runs from 3 out to the vertex at x = 14
        let row = fb.row_for_y(15).unwrap();
        assert_eq!(fb.pixel(2, row), BG);
        for x in 4..=13 {
            assert_eq!(fb.pixel(x, row), RED, "column {}", x);
        }
        assert_eq!(fb.pixel(15, row), BG);
    }

    #[test]
    fn spans_clip_against_the_buffer_edge() {
        // Span reaches from x = −2 to x = 9 on a width-8 buffer; only the
        // in-range columns are written
        let tri = polygon(&[(-2, 1, 5), (9, 1, 5), (-2, 6, 5)], RED);
        let mut fb = Framebuffer::new(8, 8, BG);
        render_into(&mut fb, &[tri], BG).unwrap();
        let row = fb.row_for_y(1).unwrap();
        assert_eq!(fb.pixel(0, row), RED);
        assert_eq!(fb.pixel(7, row), RED);
    }
}
