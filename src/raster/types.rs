//! Core data types for the scanline renderer

use super::math::{build_edge_table, solve_plane, Edge};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to [u8; 3] for image export
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to [u8; 4] for the screen texture
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// A vertex in integer screen/world units (after scaling).
///
/// World y grows upward; the framebuffer flips it when rows are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Implicit plane `a·x + b·y + c·z + d = 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plane {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
}

impl Plane {
    /// Depth of the plane at column `x` on scanline `y`.
    ///
    /// `c` is non-zero for every plane that survives polygon construction.
    pub fn depth_at(&self, x: i32, y: i32) -> f64 {
        -((self.a * i64::from(x) + self.b * i64::from(y) + self.d) as f64) / self.c as f64
    }
}

/// Error type for polygon registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonError {
    /// Fewer than three vertices were supplied
    TooFewVertices(usize),
    /// The three defining vertices fit no usable plane (`c == 0`)
    DegeneratePlane,
}

impl std::fmt::Display for PolygonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolygonError::TooFewVertices(n) => {
                write!(f, "a polygon needs at least 3 vertices, got {}", n)
            }
            PolygonError::DegeneratePlane => write!(
                f,
                "the first three vertices are collinear or fit a plane with no depth axis"
            ),
        }
    }
}

/// A registered polygon with its derived scanline data.
///
/// Immutable after construction: the plane, edge table and vertical range
/// are computed once at registration and never updated.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub color: Color,
    pub plane: Plane,
    pub edge_table: Vec<Edge>,
    pub y_min: i32,
    pub y_max: i32,
}

impl Polygon {
    /// Validate the vertex list and derive the plane, edge table and
    /// vertical range.
    ///
    /// Vertex order defines edge adjacency. The plane is fitted to the
    /// first three vertices only, so the full vertex set must be coplanar
    /// for the depth values to mean anything; the fill also assumes the
    /// outline is convex (or at least crosses each scanline at most twice).
    pub fn new(vertices: Vec<Vertex>, color: Color) -> Result<Self, PolygonError> {
        if vertices.len() < 3 {
            return Err(PolygonError::TooFewVertices(vertices.len()));
        }

        let plane = solve_plane(&vertices);
        if plane.c == 0 {
            return Err(PolygonError::DegeneratePlane);
        }

        let edge_table = build_edge_table(&vertices);

        let mut y_min = vertices[0].y;
        let mut y_max = vertices[0].y;
        for v in &vertices[1..] {
            y_min = y_min.min(v.y);
            y_max = y_max.max(v.y);
        }

        Ok(Self {
            vertices,
            color,
            plane,
            edge_table,
            y_min,
            y_max,
        })
    }

    /// Whether scanline `y` falls within this polygon's vertical extent
    pub fn is_active(&self, y: i32) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}
