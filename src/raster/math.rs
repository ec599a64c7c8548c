//! Scanline geometry: plane fitting, edge tables and edge/scanline
//! intersection.

use std::cmp::Ordering;

use super::types::{Plane, Vertex};

/// A non-horizontal polygon edge, kept for scanline intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

impl Edge {
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    /// Check whether scanline `y` lies within this edge's vertical range
    /// (endpoints inclusive).
    pub fn spans(&self, y: i32) -> bool {
        y >= self.start.y.min(self.end.y) && y <= self.start.y.max(self.end.y)
    }

    /// Solve for the x-coordinate where this edge crosses scanline `y`.
    ///
    /// Vertical edges return their constant x. Everything else goes through
    /// the slope/intercept form with the result truncated toward zero;
    /// truncation (not rounding) fixes the fill boundaries and must stay.
    ///
    /// The caller guarantees `y` is within the edge's vertical range (see
    /// [`Edge::spans`]); the edge table never contains horizontal edges, so
    /// the slope is never zero.
    pub fn x_at(&self, y: i32) -> i32 {
        if self.start.x == self.end.x {
            return self.start.x;
        }
        let m = f64::from(self.end.y - self.start.y) / f64::from(self.end.x - self.start.x);
        let b = f64::from(self.start.y) - m * f64::from(self.start.x);
        ((f64::from(y) - b) / m) as i32
    }

    /// Exact position where this edge crosses scanline `y`, for the
    /// row-simplicity check. [`Edge::x_at`] stays the authoritative
    /// (truncated) fill boundary; this exists because two edges meeting at
    /// a vertex must compare equal on the vertex's own scanline, which the
    /// truncated values cannot guarantee.
    ///
    /// The edge must not be horizontal; the edge table never holds one.
    pub fn crossing_at(&self, y: i32) -> Crossing {
        let dy = i64::from(self.end.y) - i64::from(self.start.y);
        let dx = i64::from(self.end.x) - i64::from(self.start.x);
        let num = i64::from(self.start.x) * dy + (i64::from(y) - i64::from(self.start.y)) * dx;
        if dy < 0 {
            Crossing { num: -num, den: -dy }
        } else {
            Crossing { num, den: dy }
        }
    }
}

/// Exact x-position of an edge/scanline crossing, kept as the rational
/// `num / den` (with `den > 0`) so positions compare without rounding.
#[derive(Debug, Clone, Copy)]
pub struct Crossing {
    num: i64,
    den: i64,
}

impl Ord for Crossing {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cross-multiplication; both denominators are positive
        let lhs = i128::from(self.num) * i128::from(other.den);
        let rhs = i128::from(other.num) * i128::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Crossing {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Crossing {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Crossing {}

impl From<i32> for Crossing {
    fn from(x: i32) -> Self {
        Crossing { num: i64::from(x), den: 1 }
    }
}

/// Fit the implicit plane `a·x + b·y + c·z + d = 0` through the first three
/// vertices.
///
/// The normal is the cross product of the two edge vectors out of
/// `vertices[0]`, and `d = −(normal · vertices[0])`. The slice must hold
/// at least three vertices (the caller validates the length first);
/// vertices beyond the first three are not consulted, so the polygon is
/// assumed planar. Collinear defining vertices produce a zero normal (so
/// `c == 0`), which the caller must reject.
pub fn solve_plane(vertices: &[Vertex]) -> Plane {
    let v1 = delta(vertices[0], vertices[1]);
    let v2 = delta(vertices[0], vertices[2]);
    let [a, b, c] = cross(v1, v2);
    let d = -(a * i64::from(vertices[0].x)
        + b * i64::from(vertices[0].y)
        + c * i64::from(vertices[0].z));
    Plane { a, b, c, d }
}

/// Build the closed polygon boundary as scanline-relevant edges.
///
/// Vertex `i` is paired with vertex `i − 1`, wrapping to the last vertex
/// for the first. Pairs with equal y are dropped: a horizontal edge crosses
/// its own scanline everywhere at once, contributes nothing to the
/// left/right boundary search, and would divide by zero in [`Edge::x_at`].
pub fn build_edge_table(vertices: &[Vertex]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(vertices.len());
    for i in 0..vertices.len() {
        let prev = vertices[if i == 0 { vertices.len() - 1 } else { i - 1 }];
        let cur = vertices[i];
        if cur.y != prev.y {
            edges.push(Edge::new(cur, prev));
        }
    }
    edges
}

fn delta(from: Vertex, to: Vertex) -> [i64; 3] {
    [
        i64::from(to.x) - i64::from(from.x),
        i64::from(to.y) - i64::from(from.y),
        i64::from(to.z) - i64::from(from.z),
    ]
}

fn cross(u: [i64; 3], v: [i64; 3]) -> [i64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}
