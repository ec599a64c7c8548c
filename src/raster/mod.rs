//! Scanline polygon renderer
//!
//! Fills flat, convex polygons row by row and resolves overlaps with a
//! per-scanline depth buffer:
//! - Implicit plane equation fitted to the first three vertices
//! - Edge table with horizontal edges dropped
//! - Per-row span from the min/max edge crossings
//! - Depth solved from the plane equation, greater z (nearer) wins

mod math;
mod types;
mod render;
mod scene;

pub use math::*;
pub use types::*;
pub use render::*;
pub use scene::*;

/// Default image dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;

/// Default background color
pub const BACKGROUND: Color = Color { r: 200, g: 200, b: 200 };
