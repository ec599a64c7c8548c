//! Shape descriptor loading
//!
//! Shapes arrive as JSON files holding a vertex list and a fill color.
//! Vertex coordinates are uniformly scaled and truncated to integer units
//! before registration; validating the descriptor's shape (array arity,
//! channel range) happens here, geometric validation happens in the core.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::raster::{Color, Vertex};

/// Scale factor applied to descriptor coordinates before registration
pub const SHAPE_SCALE: f64 = 20.0;

/// Error type for shape loading
#[derive(Debug)]
pub enum ShapeError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
}

impl From<std::io::Error> for ShapeError {
    fn from(e: std::io::Error) -> Self {
        ShapeError::IoError(e)
    }
}

impl From<serde_json::Error> for ShapeError {
    fn from(e: serde_json::Error) -> Self {
        ShapeError::ParseError(e)
    }
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::IoError(e) => write!(f, "IO error: {}", e),
            ShapeError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// On-disk shape descriptor
#[derive(Debug, Clone, Deserialize)]
struct ShapeDesc {
    vertices: Vec<[f64; 3]>,
    color: [u8; 3],
}

/// A shape ready for registration: scaled vertices plus its color
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub vertices: Vec<Vertex>,
    pub color: Color,
}

/// Load a shape descriptor from a JSON file, scaling vertices by `scale`
pub fn load_shape<P: AsRef<Path>>(path: P, scale: f64) -> Result<Shape, ShapeError> {
    let contents = fs::read_to_string(path)?;
    parse_shape(&contents, scale)
}

/// Parse a shape descriptor from a JSON string (for embedded shapes or
/// testing)
pub fn parse_shape(s: &str, scale: f64) -> Result<Shape, ShapeError> {
    let desc: ShapeDesc = serde_json::from_str(s)?;
    let vertices = desc
        .vertices
        .iter()
        .map(|&[x, y, z]| scale_vertex(x, y, z, scale))
        .collect();
    let [r, g, b] = desc.color;

    Ok(Shape {
        vertices,
        color: Color::new(r, g, b),
    })
}

/// Scale one raw coordinate triple, truncating to integer units
fn scale_vertex(x: f64, y: f64, z: f64, scale: f64) -> Vertex {
    Vertex::new(
        (x * scale) as i32,
        (y * scale) as i32,
        (z * scale) as i32,
    )
}
