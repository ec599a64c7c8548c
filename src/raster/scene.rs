//! Scene: the registered polygon set and the framebuffer it renders into

use super::render::{render_into, Framebuffer, RenderError};
use super::types::{Color, Polygon, PolygonError, Vertex};

/// Handle to a polygon registered with a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonHandle(usize);

/// Owns every registered polygon and the persistent image buffer.
///
/// All mutation goes through [`Scene::register_polygon`] and
/// [`Scene::clear`]; a polygon cannot be edited once registered. Render
/// passes read a consistent snapshot because the scene is borrowed for the
/// whole pass.
pub struct Scene {
    polygons: Vec<Polygon>,
    framebuffer: Framebuffer,
    background: Color,
}

impl Scene {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            polygons: Vec::new(),
            framebuffer: Framebuffer::new(width, height, background),
            background,
        }
    }

    /// Validate and register a polygon.
    ///
    /// On failure the scene is left unmodified.
    pub fn register_polygon(
        &mut self,
        vertices: Vec<Vertex>,
        color: Color,
    ) -> Result<PolygonHandle, PolygonError> {
        let polygon = Polygon::new(vertices, color)?;
        self.polygons.push(polygon);
        Ok(PolygonHandle(self.polygons.len() - 1))
    }

    /// Remove every polygon and reset the framebuffer to the background
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.framebuffer.clear(self.background);
    }

    /// Run a full render pass over the registered polygons.
    ///
    /// Every call recomputes the image from the current polygon set. On
    /// error the framebuffer keeps its previous contents.
    pub fn render(&mut self) -> Result<&Framebuffer, RenderError> {
        render_into(&mut self.framebuffer, &self.polygons, self.background)?;
        Ok(&self.framebuffer)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon(&self, handle: PolygonHandle) -> Option<&Polygon> {
        self.polygons.get(handle.0)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}
