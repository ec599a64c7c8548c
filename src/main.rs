//! polyscan: scanline polygon renderer with per-scanline z-buffering
//!
//! Flat polygons are loaded from JSON shape descriptors, registered with a
//! scene and rendered with a scanline fill whose overlaps are resolved by
//! a depth buffer. The window shows the rendered framebuffer with axis and
//! vertex-label decorations on top.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod raster;
mod shapes;
mod viewer;

use macroquad::prelude::*;

use raster::{Framebuffer, Scene, BACKGROUND, HEIGHT, WIDTH};
use shapes::SHAPE_SCALE;
use viewer::{draw_axes, draw_vertex_labels};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("polyscan v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

/// Upload the framebuffer to a screen texture
fn framebuffer_texture(fb: &Framebuffer) -> Texture2D {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.to_rgba_bytes());
    texture.set_filter(FilterMode::Nearest);
    texture
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut scene = Scene::new(WIDTH, HEIGHT, BACKGROUND);
    let mut texture = framebuffer_texture(scene.framebuffer());

    println!("=== polyscan v{} ===", VERSION);
    println!("O: open shape  C: clear scene  S: save PNG");

    loop {
        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::O) {
            let dialog = rfd::FileDialog::new()
                .add_filter("JSON Shape", &["json"])
                .set_directory("assets/shapes");

            if let Some(path) = dialog.pick_file() {
                match shapes::load_shape(&path, SHAPE_SCALE) {
                    Ok(shape) => match scene.register_polygon(shape.vertices, shape.color) {
                        Ok(_) => println!("Loaded {}", path.display()),
                        Err(e) => eprintln!("Rejected {}: {}", path.display(), e),
                    },
                    Err(e) => eprintln!("Failed to load {}: {}", path.display(), e),
                }

                match scene.render() {
                    Ok(fb) => texture = framebuffer_texture(fb),
                    Err(e) => eprintln!("Render failed: {}", e),
                }
            }
        }

        if is_key_pressed(KeyCode::C) {
            scene.clear();
            texture = framebuffer_texture(scene.framebuffer());
            println!("Scene cleared");
        }

        #[cfg(not(target_arch = "wasm32"))]
        if is_key_pressed(KeyCode::S) {
            let dialog = rfd::FileDialog::new()
                .add_filter("PNG Image", &["png"])
                .set_file_name("render.png");

            if let Some(path) = dialog.save_file() {
                match scene.framebuffer().save_png(&path) {
                    Ok(()) => println!("Saved {}", path.display()),
                    Err(e) => eprintln!("{}", e),
                }
            }
        }

        clear_background(WHITE);
        draw_texture(&texture, 0.0, 0.0, WHITE);
        draw_axes(HEIGHT as f32);
        draw_vertex_labels(scene.polygons(), HEIGHT as f32);

        next_frame().await;
    }
}
