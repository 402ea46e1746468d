//! Software canvas renderer backed by the `image` crate.
//!
//! [`CanvasRenderer`] is a shared-surface renderer: every particle of an
//! emitter draws into the same [`RgbaImage`]. The canvas is cleared before
//! each simulation pass and every live particle is blended in as a filled
//! square of side `size`, centered on its position. Colors are clamped to
//! `0.0..=1.0` here, not in the simulation.
//!
//! ```
//! use fx2d::prelude::*;
//!
//! let canvas = CanvasRenderer::new(64, 64);
//! let mut emitter = Emitter::builder()
//!     .with_quantity(8)
//!     .with_emission_rate(30.0)
//!     .with_particle_config(ParticleConfig::new().with_position(32.0, 32.0).with_speed(0.0))
//!     .with_renderer_factory(canvas.clone())
//!     .build()
//!     .unwrap();
//!
//! emitter.update(0.1);
//! assert_eq!(canvas.frames(), 1);
//! assert_ne!(canvas.pixel(32, 32)[3], 0);
//! ```

use crate::color::Color;
use crate::particle::{Particle, ParticleInstance};
use crate::renderer::{RendererFactory, RendererPeer};
use image::{ImageResult, Rgba, RgbaImage};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

struct Surface {
    image: RgbaImage,
    background: Rgba<u8>,
    frames: u64,
}

impl Surface {
    /// Source-over blend of a `size`-wide square centered on `(cx, cy)`.
    fn fill_square(&mut self, cx: f32, cy: f32, size: f32, color: Color) {
        if !(size > 0.0) || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let (width, height) = self.image.dimensions();
        let x0 = (cx - size / 2.0).round().max(0.0);
        let y0 = (cy - size / 2.0).round().max(0.0);
        let x1 = (cx + size / 2.0).round().min(width as f32);
        let y1 = (cy + size / 2.0).round().min(height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let [r, g, b, a] = color.to_array().map(|c| c.clamp(0.0, 1.0));
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let dst = self.image.get_pixel_mut(x, y);
                *dst = blend(*dst, [r, g, b], a);
            }
        }
    }
}

fn blend(dst: Rgba<u8>, src: [f32; 3], alpha: f32) -> Rgba<u8> {
    let Rgba([dr, dg, db, da]) = dst;
    let dst_alpha = da as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: f32, d: u8| {
        let d = d as f32 / 255.0;
        let v = (s * alpha + d * dst_alpha * (1.0 - alpha)) / out_alpha;
        (v * 255.0).round() as u8
    };
    Rgba([
        channel(src[0], dr),
        channel(src[1], dg),
        channel(src[2], db),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Shared canvas renderer; clones share the same surface.
#[derive(Clone)]
pub struct CanvasRenderer {
    surface: Rc<RefCell<Surface>>,
}

impl CanvasRenderer {
    /// A transparent canvas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::TRANSPARENT)
    }

    /// A canvas cleared to `background` at the start of every update.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        let background = Rgba(background.to_rgba8());
        Self {
            surface: Rc::new(RefCell::new(Surface {
                image: RgbaImage::from_pixel(width, height, background),
                background,
                frames: 0,
            })),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.borrow().image.dimensions()
    }

    /// Number of completed updates drawn into the canvas.
    pub fn frames(&self) -> u64 {
        self.surface.borrow().frames
    }

    /// RGBA value of one pixel.
    ///
    /// Panics if `(x, y)` is outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.surface.borrow().image.get_pixel(x, y).0
    }

    /// Copy of the current canvas contents.
    pub fn snapshot(&self) -> RgbaImage {
        self.surface.borrow().image.clone()
    }

    /// Write the current canvas to an image file; format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let path = path.as_ref();
        self.surface.borrow().image.save(path)?;
        tracing::debug!(target: "fx2d::canvas", path = %path.display(), "saved canvas");
        Ok(())
    }

    pub fn clear(&self) {
        let mut surface = self.surface.borrow_mut();
        let background = surface.background;
        surface.image.pixels_mut().for_each(|p| *p = background);
    }
}

impl RendererPeer for CanvasRenderer {
    // Visibility is implicit: hidden particles are simply not drawn.
    fn show(&mut self, _particle: &ParticleInstance) {}

    fn hide(&mut self, _particle: &ParticleInstance) {}

    fn sync(&mut self, particle: &ParticleInstance) {
        let [x, y] = particle.position;
        self.surface
            .borrow_mut()
            .fill_square(x, y, particle.size, Color::from(particle.color));
    }
}

impl RendererFactory for CanvasRenderer {
    fn create_for(&mut self, _particle: &Particle) -> Box<dyn RendererPeer> {
        Box::new(self.clone())
    }

    fn on_update_start(&mut self) {
        self.clear();
    }

    fn on_update_end(&mut self) {
        self.surface.borrow_mut().frames += 1;
    }
}
