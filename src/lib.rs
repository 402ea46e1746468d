//! # fx2d
//!
//! 2D particle effects for real-time rendering: smoke, bursts, trails.
//!
//! fx2d simulates a bounded pool of particles driven by an [`Emitter`]. The
//! emitter spawns particles at a controlled rate, integrates their motion,
//! color and scale every frame, and recycles them when they die. Your frame
//! loop supplies the elapsed time and owns the drawing; fx2d only produces
//! particle state and notifies a renderer.
//!
//! ## Quick Start
//!
//! ```
//! use fx2d::prelude::*;
//!
//! let mut emitter = Emitter::builder()
//!     .with_quantity(200)
//!     .with_emission_rate(60.0)
//!     .with_particle_config(
//!         ParticleConfig::new()
//!             .with_position(320.0, 320.0)
//!             .with_colors(Color::new(1.0, 0.0, 1.0, 1.0), Color::new(1.0, 1.0, 1.0, 0.0))
//!             .with_angle(90.0)
//!             .with_angle_range(-35.0..10.0)
//!             .with_speed(90.0)
//!             .with_gravity(0.0, 20.0)
//!             .with_life_time(7.0),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // Once per frame:
//! emitter.update(1.0 / 60.0);
//! for particle in emitter.particles() {
//!     let _ = (particle.position(), particle.size(), particle.color());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] has a position, velocity, gravity, radial and tangential
//! acceleration (relative to its spawn point), and a life time over which
//! its color and scale move linearly from start to end values.
//!
//! ### Configuration
//!
//! A [`ParticleConfig`] holds a base value and an optional random
//! [`ValueRange`] per attribute. Unset attributes use the particle
//! defaults: green, size 5, speed 100, angle 0, life time 100 seconds.
//! [`EmitterConfig`] adds the pool size and emission rate and loads from JSON.
//!
//! ### Renderers
//!
//! Each pooled particle carries a [`RendererPeer`] created by a
//! [`RendererFactory`]. Peers are shown on emission, synced every live
//! frame, and hidden on death. Built-in renderers:
//!
//! | Renderer | Description |
//! |----------|-------------|
//! | [`SharedRenderer`] | Wraps any peer so all particles share it |
//! | [`InstanceBatch`] | Collects `#[repr(C)]` instances for GPU upload |
//! | `CanvasRenderer` | Draws into an `image::RgbaImage` (optional feature `canvas`, off by default) |

#[cfg(feature = "canvas")]
pub mod canvas;
mod color;
pub mod config;
mod emitter;
pub mod error;
pub mod particle;
pub mod presets;
mod range;
pub mod renderer;
pub mod time;
mod vector;

pub use bytemuck;
#[cfg(feature = "canvas")]
pub use canvas::CanvasRenderer;
pub use color::Color;
pub use config::{EmitterConfig, ParticleConfig};
pub use emitter::{Emitter, EmitterBuilder, EmitterStats};
pub use error::ConfigError;
pub use glam::{Vec2, Vec4};
pub use particle::{Particle, ParticleInit, ParticleInstance};
pub use range::{ColorRange, ValueRange};
pub use renderer::{InstanceBatch, RendererFactory, RendererPeer, SharedRenderer};
pub use time::FrameClock;
pub use vector::{Vector2, Vector2Ext};

/// Convenient re-exports for common usage.
///
/// ```
/// use fx2d::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "canvas")]
    pub use crate::canvas::CanvasRenderer;
    pub use crate::color::Color;
    pub use crate::config::{EmitterConfig, ParticleConfig};
    pub use crate::emitter::{Emitter, EmitterBuilder, EmitterStats};
    pub use crate::error::ConfigError;
    pub use crate::particle::{Particle, ParticleInit, ParticleInstance};
    pub use crate::presets;
    pub use crate::range::{ColorRange, ValueRange};
    pub use crate::renderer::{InstanceBatch, RendererFactory, RendererPeer, SharedRenderer};
    pub use crate::time::FrameClock;
    pub use crate::vector::{Vector2, Vector2Ext};
    pub use crate::{Vec2, Vec4};
}
