//! Ready-made effects.
//!
//! Each preset returns an [`EmitterConfig`] positioned relative to the
//! given point, in pixels with `y` pointing down.
//!
//! ```
//! use fx2d::prelude::*;
//!
//! let mut smoke = Emitter::from_config(presets::white_red_smoke(Vec2::new(320.0, 360.0))).unwrap();
//! smoke.update(1.0 / 60.0);
//! ```

use crate::color::Color;
use crate::config::{EmitterConfig, ParticleConfig};
use glam::Vec2;

/// Slow blue smoke that swirls outward from `center`.
///
/// Negative radial and positive tangential acceleration curl particles
/// around their spawn point while they grow and darken.
pub fn blue_swirling_smoke(center: Vec2) -> EmitterConfig {
    EmitterConfig {
        quantity: 200,
        emission_rate: 200.0,
        particle: ParticleConfig::new()
            .with_position(center.x, center.y)
            .with_position_range(-10.0..10.0, -5.0..5.0)
            .with_colors(Color::new(0.5, 0.5, 1.0, 1.0), Color::new(0.0, 0.0, 0.0, 1.0))
            .with_angle(0.0)
            .with_angle_range(0.0..360.0)
            .with_size(32.0)
            .with_size_range(0.0..4.0)
            .with_scale(0.5, 1.5)
            .with_speed(10.0)
            .with_speed_range(0.0..5.0)
            .with_radial_acceleration(-3.0)
            .with_tangential_acceleration(6.0)
            .with_life_time(6.0)
            .with_life_time_range(0.0..2.0),
        seed: None,
    }
}

/// Small magenta squares fountaining up from `origin` and fading to white.
pub fn square_burst(origin: Vec2) -> EmitterConfig {
    EmitterConfig {
        quantity: 200,
        emission_rate: 60.0,
        particle: ParticleConfig::new()
            .with_position(origin.x, origin.y)
            .with_position_range(-3.0..3.0, 0.0..0.0)
            .with_colors(Color::new(1.0, 0.0, 1.0, 1.0), Color::new(1.0, 1.0, 1.0, 0.0))
            .with_scale(0.5, 3.0)
            .with_angle(90.0)
            .with_angle_range(-35.0..10.0)
            .with_size(4.0)
            .with_speed(90.0)
            .with_speed_range(-10.0..10.0)
            .with_gravity(0.0, 20.0)
            .with_radial_acceleration(-2.0)
            .with_tangential_acceleration(10.0)
            .with_life_time(7.0)
            .with_life_time_range(-1.0..1.0),
        seed: None,
    }
}

/// White smoke drifting up and left from `origin`, turning red as it fades.
pub fn white_red_smoke(origin: Vec2) -> EmitterConfig {
    EmitterConfig {
        quantity: 100,
        emission_rate: 15.0,
        particle: ParticleConfig::new()
            .with_position(origin.x, origin.y)
            .with_position_range(-1.0..1.0, 0.0..0.0)
            .with_colors(Color::WHITE, Color::new(1.0, 0.0, 0.0, 0.0))
            .with_scale(1.0, 2.0)
            .with_angle(90.0)
            .with_angle_range(-30.0..30.0)
            .with_size(32.0)
            .with_speed(40.0)
            .with_speed_range(0.0..15.0)
            .with_gravity(-6.0, 10.0)
            .with_life_time(5.0)
            .with_life_time_range(0.0..2.0),
        seed: None,
    }
}
