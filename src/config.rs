//! Emitter and particle configuration.
//!
//! [`ParticleConfig`] is the template an emitter samples every time it
//! emits a particle. Each attribute has an optional base value and an
//! optional [`ValueRange`]; the emitted value is `base + range.sample()`.
//! An attribute without a base is left unset, so the particle falls back to
//! its own default (see [`crate::particle`]) rather than to zero.
//!
//! Both types serialize to JSON:
//!
//! ```
//! use fx2d::EmitterConfig;
//!
//! let config = EmitterConfig::from_json(r#"{
//!     "quantity": 200,
//!     "emission_rate": 60,
//!     "particle": {
//!         "x": 320, "x_range": [-3, 3],
//!         "start_colour": [1, 0, 1, 1],
//!         "angle": 90, "angle_range": [-35, 10],
//!         "life_time": 7
//!     }
//! }"#).unwrap();
//! assert_eq!(config.quantity, 200);
//! ```

use crate::color::Color;
use crate::error::ConfigError;
use crate::particle::ParticleInit;
use crate::range::{ColorRange, ValueRange};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default pool capacity.
pub const DEFAULT_QUANTITY: usize = 128;

fn default_quantity() -> usize {
    DEFAULT_QUANTITY
}

/// Per-particle configuration template.
///
/// Every field is optional. Build one with struct update syntax or the
/// `with_*` methods:
///
/// ```
/// use fx2d::{Color, ParticleConfig};
///
/// let config = ParticleConfig::new()
///     .with_position(320.0, 240.0)
///     .with_position_range(-10.0..10.0, -5.0..5.0)
///     .with_colors(Color::new(0.5, 0.5, 1.0, 1.0), Color::BLACK)
///     .with_angle(0.0)
///     .with_angle_range(0.0..360.0)
///     .with_life_time(6.0)
///     .with_life_time_range(0.0..2.0);
/// assert_eq!(config.x, Some(320.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub x: Option<f32>,
    pub x_range: Option<ValueRange>,
    pub y: Option<f32>,
    pub y_range: Option<ValueRange>,

    #[serde(alias = "start_colour")]
    pub start_color: Option<Color>,
    #[serde(alias = "start_colour_range")]
    pub start_color_range: Option<ColorRange>,
    #[serde(alias = "end_colour")]
    pub end_color: Option<Color>,
    #[serde(alias = "end_colour_range")]
    pub end_color_range: Option<ColorRange>,

    pub start_scale: Option<f32>,
    pub start_scale_range: Option<ValueRange>,
    pub end_scale: Option<f32>,
    pub end_scale_range: Option<ValueRange>,

    /// Degrees; 0 points right, 90 points up.
    pub angle: Option<f32>,
    pub angle_range: Option<ValueRange>,
    /// Pixels per second.
    pub speed: Option<f32>,
    pub speed_range: Option<ValueRange>,
    /// Pixels.
    pub size: Option<f32>,
    pub size_range: Option<ValueRange>,

    /// Pixels per second squared.
    pub gravity_x: Option<f32>,
    pub gravity_x_range: Option<ValueRange>,
    pub gravity_y: Option<f32>,
    pub gravity_y_range: Option<ValueRange>,
    pub radial_acceleration: Option<f32>,
    pub radial_acceleration_range: Option<ValueRange>,
    pub tangential_acceleration: Option<f32>,
    pub tangential_acceleration_range: Option<ValueRange>,

    /// Seconds.
    pub life_time: Option<f32>,
    pub life_time_range: Option<ValueRange>,
}

/// `base + sample(range)`, or `None` when no base is configured.
fn resolve<R: Rng + ?Sized>(base: Option<f32>, range: Option<ValueRange>, rng: &mut R) -> Option<f32> {
    let base = base?;
    Some(base + range.map_or(0.0, |r| r.sample(rng)))
}

fn resolve_color<R: Rng + ?Sized>(base: Option<Color>, range: Option<ColorRange>, rng: &mut R) -> Option<Color> {
    let base = base?;
    Some(range.map_or(base, |r| base + r.sample(rng)))
}

impl ParticleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample every range-bearing field once, independently.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleInit {
        ParticleInit {
            x: resolve(self.x, self.x_range, rng),
            y: resolve(self.y, self.y_range, rng),
            color: resolve_color(self.start_color, self.start_color_range, rng),
            end_color: resolve_color(self.end_color, self.end_color_range, rng),
            scale: resolve(self.start_scale, self.start_scale_range, rng),
            end_scale: resolve(self.end_scale, self.end_scale_range, rng),
            gravity_x: resolve(self.gravity_x, self.gravity_x_range, rng),
            gravity_y: resolve(self.gravity_y, self.gravity_y_range, rng),
            radial_acceleration: resolve(self.radial_acceleration, self.radial_acceleration_range, rng),
            tangential_acceleration: resolve(
                self.tangential_acceleration,
                self.tangential_acceleration_range,
                rng,
            ),
            size: resolve(self.size, self.size_range, rng),
            speed: resolve(self.speed, self.speed_range, rng),
            angle: resolve(self.angle, self.angle_range, rng),
            life_time: resolve(self.life_time, self.life_time_range, rng),
        }
    }

    /// Names of ranges whose `low` exceeds `high`.
    ///
    /// These still sample fine (as `[high, low)`), but usually indicate a typo.
    pub fn inverted_ranges(&self) -> Vec<&'static str> {
        let scalar = [
            ("x_range", self.x_range),
            ("y_range", self.y_range),
            ("start_scale_range", self.start_scale_range),
            ("end_scale_range", self.end_scale_range),
            ("angle_range", self.angle_range),
            ("speed_range", self.speed_range),
            ("size_range", self.size_range),
            ("gravity_x_range", self.gravity_x_range),
            ("gravity_y_range", self.gravity_y_range),
            ("radial_acceleration_range", self.radial_acceleration_range),
            ("tangential_acceleration_range", self.tangential_acceleration_range),
            ("life_time_range", self.life_time_range),
        ];
        let color = [
            ("start_color_range", self.start_color_range),
            ("end_color_range", self.end_color_range),
        ];

        let mut names: Vec<&'static str> = scalar
            .into_iter()
            .filter(|(_, r)| r.is_some_and(|r| r.is_inverted()))
            .map(|(name, _)| name)
            .collect();
        names.extend(
            color
                .into_iter()
                .filter(|(_, r)| r.is_some_and(|r| r.is_inverted()))
                .map(|(name, _)| name),
        );
        names
    }

    // ========== Builder ==========

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Offsets the base position. Like every `*_range` builder this never
    /// sets a base: without [`with_position`](Self::with_position) the
    /// range is ignored.
    pub fn with_position_range(mut self, x: impl Into<ValueRange>, y: impl Into<ValueRange>) -> Self {
        self.x_range = Some(x.into());
        self.y_range = Some(y.into());
        self
    }

    pub fn with_colors(mut self, start: Color, end: Color) -> Self {
        self.start_color = Some(start);
        self.end_color = Some(end);
        self
    }

    pub fn with_color_ranges(mut self, start: ColorRange, end: ColorRange) -> Self {
        self.start_color_range = Some(start);
        self.end_color_range = Some(end);
        self
    }

    pub fn with_scale(mut self, start: f32, end: f32) -> Self {
        self.start_scale = Some(start);
        self.end_scale = Some(end);
        self
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.angle = Some(degrees);
        self
    }

    /// Offsets the base angle; ignored unless [`with_angle`](Self::with_angle) is set.
    pub fn with_angle_range(mut self, range: impl Into<ValueRange>) -> Self {
        self.angle_range = Some(range.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_speed_range(mut self, range: impl Into<ValueRange>) -> Self {
        self.speed_range = Some(range.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_size_range(mut self, range: impl Into<ValueRange>) -> Self {
        self.size_range = Some(range.into());
        self
    }

    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity_x = Some(x);
        self.gravity_y = Some(y);
        self
    }

    pub fn with_radial_acceleration(mut self, accel: f32) -> Self {
        self.radial_acceleration = Some(accel);
        self
    }

    pub fn with_tangential_acceleration(mut self, accel: f32) -> Self {
        self.tangential_acceleration = Some(accel);
        self
    }

    pub fn with_life_time(mut self, seconds: f32) -> Self {
        self.life_time = Some(seconds);
        self
    }

    pub fn with_life_time_range(mut self, range: impl Into<ValueRange>) -> Self {
        self.life_time_range = Some(range.into());
        self
    }
}

/// Complete emitter configuration, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Pool capacity.
    #[serde(default = "default_quantity")]
    pub quantity: usize,
    /// Particles per second.
    #[serde(default)]
    pub emission_rate: f32,
    /// Template for every emitted particle.
    #[serde(default, alias = "particle_config")]
    pub particle: ParticleConfig,
    /// Seed for range sampling; entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            quantity: DEFAULT_QUANTITY,
            emission_rate: 0.0,
            particle: ParticleConfig::default(),
            seed: None,
        }
    }
}

impl EmitterConfig {
    /// Check pool capacity (`1..=u32::MAX`) and emission rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantity == 0 || self.quantity > u32::MAX as usize {
            return Err(ConfigError::InvalidQuantity(self.quantity));
        }
        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            return Err(ConfigError::InvalidEmissionRate(self.emission_rate));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!(target: "fx2d::config", path = %path.display(), quantity = config.quantity, "loaded emitter config");
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        tracing::info!(target: "fx2d::config", path = %path.display(), "saved emitter config");
        Ok(())
    }
}
