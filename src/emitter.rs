//! Pooled particle emitter.
//!
//! An [`Emitter`] owns a fixed pool of [`Particle`]s. Every call to
//! [`Emitter::update`] does two things, in order:
//!
//! 1. **Emission** - banks `emission_rate * dt` particles and activates whole
//!    ones from the pool, each configured by sampling the emitter's
//!    [`ParticleConfig`].
//! 2. **Simulation** - advances every active particle (including the ones
//!    just emitted) and returns dead particles to the pool.
//!
//! Emission never grows the active set past the pool capacity; what cannot
//! be emitted in a frame is dropped.
//!
//! # Example
//!
//! ```
//! use fx2d::prelude::*;
//!
//! let mut emitter = Emitter::builder()
//!     .with_quantity(10)
//!     .with_emission_rate(10.0)
//!     .with_particle_config(ParticleConfig::new().with_position(320.0, 240.0))
//!     .with_seed(7)
//!     .build()
//!     .unwrap();
//!
//! emitter.update(0.1);
//! assert_eq!(emitter.stats().active, 1);
//! assert_eq!(emitter.stats().unused, 9);
//! ```

use crate::config::{EmitterConfig, ParticleConfig};
use crate::error::ConfigError;
use crate::particle::{Particle, ParticleInstance};
use crate::renderer::{RendererFactory, RendererPeer, SharedRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

/// Snapshot of an emitter's pool usage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EmitterStats {
    /// Pool capacity.
    pub quantity: usize,
    /// Particles per second.
    pub emission_rate: f32,
    /// Particles currently live.
    pub active: usize,
    /// Particles waiting in the pool.
    pub unused: usize,
}

impl fmt::Display for EmitterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "quantity: {}, emission_rate: {}, active: {}, unused: {}",
            self.quantity, self.emission_rate, self.active, self.unused
        )
    }
}

/// Builder for [`Emitter`].
pub struct EmitterBuilder {
    config: EmitterConfig,
    factory: Option<Box<dyn RendererFactory>>,
    rng: Option<StdRng>,
}

impl EmitterBuilder {
    pub fn new() -> Self {
        Self::from_config(EmitterConfig::default())
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: EmitterConfig) -> Self {
        Self {
            config,
            factory: None,
            rng: None,
        }
    }

    /// Pool capacity (default 128).
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.config.quantity = quantity;
        self
    }

    /// Particles per second.
    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.config.emission_rate = rate;
        self
    }

    pub fn with_particle_config(mut self, config: ParticleConfig) -> Self {
        self.config.particle = config;
        self
    }

    /// Create one peer per particle through `factory`.
    pub fn with_renderer_factory(mut self, factory: impl RendererFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Attach the same renderer to every particle.
    pub fn with_shared_renderer<R: RendererPeer + 'static>(self, renderer: R) -> Self {
        self.with_renderer_factory(SharedRenderer::new(renderer))
    }

    /// Seed the sampling RNG for reproducible effects.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Use an existing RNG; takes precedence over the seed.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and allocate the particle pool.
    pub fn build(self) -> Result<Emitter, ConfigError> {
        let Self { config, mut factory, rng } = self;
        config.validate()?;

        for name in config.particle.inverted_ranges() {
            tracing::warn!(target: "fx2d::emitter", range = name, "inverted range: low > high, sampling [high, low)");
        }

        let rng = match (rng, config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => StdRng::seed_from_u64(seed),
            (None, None) => StdRng::from_entropy(),
        };

        let mut particles = Vec::with_capacity(config.quantity);
        // validate() keeps quantity within u32.
        for slot in 0..config.quantity as u32 {
            let mut particle = Particle::with_slot(slot);
            if let Some(factory) = factory.as_mut() {
                let peer = factory.create_for(&particle);
                particle.attach_peer(peer);
            }
            particle.hide();
            particles.push(particle);
        }

        tracing::debug!(
            target: "fx2d::emitter",
            quantity = config.quantity,
            emission_rate = config.emission_rate,
            has_renderer = factory.is_some(),
            "allocated particle pool"
        );

        Ok(Emitter {
            quantity: config.quantity,
            emission_rate: config.emission_rate,
            emission: 0.0,
            particle_config: config.particle,
            particles,
            active: Vec::with_capacity(config.quantity),
            pool: (0..config.quantity).collect(),
            factory,
            rng,
        })
    }
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed-capacity particle emitter.
pub struct Emitter {
    quantity: usize,
    emission_rate: f32,
    /// Banked fractional particles.
    emission: f32,
    particle_config: ParticleConfig,
    /// Every particle, indexed by slot.
    particles: Vec<Particle>,
    /// Slots of live particles.
    active: Vec<usize>,
    /// Slots of pooled particles; popped from the back.
    pool: Vec<usize>,
    factory: Option<Box<dyn RendererFactory>>,
    rng: StdRng,
}

impl Emitter {
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new()
    }

    /// Build a headless emitter (no renderer) from a configuration.
    pub fn from_config(config: EmitterConfig) -> Result<Self, ConfigError> {
        EmitterBuilder::from_config(config).build()
    }

    /// Advance the effect by `dt` seconds: emit, then simulate.
    pub fn update(&mut self, dt: f32) {
        let emitted = self.emit(dt);

        if let Some(factory) = self.factory.as_mut() {
            factory.on_update_start();
        }
        let freed = self.simulate(dt);
        if let Some(factory) = self.factory.as_mut() {
            factory.on_update_end();
        }

        tracing::trace!(
            target: "fx2d::emitter",
            dt,
            emitted,
            freed,
            active = self.active.len(),
            "update"
        );
    }

    /// Activate as many particles as the banked emission allows.
    fn emit(&mut self, dt: f32) -> usize {
        let rate = self.emission_rate * dt;
        if !(rate > 0.0) {
            return 0;
        }

        self.emission += rate;
        let mut emitted = 0;
        while self.active.len() < self.quantity && self.emission >= rate {
            let Some(slot) = self.pool.pop() else {
                break;
            };
            let init = self.particle_config.resolve(&mut self.rng);
            let particle = &mut self.particles[slot];
            particle.reset(&init);
            particle.show();
            self.active.push(slot);
            self.emission -= 1.0;
            emitted += 1;
        }

        // Whatever could not fit in the pool is dropped, not carried over.
        if self.active.len() == self.quantity {
            self.emission = self.emission.min(0.0);
        }
        emitted
    }

    /// Update every active particle once; recycle the dead ones.
    fn simulate(&mut self, dt: f32) -> usize {
        let particles = &mut self.particles;
        let pool = &mut self.pool;
        let before = self.active.len();

        self.active.retain(|&slot| {
            let particle = &mut particles[slot];
            particle.update(dt);
            if particle.is_alive() {
                return true;
            }
            particle.hide();
            pool.push(slot);
            false
        });

        before - self.active.len()
    }

    /// Return every active particle to the pool and drop banked emission.
    pub fn clear(&mut self) {
        for slot in self.active.drain(..) {
            self.particles[slot].hide();
            self.pool.push(slot);
        }
        self.emission = 0.0;
    }

    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            quantity: self.quantity,
            emission_rate: self.emission_rate,
            active: self.active.len(),
            unused: self.pool.len(),
        }
    }

    // ========== Runtime control ==========

    #[inline]
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    #[inline]
    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    /// Change the emission rate. Negative or non-finite rates stop emission.
    pub fn set_emission_rate(&mut self, rate: f32) {
        if !rate.is_finite() || rate < 0.0 {
            tracing::warn!(target: "fx2d::emitter", rate, "ignoring invalid emission rate, using 0");
            self.emission_rate = 0.0;
            return;
        }
        self.emission_rate = rate;
    }

    #[inline]
    pub fn particle_config(&self) -> &ParticleConfig {
        &self.particle_config
    }

    /// Replace the template; affects particles emitted from now on.
    pub fn set_particle_config(&mut self, config: ParticleConfig) {
        self.particle_config = config;
    }

    // ========== Inspection ==========

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn pool_count(&self) -> usize {
        self.pool.len()
    }

    /// Slots of the live particles.
    pub fn active_slots(&self) -> &[usize] {
        &self.active
    }

    /// Slots of the pooled particles.
    pub fn pooled_slots(&self) -> &[usize] {
        &self.pool
    }

    /// Iterate the live particles.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().map(move |&slot| &self.particles[slot])
    }

    /// Renderable snapshots of the live particles.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles().map(Particle::instance).collect()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("stats", &self.stats())
            .field("emission", &self.emission)
            .field("has_renderer", &self.factory.is_some())
            .finish()
    }
}
