//! A single 2D particle: kinematics plus lifetime-driven color and scale.
//!
//! Particles are never created or destroyed during a simulation. The
//! [`Emitter`](crate::Emitter) allocates a fixed pool up front and recycles
//! slots through [`Particle::reset`].
//!
//! # Motion model
//!
//! Each frame the particle's force is gravity plus, once it has moved away
//! from its spawn point, a radial component along `position - origin` and a
//! tangential component perpendicular to it. Position advances per axis by
//! `velocity * dt + (force * dt)² / 2` and velocity then gains `force * dt`.
//!
//! Screen coordinates are assumed: an `angle` of 90 degrees points up, which
//! is negative `y`.

use crate::color::Color;
use crate::renderer::RendererPeer;
use crate::vector::{Vector2, Vector2Ext};
use std::fmt;

/// Default life time in seconds.
pub const DEFAULT_LIFE_TIME: f32 = 100.0;
/// Default size in pixels.
pub const DEFAULT_SIZE: f32 = 5.0;
/// Default speed in pixels per second.
pub const DEFAULT_SPEED: f32 = 100.0;
/// Default scale factor.
pub const DEFAULT_SCALE: f32 = 1.0;
/// Default start color.
pub const DEFAULT_COLOR: Color = Color::GREEN;

/// Fully resolved values used to (re)initialize a particle.
///
/// Every field is optional: `None` leaves the particle's own default in
/// force. The emitter produces one of these per emission by sampling its
/// [`ParticleConfig`](crate::ParticleConfig).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleInit {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub color: Option<Color>,
    pub end_color: Option<Color>,
    pub scale: Option<f32>,
    pub end_scale: Option<f32>,
    pub gravity_x: Option<f32>,
    pub gravity_y: Option<f32>,
    pub radial_acceleration: Option<f32>,
    pub tangential_acceleration: Option<f32>,
    /// Size in pixels.
    pub size: Option<f32>,
    /// Pixels per second.
    pub speed: Option<f32>,
    /// Emission angle in degrees.
    pub angle: Option<f32>,
    /// Seconds.
    pub life_time: Option<f32>,
}

/// Renderable snapshot of a particle, handed to [`RendererPeer`]s.
///
/// `#[repr(C)]` and `Pod`: a batch of instances can be uploaded to a GPU
/// vertex buffer as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    /// Center position.
    pub position: [f32; 2],
    /// Current size (`initial size * scale`).
    pub size: f32,
    /// Pool slot of the particle, stable for the emitter's lifetime.
    pub slot: u32,
    pub color: [f32; 4],
}

/// One particle in an emitter's pool.
pub struct Particle {
    slot: u32,

    position: Vector2,
    origin: Vector2,
    velocity: Vector2,
    gravity: Vector2,
    radial_acceleration: f32,
    tangential_acceleration: f32,

    angle: f32,
    speed: f32,

    life: f32,
    initial_life: f32,

    size: f32,
    initial_size: f32,
    scale: f32,
    initial_scale: f32,
    end_scale: f32,
    delta_scale: f32,

    color: Color,
    start_color: Color,
    end_color: Color,
    delta_color: Color,

    peer: Option<Box<dyn RendererPeer>>,
}

impl Particle {
    /// A particle at slot 0 with every attribute at its default.
    pub fn new() -> Self {
        Self::with_slot(0)
    }

    pub(crate) fn with_slot(slot: u32) -> Self {
        let mut particle = Self {
            slot,
            position: Vector2::ZERO,
            origin: Vector2::ZERO,
            velocity: Vector2::ZERO,
            gravity: Vector2::ZERO,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
            angle: 0.0,
            speed: 0.0,
            life: 0.0,
            initial_life: 0.0,
            size: 0.0,
            initial_size: 0.0,
            scale: 0.0,
            initial_scale: 0.0,
            end_scale: 0.0,
            delta_scale: 0.0,
            color: Color::TRANSPARENT,
            start_color: Color::TRANSPARENT,
            end_color: Color::TRANSPARENT,
            delta_color: Color::TRANSPARENT,
            peer: None,
        };
        particle.reset(&ParticleInit::default());
        particle
    }

    /// Reinitialize all state from `init`, applying defaults for unset fields.
    ///
    /// The attached renderer peer is kept. A `life_time <= 0` leaves the
    /// particle dead.
    pub fn reset(&mut self, init: &ParticleInit) {
        self.life = init.life_time.unwrap_or(DEFAULT_LIFE_TIME);
        self.initial_life = self.life;

        self.initial_size = init.size.unwrap_or(DEFAULT_SIZE);
        self.size = self.initial_size;

        self.gravity = Vector2::new(init.gravity_x.unwrap_or(0.0), init.gravity_y.unwrap_or(0.0));
        self.radial_acceleration = init.radial_acceleration.unwrap_or(0.0);
        self.tangential_acceleration = init.tangential_acceleration.unwrap_or(0.0);

        self.initial_scale = init.scale.unwrap_or(DEFAULT_SCALE);
        self.scale = self.initial_scale;
        self.end_scale = init.end_scale.unwrap_or(self.initial_scale);
        self.delta_scale = self.per_second(self.end_scale - self.initial_scale);

        self.position = Vector2::new(init.x.unwrap_or(0.0), init.y.unwrap_or(0.0));
        self.origin = self.position;

        self.start_color = init.color.unwrap_or(DEFAULT_COLOR);
        self.end_color = init.end_color.unwrap_or(self.start_color);
        self.color = self.start_color;
        self.delta_color = if self.initial_life > 0.0 {
            self.end_color.subtract(self.start_color).divide_by_scalar(self.initial_life)
        } else {
            Color::TRANSPARENT
        };

        self.angle = init.angle.unwrap_or(0.0);
        self.speed = init.speed.unwrap_or(DEFAULT_SPEED);
        let radians = self.angle.to_radians();
        self.velocity = Vector2::new(self.speed * radians.cos(), -self.speed * radians.sin());
    }

    /// Advance the particle by `dt` seconds.
    ///
    /// Once life runs out nothing else changes and the peer is not notified.
    pub fn update(&mut self, dt: f32) {
        self.life -= dt;
        if !self.is_alive() {
            return;
        }

        self.scale += self.delta_scale * dt;
        self.size = self.initial_size * self.scale;
        self.color = self.color.add(self.delta_color, dt);

        let force = self.force();
        let step = force * dt;
        let displacement = self.velocity * dt + step * step / 2.0;
        self.position += displacement;
        self.velocity += step;

        if let Some(peer) = self.peer.as_mut() {
            let instance = Self::instance_of(self.slot, self.position, self.size, self.color);
            peer.sync(&instance);
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Gravity plus radial and tangential acceleration at the current position.
    fn force(&self) -> Vector2 {
        let mut force = self.gravity;
        let has_orbit = self.radial_acceleration != 0.0 || self.tangential_acceleration != 0.0;
        // Offsets below ~1e-23 are distinct from the origin but square to zero.
        let offset = self.position - self.origin;
        if !has_orbit || offset.magnitude() == 0.0 {
            return force;
        }
        let radial = offset.normalize_or_infinite();
        let tangential = radial.cross_perp();
        force += radial * self.radial_acceleration;
        force += tangential * self.tangential_acceleration;
        force
    }

    fn per_second(&self, delta: f32) -> f32 {
        if self.initial_life > 0.0 {
            delta / self.initial_life
        } else {
            0.0
        }
    }

    fn instance_of(slot: u32, position: Vector2, size: f32, color: Color) -> ParticleInstance {
        ParticleInstance {
            position: position.to_array(),
            size,
            slot,
            color: color.to_array(),
        }
    }

    /// Snapshot of what a renderer needs to draw this particle.
    pub fn instance(&self) -> ParticleInstance {
        Self::instance_of(self.slot, self.position, self.size, self.color)
    }

    // ========== Renderer peer ==========

    /// Attach a rendering peer, replacing any previous one.
    pub fn attach_peer(&mut self, peer: Box<dyn RendererPeer>) {
        self.peer = Some(peer);
    }

    /// Detach and return the rendering peer.
    pub fn detach_peer(&mut self) -> Option<Box<dyn RendererPeer>> {
        self.peer.take()
    }

    pub fn has_peer(&self) -> bool {
        self.peer.is_some()
    }

    pub(crate) fn show(&mut self) {
        let instance = self.instance();
        if let Some(peer) = self.peer.as_mut() {
            peer.show(&instance);
        }
    }

    pub(crate) fn hide(&mut self) {
        let instance = self.instance();
        if let Some(peer) = self.peer.as_mut() {
            peer.hide(&instance);
        }
    }

    // ========== Accessors ==========

    /// Pool slot assigned by the owning emitter.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Spawn position; the origin of radial acceleration.
    #[inline]
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    #[inline]
    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    #[inline]
    pub fn radial_acceleration(&self) -> f32 {
        self.radial_acceleration
    }

    #[inline]
    pub fn tangential_acceleration(&self) -> f32 {
        self.tangential_acceleration
    }

    /// Emission angle in degrees.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Remaining life in seconds.
    #[inline]
    pub fn life(&self) -> f32 {
        self.life
    }

    #[inline]
    pub fn initial_life(&self) -> f32 {
        self.initial_life
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn initial_size(&self) -> f32 {
        self.initial_size
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn end_scale(&self) -> f32 {
        self.end_scale
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn start_color(&self) -> Color {
        self.start_color
    }

    #[inline]
    pub fn end_color(&self) -> Color {
        self.end_color
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Particle")
            .field("slot", &self.slot)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("life", &self.life)
            .field("size", &self.size)
            .field("scale", &self.scale)
            .field("color", &self.color)
            .field("has_peer", &self.peer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RendererPeer;
    use std::cell::RefCell;
    use std::rc::Rc;

    const EPS: f32 = 1e-4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_defaults() {
        let p = Particle::new();
        assert_eq!(p.life(), DEFAULT_LIFE_TIME);
        assert_eq!(p.size(), DEFAULT_SIZE);
        assert_eq!(p.scale(), 1.0);
        assert_eq!(p.end_scale(), 1.0);
        assert_eq!(p.color(), Color::GREEN);
        assert_eq!(p.end_color(), Color::GREEN);
        assert_eq!(p.position(), Vector2::ZERO);
        assert_eq!(p.gravity(), Vector2::ZERO);
        // angle 0, speed 100 -> straight right
        assert!(approx(p.velocity().x, 100.0));
        assert!(approx(p.velocity().y, 0.0));
        assert!(p.is_alive());
    }

    #[test]
    fn test_velocity_y_is_inverted() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            angle: Some(90.0),
            speed: Some(10.0),
            ..Default::default()
        });
        assert!(approx(p.velocity().x, 0.0));
        assert!(approx(p.velocity().y, -10.0));
    }

    #[test]
    fn test_color_interpolation_and_death() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            life_time: Some(2.0),
            color: Some(Color::new(1.0, 0.0, 0.0, 1.0)),
            end_color: Some(Color::TRANSPARENT),
            ..Default::default()
        });

        p.update(1.0);
        let c = p.color();
        assert!(approx(c.r, 0.5) && approx(c.g, 0.0) && approx(c.b, 0.0) && approx(c.a, 0.5));
        assert!(p.is_alive());

        p.update(1.0);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_dead_particle_is_not_mutated() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            life_time: Some(1.0),
            scale: Some(1.0),
            end_scale: Some(3.0),
            ..Default::default()
        });
        p.update(0.5);
        let (position, scale) = (p.position(), p.scale());
        p.update(0.5);
        assert!(!p.is_alive());
        assert_eq!(p.position(), position);
        assert_eq!(p.scale(), scale);
    }

    #[test]
    fn test_scale_approaches_end_scale() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            life_time: Some(1.0),
            scale: Some(1.0),
            end_scale: Some(2.0),
            size: Some(10.0),
            ..Default::default()
        });
        for _ in 0..99 {
            p.update(0.01);
        }
        assert!(p.is_alive());
        assert!((p.scale() - 1.99).abs() < 1e-3);
        assert!((p.size() - 19.9).abs() < 1e-2);
    }

    #[test]
    fn test_zero_life_time_is_dead_and_finite() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            life_time: Some(0.0),
            end_scale: Some(4.0),
            end_color: Some(Color::WHITE),
            ..Default::default()
        });
        assert!(!p.is_alive());
        p.update(0.1);
        assert!(p.scale().is_finite());
        assert!(p.color().r.is_finite());
    }

    #[test]
    fn test_life_decreases_by_dt() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            life_time: Some(1.0),
            ..Default::default()
        });
        p.update(0.25);
        assert!(approx(p.life(), 0.75));
        p.update(0.25);
        assert!(approx(p.life(), 0.5));
    }

    #[test]
    fn test_gravity_displacement_formula() {
        // No speed, gravity only: displacement = (g*dt)^2 / 2 on the first frame.
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            speed: Some(0.0),
            gravity_y: Some(10.0),
            ..Default::default()
        });
        p.update(0.5);
        // (10 * 0.5)^2 / 2 = 12.5
        assert!(approx(p.y(), 12.5));
        assert!(approx(p.velocity().y, 5.0));
        // Second frame: 5 * 0.5 + 12.5
        p.update(0.5);
        assert!(approx(p.y(), 12.5 + 2.5 + 12.5));
    }

    #[test]
    fn test_no_radial_force_at_origin() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            speed: Some(0.0),
            radial_acceleration: Some(50.0),
            tangential_acceleration: Some(50.0),
            ..Default::default()
        });
        p.update(0.1);
        assert_eq!(p.position(), Vector2::ZERO);
        assert_eq!(p.velocity(), Vector2::ZERO);
    }

    #[test]
    fn test_tiny_offset_from_origin_stays_finite() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            speed: Some(0.0),
            gravity_y: Some(1e-10),
            radial_acceleration: Some(1.0),
            ..Default::default()
        });
        p.update(1.0 / 60.0);
        assert_ne!(p.position(), p.origin());
        assert_eq!(p.position().magnitude(), 0.0);

        for _ in 0..10 {
            p.update(1.0 / 60.0);
            assert!(p.position().is_finite());
            assert!(p.velocity().is_finite());
        }
        assert!(p.y() > 0.0);
    }

    #[test]
    fn test_radial_and_tangential_force() {
        let mut p = Particle::new();
        p.reset(&ParticleInit {
            speed: Some(10.0),
            angle: Some(0.0),
            radial_acceleration: Some(4.0),
            ..Default::default()
        });
        // First frame: still at origin, no radial force.
        p.update(1.0);
        assert!(approx(p.x(), 10.0));
        // Second frame: radial is +x, force.x = 4 -> displacement 10 + 8
        p.update(1.0);
        assert!(approx(p.x(), 28.0));
        assert!(approx(p.velocity().x, 14.0));

        let mut q = Particle::new();
        q.reset(&ParticleInit {
            speed: Some(10.0),
            tangential_acceleration: Some(4.0),
            ..Default::default()
        });
        q.update(1.0);
        q.update(1.0);
        // radial (1, 0) -> tangential (0, -1), velocity.y gains -4
        assert!(approx(q.velocity().y, -4.0));
        assert!(approx(q.y(), 8.0));
    }

    #[derive(Default)]
    struct Counting {
        syncs: usize,
        last: Option<ParticleInstance>,
    }

    impl RendererPeer for Counting {
        fn show(&mut self, _: &ParticleInstance) {}
        fn hide(&mut self, _: &ParticleInstance) {}
        fn sync(&mut self, particle: &ParticleInstance) {
            self.syncs += 1;
            self.last = Some(*particle);
        }
    }

    #[test]
    fn test_peer_synced_only_while_alive() {
        let peer = Rc::new(RefCell::new(Counting::default()));
        let mut p = Particle::new();
        p.attach_peer(Box::new(peer.clone()));
        p.reset(&ParticleInit {
            life_time: Some(1.0),
            size: Some(8.0),
            ..Default::default()
        });

        p.update(0.5);
        assert_eq!(peer.borrow().syncs, 1);
        let last = peer.borrow().last.unwrap();
        assert_eq!(last.size, 8.0);
        assert_eq!(last.position, p.position().to_array());

        p.update(0.5);
        assert_eq!(peer.borrow().syncs, 1);
        assert!(p.has_peer());
    }
}
