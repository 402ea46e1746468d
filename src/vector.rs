//! 2D vector primitive.
//!
//! [`Vector2`] is glam's [`Vec2`]; arithmetic (`+`, `-`, `* f32`, `length`)
//! comes straight from glam. [`Vector2Ext`] adds the two operations the
//! particle force model needs that glam spells differently or not at all.
//!
//! # Example
//!
//! ```
//! use fx2d::{Vector2, Vector2Ext};
//!
//! let radial = (Vector2::new(3.0, 4.0) - Vector2::ZERO).normalize_or_infinite();
//! assert!((radial.x - 0.6).abs() < 1e-6);
//!
//! // Clockwise quarter turn in screen space.
//! let tangential = radial.cross_perp();
//! assert!((tangential.y + 0.6).abs() < 1e-6);
//! ```

use glam::Vec2;

/// 2D vector used for positions, velocities and forces.
pub type Vector2 = Vec2;

/// Particle-specific vector operations on top of glam.
pub trait Vector2Ext {
    /// Rotate by 90 degrees: `(x, y) -> (y, -x)`.
    ///
    /// This is the negation of glam's [`Vec2::perp`].
    fn cross_perp(self) -> Self;

    /// Divide by the magnitude.
    ///
    /// A zero-length vector has no direction; instead of dividing by zero
    /// the result is `(inf, inf)`. Callers that feed the result into a
    /// force must guard against the zero case themselves.
    fn normalize_or_infinite(self) -> Self;

    /// Euclidean length, `sqrt(x² + y²)`.
    fn magnitude(self) -> f32;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn cross_perp(self) -> Self {
        Vec2::new(self.y, -self.x)
    }

    #[inline]
    fn normalize_or_infinite(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Vec2::INFINITY;
        }
        self / magnitude
    }

    #[inline]
    fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}
