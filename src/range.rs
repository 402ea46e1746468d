//! Random offset ranges for particle configuration.
//!
//! A configured field is `base + sample(range)`. Ranges are half-open
//! `[low, high)` intervals; an empty interval (`low == high`) always yields
//! `low`, and an inverted one (`low > high`) is sampled as `[high, low)`.

use crate::color::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A `[low, high)` interval sampled uniformly.
///
/// Unlike a strict `[low, high)` interval, an inverted range is accepted and
/// sampled as `[high, low)` rather than rejected.
///
/// Deserializes from `[low, high]`, `{ "low": .., "high": .. }`, or a single
/// number `n` meaning `[0, n)`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RangeRepr")]
pub struct ValueRange {
    pub low: f32,
    pub high: f32,
}

impl ValueRange {
    #[inline]
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// `[0, upper)`.
    #[inline]
    pub const fn up_to(upper: f32) -> Self {
        Self::new(0.0, upper)
    }

    /// Symmetric `[-half_width, half_width)`.
    #[inline]
    pub const fn centered(half_width: f32) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Whether `low > high`.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Draw a uniform value from the interval.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = if self.is_inverted() {
            (self.high, self.low)
        } else {
            (self.low, self.high)
        };
        // Also catches NaN and infinite bounds, which gen_range would panic on.
        if !(lo < hi) || !(hi - lo).is_finite() {
            return lo;
        }
        rng.gen_range(lo..hi)
    }
}

impl From<std::ops::Range<f32>> for ValueRange {
    fn from(r: std::ops::Range<f32>) -> Self {
        Self::new(r.start, r.end)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Upper(f32),
    Pair([f32; 2]),
    Struct { low: f32, high: f32 },
}

impl From<RangeRepr> for ValueRange {
    fn from(repr: RangeRepr) -> Self {
        match repr {
            RangeRepr::Upper(upper) => ValueRange::up_to(upper),
            RangeRepr::Pair([low, high]) => ValueRange::new(low, high),
            RangeRepr::Struct { low, high } => ValueRange::new(low, high),
        }
    }
}

/// Per-component color range; each channel is sampled independently.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorRange {
    pub low: Color,
    pub high: Color,
}

impl ColorRange {
    pub const fn new(low: Color, high: Color) -> Self {
        Self { low, high }
    }

    pub fn is_inverted(&self) -> bool {
        self.channels().iter().any(ValueRange::is_inverted)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        let [r, g, b, a] = self.channels();
        Color::new(r.sample(rng), g.sample(rng), b.sample(rng), a.sample(rng))
    }

    fn channels(&self) -> [ValueRange; 4] {
        let (lo, hi) = (self.low.to_array(), self.high.to_array());
        std::array::from_fn(|i| ValueRange::new(lo[i], hi[i]))
    }
}
