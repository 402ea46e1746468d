//! RGBA color primitive used for per-particle color interpolation.
//!
//! Components are plain `f32`s with no clamping; renderers decide how to
//! map values outside `0.0..=1.0`.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// RGBA color with unconstrained `f32` components.
///
/// The layout is `#[repr(C)]` and `Pod`, so slices of colors can be handed
/// to GPU buffers directly.
///
/// Deserializes from either `[r, g, b, a]` or `{ "r": .., "g": .., "b": .., "a": .. }`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same value in all four components.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Component-wise `self - other`.
    #[inline]
    pub fn subtract(self, other: Color) -> Self {
        Self::new(self.r - other.r, self.g - other.g, self.b - other.b, self.a - other.a)
    }

    /// Subtract `v` from every component.
    #[inline]
    pub fn subtract_scalar(self, v: f32) -> Self {
        self.subtract(Color::splat(v))
    }

    /// Component-wise `self + other * each_times`.
    ///
    /// This is how a per-second delta is applied over a frame:
    /// `color.add(delta, dt)`.
    #[inline]
    pub fn add(self, other: Color, each_times: f32) -> Self {
        Self::new(
            self.r + other.r * each_times,
            self.g + other.g * each_times,
            self.b + other.b * each_times,
            self.a + other.a * each_times,
        )
    }

    /// Add `v * each_times` to every component.
    #[inline]
    pub fn add_scalar(self, v: f32, each_times: f32) -> Self {
        self.add(Color::splat(v), each_times)
    }

    /// Component-wise `self / other`.
    #[inline]
    pub fn divide_by(self, other: Color) -> Self {
        Self::new(self.r / other.r, self.g / other.g, self.b / other.b, self.a / other.a)
    }

    /// Divide every component by `v`.
    #[inline]
    pub fn divide_by_scalar(self, v: f32) -> Self {
        self.divide_by(Color::splat(v))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp to `0.0..=1.0` and quantize to 8 bits per channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::add(self, rhs, 1.0)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        self.subtract(rhs)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::TRANSPARENT.add(self, rhs)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, rhs: f32) -> Color {
        self.divide_by_scalar(rhs)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Array([f32; 4]),
    Struct { r: f32, g: f32, b: f32, a: f32 },
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Array(c) => c.into(),
            ColorRepr::Struct { r, g, b, a } => Color::new(r, g, b, a),
        }
    }
}
