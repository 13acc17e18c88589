use crate::foundation::error::{SyntropyError, SyntropyResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// A point on the animation timeline, in milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn after(self, delta_ms: u32) -> Self {
        Self(self.0.saturating_add(u64::from(delta_ms)))
    }

    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> SyntropyResult<Self> {
        if den == 0 {
            return Err(SyntropyError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SyntropyError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timeline instant at which frame `frame` is sampled.
    pub fn frame_to_millis(self, frame: u64) -> Millis {
        let ms = (frame as f64) * 1000.0 * f64::from(self.den) / f64::from(self.num);
        Millis(ms.floor() as u64)
    }

    /// Number of frames needed to cover `duration_ms`, rounding up.
    pub fn frames_for_millis(self, duration_ms: u64) -> u64 {
        ((duration_ms as f64) * self.as_f64() / 1000.0).ceil().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> SyntropyResult<Self> {
        if width == 0 || height == 0 {
            return Err(SyntropyError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn scaled(self, factor: u32) -> Self {
        Self {
            width: self.width.saturating_mul(factor),
            height: self.height.saturating_mul(factor),
        }
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn grey(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
