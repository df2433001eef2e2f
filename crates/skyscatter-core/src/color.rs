use serde::{Deserialize, Serialize};

/// 8-bit RGB color. Immutable value type produced by palette interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorRGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRGB {
    /// Fallback for any palette lookup that has no entry.
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation: `round(a + (b - a) * factor)`.
    ///
    /// The factor is not clamped; the result is saturated to [0, 255] so a
    /// factor slightly outside [0, 1] can never produce an invalid channel.
    pub fn lerp(self, other: Self, factor: f32) -> Self {
        Self {
            r: lerp_channel(self.r, other.r, factor),
            g: lerp_channel(self.g, other.g, factor),
            b: lerp_channel(self.b, other.b, factor),
        }
    }
}

fn lerp_channel(a: u8, b: u8, factor: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * factor).round().clamp(0.0, 255.0) as u8
}
