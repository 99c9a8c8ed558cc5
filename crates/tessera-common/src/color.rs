//! Packed 32-bit pixel color with integer blend arithmetic.
//!
//! All compositing in the software renderer happens on `Rgba8` values with
//! integer math only. Alpha blending is an integer lerp: each destination
//! channel moves toward the source channel by `src.a / 255`, so alpha 0
//! leaves the destination untouched and alpha 255 replaces it exactly.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A packed RGBA pixel, 8 bits per channel.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates an opaque color.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates a color with an explicit alpha.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Brightens every color channel by `d`, saturating at 255.
    /// Alpha is preserved.
    #[must_use]
    pub const fn lightened(self, d: u8) -> Self {
        Self::new(
            self.r.saturating_add(d),
            self.g.saturating_add(d),
            self.b.saturating_add(d),
            self.a,
        )
    }

    /// Darkens every color channel by `d`, saturating at 0.
    /// Alpha is preserved.
    #[must_use]
    pub const fn darkened(self, d: u8) -> Self {
        Self::new(
            self.r.saturating_sub(d),
            self.g.saturating_sub(d),
            self.b.saturating_sub(d),
            self.a,
        )
    }

    /// Blends `src` over this pixel using `src.a` as the mix weight.
    ///
    /// Integer lerp per channel: `dst + (src - dst) * src.a / 255`. The
    /// result keeps this pixel's alpha; surfaces stay opaque under
    /// compositing.
    #[must_use]
    pub const fn blended(self, src: Self) -> Self {
        Self::new(
            lerp_channel(self.r, src.r, src.a),
            lerp_channel(self.g, src.g, src.a),
            lerp_channel(self.b, src.b, src.a),
            self.a,
        )
    }
}

/// Integer lerp of a single channel from `dst` toward `src` by `t / 255`.
const fn lerp_channel(dst: u8, src: u8, t: u8) -> u8 {
    let dst = dst as i32;
    let src = src as i32;
    (dst + (src - dst) * t as i32 / 255) as u8
}
