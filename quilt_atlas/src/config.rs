// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas build configuration.

use crate::error::AtlasError;
use crate::sprite::SpriteDesc;

/// Dimensions and packing parameters of an atlas.
///
/// The defaults reproduce the reference UI atlas: 1024x1024 pixels, a
/// one-pixel transparent border around every sprite, and a 4x4 white null quad.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AtlasConfig {
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Pixels reserved on each side of every sprite so that linear filtering
    /// never samples a neighbour.
    pub padding: u32,
    /// Side of the opaque white patch reserved after all sprites, if any.
    ///
    /// Serialized as a plain integer where `0` means no patch, since TOML has
    /// no null.
    #[cfg_attr(feature = "serde", serde(with = "null_quad_side"))]
    pub null_quad: Option<u32>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::new(1024, 1024)
    }
}

impl AtlasConfig {
    /// Reference border around each sprite.
    pub const DEFAULT_PADDING: u32 = 1;
    /// Reference side of the null quad. Four pixels keep a bilinear sample
    /// taken at its centre entirely inside the patch.
    pub const DEFAULT_NULL_QUAD: u32 = 4;
    /// Square atlas sides tried by [`AtlasConfig::fit_to`], smallest first.
    pub const CANDIDATE_SIDES: [u32; 8] = [8, 16, 32, 64, 128, 256, 512, 1024];
    const MAX_SIDE: u32 = Self::CANDIDATE_SIDES[Self::CANDIDATE_SIDES.len() - 1];

    /// An atlas of the given size with the reference padding and null quad.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Self::DEFAULT_PADDING,
            null_quad: Some(Self::DEFAULT_NULL_QUAD),
        }
    }

    /// Set the padding on each side of every sprite.
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set or disable the null quad.
    pub const fn with_null_quad(mut self, side: Option<u32>) -> Self {
        self.null_quad = side;
        self
    }

    /// Width and height of the packer request for a `width` x `height` sprite.
    ///
    /// Saturates instead of overflowing; a saturated request can never fit.
    pub const fn padded(&self, width: u32, height: u32) -> (u32, u32) {
        let extra = self.padding.saturating_mul(2);
        (width.saturating_add(extra), height.saturating_add(extra))
    }

    /// Resize to the smallest square in [`AtlasConfig::CANDIDATE_SIDES`] whose
    /// area covers the padded area of every sprite.
    ///
    /// Padding and null quad are kept. Only the total area is compared, so a
    /// build on the returned size can still fail with
    /// [`AtlasError::CapacityExceeded`] when the shapes do not tile.
    pub fn fit_to(self, sprites: &[SpriteDesc]) -> Result<Self, AtlasError> {
        let required_area = sprites
            .iter()
            .map(|sprite| {
                let (width, height) = self.padded(sprite.width, sprite.height);
                u64::from(width) * u64::from(height)
            })
            .fold(0, u64::saturating_add);
        let side = Self::CANDIDATE_SIDES
            .into_iter()
            .find(|&side| u64::from(side) * u64::from(side) >= required_area)
            .ok_or(AtlasError::NoFittingSize {
                required_area,
                max_side: Self::MAX_SIDE,
            })?;
        Ok(Self {
            width: side,
            height: side,
            ..self
        })
    }

    /// Check that the configuration describes a usable atlas.
    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.width == 0 || self.height == 0 {
            return Err(AtlasError::InvalidConfig {
                reason: "atlas width and height must be non-zero",
            });
        }
        if self.null_quad == Some(0) {
            return Err(AtlasError::InvalidConfig {
                reason: "null quad side must be non-zero",
            });
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod null_quad_side {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        side: &Option<u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(side.unwrap_or(0))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        Ok(Option::<u32>::deserialize(deserializer)?.filter(|&side| side != 0))
    }
}
