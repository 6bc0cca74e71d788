// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite identifiers and metadata.

use core::fmt;

/// Identifier of a sprite: its position in the list handed to the packer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(pub(crate) u32);

impl SpriteId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Sprite ids are intentionally 32-bit; no atlas holds more than u32::MAX sprites."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the sprite in the input list.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite #{}", self.0)
    }
}

/// Inner border of a sprite, in pixels from each edge.
///
/// Borders mark the stretchable centre of a nine-slice sprite (window frames,
/// containers). They play no part in packing and are carried through to the
/// [`AtlasLayout`][crate::AtlasLayout] for the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SpriteBorder {
    /// Pixels from the left edge.
    pub left: u32,
    /// Pixels from the right edge.
    pub right: u32,
    /// Pixels from the top edge.
    pub top: u32,
    /// Pixels from the bottom edge.
    pub bottom: u32,
}

impl SpriteBorder {
    /// No border.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Create a border from its four edges.
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// What the atlas needs to know about one source sprite.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteDesc {
    /// Width of the sprite's pixels, without padding.
    pub width: u32,
    /// Height of the sprite's pixels, without padding.
    pub height: u32,
    /// Whether the sprite needs alpha blending when drawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_alpha: bool,
    /// Nine-slice border.
    #[cfg_attr(feature = "serde", serde(default))]
    pub border: SpriteBorder,
}

impl SpriteDesc {
    /// Describe an opaque sprite without a border.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            has_alpha: false,
            border: SpriteBorder::NONE,
        }
    }

    /// Set whether the sprite needs alpha blending.
    pub const fn with_alpha(mut self, has_alpha: bool) -> Self {
        self.has_alpha = has_alpha;
        self
    }

    /// Set the nine-slice border.
    pub const fn with_border(mut self, border: SpriteBorder) -> Self {
        self.border = border;
        self
    }

    /// Pixel area without padding; the key sprites are sorted by.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the sprite has no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
