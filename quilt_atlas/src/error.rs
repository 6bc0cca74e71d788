// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while building an atlas.

use alloc::string::String;
use core::fmt;

use crate::sprite::SpriteId;

/// A region the atlas builder asked the packer for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A source sprite, padded on every side.
    Sprite(SpriteId),
    /// The flat filler patch used to draw untextured quads.
    NullQuad,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sprite(id) => fmt::Display::fmt(id, f),
            Self::NullQuad => f.write_str("null quad"),
        }
    }
}

/// Why an atlas could not be built.
///
/// Every variant aborts the whole build; no partially packed atlas is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// The configuration cannot describe a usable atlas.
    #[error("invalid atlas configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A sprite has a zero width or height.
    #[error("{sprite} has no pixels")]
    EmptySprite {
        /// The offending sprite.
        sprite: SpriteId,
    },
    /// No free space is left for a region. The atlas is too small for the sprite set.
    #[error(
        "not enough room in {atlas_width}x{atlas_height} texture atlas for {slot} ({width}x{height} with padding)"
    )]
    CapacityExceeded {
        /// The region that did not fit.
        slot: Slot,
        /// Requested width, padding included.
        width: u32,
        /// Requested height, padding included.
        height: u32,
        /// Atlas width.
        atlas_width: u32,
        /// Atlas height.
        atlas_height: u32,
    },
    /// No candidate atlas size has room for the sprites' combined padded area.
    #[error(
        "cannot find a best size for the texture atlas: {required_area} px of padded sprites exceed {max_side}x{max_side}"
    )]
    NoFittingSize {
        /// Total padded sprite area, in pixels.
        required_area: u64,
        /// Largest side that was tried.
        max_side: u32,
    },
    /// The compositor could not prepare the atlas target.
    #[error("preparing the atlas target failed: {message}")]
    CompositorSetup {
        /// The compositor's own error, rendered.
        message: String,
    },
    /// The compositor failed to draw into the atlas.
    #[error("compositing {slot} failed: {message}")]
    Compositor {
        /// What was being drawn.
        slot: Slot,
        /// The compositor's own error, rendered.
        message: String,
    },
}
