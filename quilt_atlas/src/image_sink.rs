// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Compositor`] that draws into an in-memory RGBA image.

use image::{GenericImage, Rgba, RgbaImage};
use quilt_packer::Region;

use crate::compose::Compositor;
use crate::sprite::{SpriteDesc, SpriteId};

/// Errors from [`ImageCompositor`].
#[derive(Debug, thiserror::Error)]
pub enum ImageCompositorError {
    /// No source image was supplied for the sprite.
    #[error("no source image for {0}")]
    MissingSource(SpriteId),
    /// The source image does not have the size the sprite was packed with.
    #[error("{sprite} is {actual:?} pixels but was packed as {expected:?}")]
    SizeMismatch {
        /// The sprite being drawn.
        sprite: SpriteId,
        /// Size of the packed region.
        expected: (u32, u32),
        /// Size of the source image.
        actual: (u32, u32),
    },
    /// The destination rejected the copy.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Composites sprite images into a single RGBA atlas image.
///
/// Source images are addressed by [`SpriteId::index`], so they must be given in
/// the order the sprites were added. Padding around each sprite is left
/// transparent black.
#[derive(Debug)]
pub struct ImageCompositor<'a> {
    sources: &'a [RgbaImage],
    target: RgbaImage,
}

impl<'a> ImageCompositor<'a> {
    /// Create a compositor drawing from `sources`.
    pub fn new(sources: &'a [RgbaImage]) -> Self {
        Self {
            sources,
            target: RgbaImage::new(0, 0),
        }
    }

    /// The atlas drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    /// Take the finished atlas.
    pub fn into_image(self) -> RgbaImage {
        self.target
    }
}

impl Compositor for ImageCompositor<'_> {
    type Error = ImageCompositorError;

    fn begin(&mut self, width: u32, height: u32) -> Result<(), Self::Error> {
        self.target = RgbaImage::new(width, height);
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: SpriteId, dest: Region) -> Result<(), Self::Error> {
        let source = self
            .sources
            .get(sprite.index())
            .ok_or(ImageCompositorError::MissingSource(sprite))?;
        if source.dimensions() != (dest.width, dest.height) {
            return Err(ImageCompositorError::SizeMismatch {
                sprite,
                expected: (dest.width, dest.height),
                actual: source.dimensions(),
            });
        }
        self.target.copy_from(source, dest.x, dest.y)?;
        Ok(())
    }

    fn fill_null_quad(&mut self, dest: Region) -> Result<(), Self::Error> {
        let white = Rgba([255, 255, 255, 255]);
        let (width, height) = self.target.dimensions();
        for y in dest.y..dest.bottom().min(height) {
            for x in dest.x..dest.right().min(width) {
                self.target.put_pixel(x, y, white);
            }
        }
        Ok(())
    }
}

/// Describe an image as a sprite, flagging alpha when any pixel is translucent.
pub fn describe_image(image: &RgbaImage) -> SpriteDesc {
    let (width, height) = image.dimensions();
    let has_alpha = image.pixels().any(|p| p.0[3] != u8::MAX);
    SpriteDesc::new(width, height).with_alpha(has_alpha)
}
