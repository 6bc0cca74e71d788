// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a packed layout into an image.

use alloc::string::ToString;
use core::fmt::Display;

use quilt_packer::Region;

use crate::error::{AtlasError, Slot};
use crate::layout::AtlasLayout;
use crate::sprite::SpriteId;

/// Destination of a packed atlas: usually a render target or a CPU image.
///
/// [`compose`] calls [`Compositor::begin`] once, then [`Compositor::draw_sprite`]
/// for every sprite in packing order, then [`Compositor::fill_null_quad`] if the
/// layout reserved one.
pub trait Compositor {
    /// Error reported by the sink.
    type Error: Display;

    /// Prepare a cleared `width` x `height` target.
    fn begin(&mut self, width: u32, height: u32) -> Result<(), Self::Error>;

    /// Copy the pixels of `sprite` into `dest`, which has the sprite's exact size.
    fn draw_sprite(&mut self, sprite: SpriteId, dest: Region) -> Result<(), Self::Error>;

    /// Fill `dest` with opaque white.
    fn fill_null_quad(&mut self, dest: Region) -> Result<(), Self::Error>;
}

/// Draw every entry of `layout` into `sink`.
pub fn compose<C: Compositor + ?Sized>(layout: &AtlasLayout, sink: &mut C) -> Result<(), AtlasError> {
    sink.begin(layout.width(), layout.height()).map_err(|e| {
        let err = AtlasError::CompositorSetup {
            message: e.to_string(),
        };
        log::error!("{err}");
        err
    })?;

    for &id in layout.packing_order() {
        let Some(entry) = layout.get(id) else {
            continue;
        };
        sink.draw_sprite(id, entry.region)
            .map_err(|e| sink_error(Slot::Sprite(id), &e))?;
    }
    if let Some(region) = layout.null_quad() {
        sink.fill_null_quad(region)
            .map_err(|e| sink_error(Slot::NullQuad, &e))?;
    }

    log::debug!(
        "composited {} sprites into {}x{} atlas",
        layout.len(),
        layout.width(),
        layout.height()
    );
    Ok(())
}

fn sink_error(slot: Slot, err: &impl Display) -> AtlasError {
    let err = AtlasError::Compositor {
        slot,
        message: err.to_string(),
    };
    log::error!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AtlasBuilder, AtlasConfig, SpriteDesc};
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    struct Recorder {
        size: Option<(u32, u32)>,
        sprites: Vec<(SpriteId, Region)>,
        null_quad: Option<Region>,
        fail_on: Option<SpriteId>,
    }

    impl Compositor for Recorder {
        type Error = &'static str;

        fn begin(&mut self, width: u32, height: u32) -> Result<(), Self::Error> {
            self.size = Some((width, height));
            Ok(())
        }

        fn draw_sprite(&mut self, sprite: SpriteId, dest: Region) -> Result<(), Self::Error> {
            if self.fail_on == Some(sprite) {
                return Err("source texture missing");
            }
            self.sprites.push((sprite, dest));
            Ok(())
        }

        fn fill_null_quad(&mut self, dest: Region) -> Result<(), Self::Error> {
            self.null_quad = Some(dest);
            Ok(())
        }
    }

    #[test]
    fn sink_sees_sprites_in_packing_order() {
        let mut builder = AtlasBuilder::new(AtlasConfig::new(128, 128));
        let a = builder.add(SpriteDesc::new(8, 8));
        let b = builder.add(SpriteDesc::new(32, 32));
        let mut sink = Recorder::default();
        let layout = builder.build_into(&mut sink).unwrap();

        assert_eq!(sink.size, Some((128, 128)));
        let drawn: Vec<SpriteId> = sink.sprites.iter().map(|&(id, _)| id).collect();
        assert_eq!(drawn, [b, a]);
        assert_eq!(sink.sprites[0].1, layout.get(b).unwrap().region);
        assert_eq!(sink.null_quad, layout.null_quad());
    }

    #[test]
    fn failed_pack_never_reaches_sink() {
        let mut builder = AtlasBuilder::new(AtlasConfig::new(16, 16));
        builder.add(SpriteDesc::new(8, 8));
        builder.add(SpriteDesc::new(32, 32));
        let mut sink = Recorder::default();
        assert!(builder.build_into(&mut sink).is_err());
        assert_eq!(sink.size, None);
        assert!(sink.sprites.is_empty());
    }

    #[test]
    fn sink_errors_name_the_sprite() {
        let mut builder = AtlasBuilder::new(AtlasConfig::new(64, 64));
        let id = builder.add(SpriteDesc::new(8, 8));
        let mut sink = Recorder {
            fail_on: Some(id),
            ..Recorder::default()
        };
        let err = builder.build_into(&mut sink).unwrap_err();
        assert_eq!(
            err.to_string(),
            "compositing sprite #0 failed: source texture missing"
        );
    }
}
