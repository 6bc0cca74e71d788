// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas generation: sort, pad, pack, and optionally composite.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Reverse;

use quilt_packer::{PackError, RectPacker, Region};

use crate::compose::{Compositor, compose};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Slot};
use crate::layout::{AtlasEntry, AtlasLayout};
use crate::sprite::{SpriteDesc, SpriteId};

/// Pack `sprites` into a single atlas.
///
/// Sprites are placed largest area first; sprites of equal area keep their
/// input order. Each one is padded by [`AtlasConfig::padding`] on every side
/// before being handed to the packer. After the sprites, the null quad is
/// reserved if the configuration asks for one.
///
/// The build is all-or-nothing: the first sprite that does not fit aborts it
/// with [`AtlasError::CapacityExceeded`]. The packer is released on every path.
pub fn pack_sprites(config: &AtlasConfig, sprites: &[SpriteDesc]) -> Result<AtlasLayout, AtlasError> {
    config.validate()?;
    if let Some(idx) = sprites.iter().position(SpriteDesc::is_empty) {
        return Err(AtlasError::EmptySprite {
            sprite: SpriteId::new(idx),
        });
    }

    let mut order: Vec<SpriteId> = (0..sprites.len()).map(SpriteId::new).collect();
    // `sort_by_key` is stable.
    order.sort_by_key(|id| Reverse(sprites[id.index()].area()));

    let mut packer = RectPacker::new(config.width, config.height);
    let placed = place_all(&mut packer, config, sprites, &order);
    let stats = packer.release();
    let (entries, null_quad) = placed?;

    log::debug!(
        "packed {} sprites into {}x{} atlas: {} nodes, {} px free, depth {}",
        entries.len(),
        config.width,
        config.height,
        stats.nodes,
        stats.free_area,
        stats.depth,
    );

    Ok(AtlasLayout {
        width: config.width,
        height: config.height,
        entries,
        order,
        null_quad,
    })
}

fn place_all(
    packer: &mut RectPacker,
    config: &AtlasConfig,
    sprites: &[SpriteDesc],
    order: &[SpriteId],
) -> Result<(Vec<AtlasEntry>, Option<Region>), AtlasError> {
    let mut slots: Vec<Option<AtlasEntry>> = vec![None; sprites.len()];
    for &id in order {
        let desc = &sprites[id.index()];
        let (width, height) = config.padded(desc.width, desc.height);
        let padded = claim(packer, config, Slot::Sprite(id), width, height)?;
        let region = Region::new(
            padded.x + config.padding,
            padded.y + config.padding,
            desc.width,
            desc.height,
        );
        log::trace!("{id} at {region:?}");
        slots[id.index()] = Some(AtlasEntry {
            sprite: id,
            region,
            padded,
            has_alpha: desc.has_alpha,
            border: desc.border,
        });
    }

    let null_quad = match config.null_quad {
        Some(side) => Some(claim(packer, config, Slot::NullQuad, side, side)?),
        None => None,
    };

    Ok((slots.into_iter().flatten().collect(), null_quad))
}

fn claim(
    packer: &mut RectPacker,
    config: &AtlasConfig,
    slot: Slot,
    width: u32,
    height: u32,
) -> Result<Region, AtlasError> {
    packer.try_insert(width, height).map_err(|err| {
        let err = match err {
            PackError::CapacityExceeded { width, height } => AtlasError::CapacityExceeded {
                slot,
                width,
                height,
                atlas_width: config.width,
                atlas_height: config.height,
            },
            PackError::InvalidRequest { .. } => match slot {
                Slot::Sprite(sprite) => AtlasError::EmptySprite { sprite },
                Slot::NullQuad => AtlasError::InvalidConfig {
                    reason: "null quad side must be non-zero",
                },
            },
        };
        log::error!("{err}");
        err
    })
}

/// Collects sprite descriptions and builds an atlas from them.
///
/// ## Example
///
/// ```rust
/// use quilt_atlas::{AtlasBuilder, AtlasConfig, SpriteDesc};
///
/// let mut builder = AtlasBuilder::new(AtlasConfig::new(256, 256));
/// let clock = builder.add(SpriteDesc::new(128, 128).with_alpha(true));
/// let hand = builder.add(SpriteDesc::new(16, 64));
///
/// let layout = builder.build().unwrap();
/// let clock_entry = layout.get(clock).unwrap();
/// assert_eq!((clock_entry.region.x, clock_entry.region.y), (1, 1));
/// assert!(!clock_entry.region.overlaps(&layout.get(hand).unwrap().region));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AtlasBuilder {
    config: AtlasConfig,
    sprites: Vec<SpriteDesc>,
}

impl AtlasBuilder {
    /// Create an empty builder.
    pub fn new(config: AtlasConfig) -> Self {
        Self {
            config,
            sprites: Vec::new(),
        }
    }

    /// The configuration atlases are built with.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Queue a sprite; the returned id addresses it in the built layout.
    pub fn add(&mut self, sprite: SpriteDesc) -> SpriteId {
        let id = SpriteId::new(self.sprites.len());
        self.sprites.push(sprite);
        id
    }

    /// Sprites queued so far, in insertion order.
    pub fn sprites(&self) -> &[SpriteDesc] {
        &self.sprites
    }

    /// Number of queued sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether no sprite has been queued.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Shrink or grow the atlas to the smallest candidate square that can hold
    /// the queued sprites. See [`AtlasConfig::fit_to`].
    ///
    /// Returns the configuration later builds will use.
    pub fn fit_size(&mut self) -> Result<AtlasConfig, AtlasError> {
        self.config = self.config.fit_to(&self.sprites)?;
        log::debug!(
            "sized atlas for {} sprites: {}x{}",
            self.sprites.len(),
            self.config.width,
            self.config.height
        );
        Ok(self.config)
    }

    /// Pack the queued sprites. See [`pack_sprites`].
    pub fn build(&self) -> Result<AtlasLayout, AtlasError> {
        pack_sprites(&self.config, &self.sprites)
    }

    /// Pack the queued sprites, then draw them into `sink`.
    ///
    /// The sink is only touched once every sprite and the null quad have been
    /// placed, so a failed build never leaves a half-drawn atlas behind.
    pub fn build_into<C: Compositor>(&self, sink: &mut C) -> Result<AtlasLayout, AtlasError> {
        let layout = self.build()?;
        compose(&layout, sink)?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_valid(layout: &AtlasLayout, config: &AtlasConfig, sprites: &[SpriteDesc]) {
        let canvas = Region::new(0, 0, config.width, config.height);
        let mut padded: Vec<Region> = layout.entries().iter().map(|e| e.padded).collect();
        padded.extend(layout.null_quad());
        for (i, a) in padded.iter().enumerate() {
            assert!(canvas.contains(a), "{a:?} leaves the atlas");
            for b in &padded[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
        for (idx, entry) in layout.entries().iter().enumerate() {
            let desc = &sprites[idx];
            assert_eq!(entry.sprite.index(), idx);
            assert_eq!((entry.region.width, entry.region.height), (desc.width, desc.height));
            assert_eq!(entry.padded.inset(config.padding), entry.region);
        }
    }

    #[test]
    fn largest_sprite_is_packed_first() {
        let config = AtlasConfig::new(128, 128);
        let sprites = [
            SpriteDesc::new(8, 8),
            SpriteDesc::new(64, 64),
            SpriteDesc::new(16, 32),
        ];
        let layout = pack_sprites(&config, &sprites).unwrap();
        let order: Vec<usize> = layout.packing_order().iter().map(|id| id.index()).collect();
        assert_eq!(order, [1, 2, 0]);
        assert_eq!(layout.entries()[1].padded, Region::new(0, 0, 66, 66));
        assert_eq!(layout.entries()[1].region, Region::new(1, 1, 64, 64));
        assert_valid(&layout, &config, &sprites);
    }

    #[test]
    fn sort_key_ignores_padding() {
        // By padded area 10x10 (144) would lead 1x99 (303); by sprite area it is 100 vs 99.
        let config = AtlasConfig::new(128, 128);
        let sprites = [SpriteDesc::new(1, 99), SpriteDesc::new(10, 10)];
        let layout = pack_sprites(&config, &sprites).unwrap();
        let order: Vec<usize> = layout.packing_order().iter().map(|id| id.index()).collect();
        assert_eq!(order, [1, 0]);
        assert_eq!(layout.entries()[1].padded, Region::new(0, 0, 12, 12));
    }

    #[test]
    fn fit_size_then_build_uses_chosen_atlas() {
        let mut builder = AtlasBuilder::new(AtlasConfig::default());
        builder.add(SpriteDesc::new(2, 2));
        builder.add(SpriteDesc::new(2, 2));
        let config = builder.fit_size().unwrap();
        assert_eq!((config.width, config.height), (8, 8));
        assert_eq!(builder.config(), &config);

        // Two 4x4 padded sprites and the 4x4 null quad tile three quarters of 8x8.
        let layout = builder.build().unwrap();
        assert_eq!((layout.width(), layout.height()), (8, 8));
        assert_eq!(layout.null_quad(), Some(Region::new(0, 4, 4, 4)));
    }

    #[test]
    fn fit_size_rejects_oversized_sets() {
        let mut builder = AtlasBuilder::new(AtlasConfig::default());
        for _ in 0..5 {
            builder.add(SpriteDesc::new(510, 510));
        }
        assert!(matches!(
            builder.fit_size(),
            Err(AtlasError::NoFittingSize { max_side: 1024, .. })
        ));
        // A failed fit leaves the configuration untouched.
        assert_eq!(builder.config(), &AtlasConfig::default());
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let config = AtlasConfig::new(64, 64).with_null_quad(None);
        let sprites = [
            SpriteDesc::new(4, 8),
            SpriteDesc::new(8, 4),
            SpriteDesc::new(2, 16),
        ];
        let layout = pack_sprites(&config, &sprites).unwrap();
        let order: Vec<usize> = layout.packing_order().iter().map(|id| id.index()).collect();
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn null_quad_is_reserved_after_sprites() {
        let config = AtlasConfig::new(64, 64);
        let layout = pack_sprites(&config, &[SpriteDesc::new(30, 62)]).unwrap();
        // The sprite claims a full-height 32-pixel column; the patch starts beside it.
        assert_eq!(layout.null_quad(), Some(Region::new(32, 0, 4, 4)));
        assert!(layout.null_texcoord().is_some());
    }

    #[test]
    fn without_null_quad_exact_fill_succeeds() {
        let config = AtlasConfig::new(64, 64).with_padding(0).with_null_quad(None);
        let layout = pack_sprites(&config, &[SpriteDesc::new(64, 64)]).unwrap();
        assert_eq!(layout.entries()[0].region, Region::new(0, 0, 64, 64));
        assert_eq!(layout.null_quad(), None);

        // With the default null quad the same set no longer fits.
        let err = pack_sprites(&config.with_null_quad(Some(4)), &[SpriteDesc::new(64, 64)]);
        assert!(matches!(
            err,
            Err(AtlasError::CapacityExceeded {
                slot: Slot::NullQuad,
                ..
            })
        ));
    }

    #[test]
    fn oversized_sprite_aborts_build() {
        let config = AtlasConfig::new(64, 64);
        let sprites = [SpriteDesc::new(16, 16), SpriteDesc::new(63, 10)];
        let err = pack_sprites(&config, &sprites).unwrap_err();
        assert_eq!(
            err,
            AtlasError::CapacityExceeded {
                slot: Slot::Sprite(SpriteId::new(1)),
                width: 65,
                height: 12,
                atlas_width: 64,
                atlas_height: 64,
            }
        );
    }

    #[test]
    fn empty_sprite_is_rejected_before_packing() {
        let config = AtlasConfig::default();
        let sprites = [SpriteDesc::new(16, 16), SpriteDesc::new(0, 16)];
        assert_eq!(
            pack_sprites(&config, &sprites),
            Err(AtlasError::EmptySprite {
                sprite: SpriteId::new(1)
            })
        );
    }

    #[test]
    fn empty_set_yields_only_null_quad() {
        let layout = pack_sprites(&AtlasConfig::default(), &[]).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.null_quad(), Some(Region::new(0, 0, 4, 4)));
    }

    #[test]
    fn builder_ids_address_layout() {
        let mut builder = AtlasBuilder::new(AtlasConfig::new(256, 256));
        let small = builder.add(SpriteDesc::new(10, 10));
        let big = builder.add(SpriteDesc::new(100, 50).with_alpha(true));
        assert_eq!(builder.len(), 2);
        let layout = builder.build().unwrap();
        assert_eq!(layout.get(big).unwrap().region.width, 100);
        assert!(layout.get(big).unwrap().has_alpha);
        assert_eq!(layout.get(small).unwrap().region.width, 10);
        assert_eq!(layout.packing_order(), [big, small]);
    }

    #[test]
    fn random_sprite_sets_pack_validly() {
        let mut rng = StdRng::seed_from_u64(0xa71a5);
        for _ in 0..10 {
            let config = AtlasConfig::new(1024, 1024);
            let sprites: Vec<SpriteDesc> = (0..rng.gen_range(1..200))
                .map(|_| SpriteDesc::new(rng.gen_range(1..=48), rng.gen_range(1..=48)))
                .collect();
            let layout = pack_sprites(&config, &sprites).unwrap();
            assert_eq!(layout.len(), sprites.len());
            assert_valid(&layout, &config, &sprites);
        }
    }
}
