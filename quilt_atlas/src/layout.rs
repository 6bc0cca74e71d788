// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The result of packing: where every sprite landed, and texture coordinates for it.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use quilt_packer::Region;

use crate::sprite::{SpriteBorder, SpriteId};

/// Placement of one sprite in the atlas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtlasEntry {
    /// The sprite this entry places.
    pub sprite: SpriteId,
    /// Where the sprite's own pixels go. Same size as the sprite.
    pub region: Region,
    /// The region claimed from the packer: `region` plus padding on every side.
    pub padded: Region,
    /// Copied from the sprite description.
    pub has_alpha: bool,
    /// Copied from the sprite description.
    pub border: SpriteBorder,
}

impl AtlasEntry {
    /// The sprite's pixels as a rectangle in atlas pixel space.
    pub fn pixel_rect(&self) -> Rect {
        region_rect(self.region)
    }
}

/// A packed atlas: one entry per input sprite and the optional null quad.
///
/// Entries are stored in input order, so [`SpriteId::index`] indexes
/// [`AtlasLayout::entries`]. [`AtlasLayout::packing_order`] gives the order the
/// packer placed them in, largest first.
#[derive(Clone, Debug, PartialEq)]
pub struct AtlasLayout {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) entries: Vec<AtlasEntry>,
    pub(crate) order: Vec<SpriteId>,
    pub(crate) null_quad: Option<Region>,
}

impl AtlasLayout {
    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of sprites placed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the atlas holds no sprites.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in input order.
    pub fn entries(&self) -> &[AtlasEntry] {
        &self.entries
    }

    /// Sprite ids in the order they were packed.
    pub fn packing_order(&self) -> &[SpriteId] {
        &self.order
    }

    /// The entry for a sprite.
    pub fn get(&self, sprite: SpriteId) -> Option<&AtlasEntry> {
        self.entries.get(sprite.index())
    }

    /// The white filler patch, if one was reserved.
    pub fn null_quad(&self) -> Option<Region> {
        self.null_quad
    }

    /// Normalized texture coordinates of a sprite's pixels, with `(0, 0)` at the
    /// top-left corner of the atlas and `(1, 1)` at the bottom-right.
    pub fn uv_rect(&self, sprite: SpriteId) -> Option<Rect> {
        let entry = self.get(sprite)?;
        Some(self.normalize(entry.pixel_rect()))
    }

    /// Normalized texture coordinate at the centre of the null quad.
    ///
    /// Untextured quads can sample this point to get flat white without
    /// switching texture or pipeline. The patch is at least two pixels wide in
    /// the reference setup, so bilinear filtering at its centre reads only white
    /// texels.
    pub fn null_texcoord(&self) -> Option<Point> {
        let center = region_rect(self.null_quad?).center();
        Some(Point::new(
            center.x / f64::from(self.width),
            center.y / f64::from(self.height),
        ))
    }

    /// Largest uniform scale at which the whole atlas fits a viewport.
    ///
    /// Used to preview the generated atlas on screen.
    pub fn fit_scale(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        let sx = viewport_width / f64::from(self.width);
        let sy = viewport_height / f64::from(self.height);
        sx.min(sy)
    }

    /// Fraction of the atlas covered by sprite pixels, padding excluded.
    pub fn occupancy(&self) -> f64 {
        let used: u64 = self.entries.iter().map(|e| e.region.area()).sum();
        let total = u64::from(self.width) * u64::from(self.height);
        if total == 0 {
            return 0.0;
        }
        used as f64 / total as f64
    }

    fn normalize(&self, rect: Rect) -> Rect {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        Rect::new(rect.x0 / w, rect.y0 / h, rect.x1 / w, rect.y1 / h)
    }
}

fn region_rect(region: Region) -> Rect {
    Rect::new(
        f64::from(region.x),
        f64::from(region.y),
        f64::from(region.right()),
        f64::from(region.bottom()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn layout() -> AtlasLayout {
        let entry = AtlasEntry {
            sprite: SpriteId::new(0),
            region: Region::new(1, 1, 32, 16),
            padded: Region::new(0, 0, 34, 18),
            has_alpha: true,
            border: SpriteBorder::NONE,
        };
        AtlasLayout {
            width: 128,
            height: 64,
            entries: vec![entry],
            order: vec![SpriteId::new(0)],
            null_quad: Some(Region::new(34, 0, 4, 4)),
        }
    }

    #[test]
    fn uv_rect_normalizes_by_atlas_size() {
        let layout = layout();
        let uv = layout.uv_rect(SpriteId::new(0)).unwrap();
        assert_eq!(uv, Rect::new(1.0 / 128.0, 1.0 / 64.0, 33.0 / 128.0, 17.0 / 64.0));
        assert!(layout.uv_rect(SpriteId::new(1)).is_none());
    }

    #[test]
    fn null_texcoord_samples_patch_centre() {
        let layout = layout();
        let p = layout.null_texcoord().unwrap();
        assert_eq!(p, Point::new(36.0 / 128.0, 2.0 / 64.0));
    }

    #[test]
    fn fit_scale_uses_tighter_axis() {
        let layout = layout();
        assert_eq!(layout.fit_scale(640.0, 480.0), 5.0);
        assert_eq!(layout.fit_scale(64.0, 480.0), 0.5);
    }

    #[test]
    fn occupancy_excludes_padding() {
        let layout = layout();
        assert_eq!(layout.occupancy(), (32.0 * 16.0) / (128.0 * 64.0));
    }
}
