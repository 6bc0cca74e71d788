// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// An axis-aligned pixel region of the canvas.
///
/// Regions are half-open: a region covers the pixels `[x, x + width) x [y, y + height)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Create a region from its origin and size.
    #[inline(always)]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in pixels, widened so that a full `u32` canvas cannot overflow.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// One past the right-most column.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom-most row.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Return true if the region covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `other` lies entirely within this region.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Determines whether two regions share at least one pixel.
    ///
    /// Unlike closed bounding boxes, regions that only touch along an edge do
    /// not overlap, since packed sprites are allowed to be adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use quilt_packer::Region;
    ///
    /// let a = Region::new(0, 0, 10, 10);
    /// assert!(a.overlaps(&Region::new(5, 5, 10, 10)));
    /// assert!(!a.overlaps(&Region::new(10, 0, 10, 10)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink the region by `amount` pixels on every side.
    ///
    /// Returns an empty region at the centre when the inset consumes the whole extent.
    #[inline]
    pub fn inset(&self, amount: u32) -> Self {
        let twice = amount.saturating_mul(2);
        Self {
            x: self.x.saturating_add(amount.min(self.width / 2)),
            y: self.y.saturating_add(amount.min(self.height / 2)),
            width: self.width.saturating_sub(twice),
            height: self.height.saturating_sub(twice),
        }
    }
}

/// Summary of a packer's tree, as returned by [`RectPacker::stats`][crate::RectPacker::stats]
/// and [`RectPacker::release`][crate::RectPacker::release].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PackStats {
    /// Total number of nodes, internal and leaf.
    pub nodes: usize,
    /// Number of leaves.
    pub leaves: usize,
    /// Number of leaves holding a placement.
    pub filled: usize,
    /// Pixels covered by placements.
    pub filled_area: u64,
    /// Pixels covered by free leaves.
    pub free_area: u64,
    /// Depth of the deepest leaf; the root alone has depth 0.
    pub depth: usize,
}
