// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary-tree packer: node arena, insertion, and teardown.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::PackError;
use crate::types::{PackStats, Region};

/// Arena slot of the root node.
const ROOT: usize = 0;

/// Inline capacity of traversal stacks. Deeper trees spill to the heap.
type NodeStack = SmallVec<[usize; 32]>;

#[derive(Clone, Debug)]
struct Node {
    region: Region,
    filled: bool,
    /// `[left, right]`; the two children tile `region` exactly.
    children: Option<[usize; 2]>,
}

impl Node {
    const fn leaf(region: Region) -> Self {
        Self {
            region,
            filled: false,
            children: None,
        }
    }
}

/// How a leaf answers a request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Fit {
    /// Filled already, or too small in area or along either axis.
    Reject,
    /// Same width and height as the request.
    Exact,
    /// Larger than the request and at least as large along both axes.
    Split,
}

/// A rectangle bin packer over a fixed-size canvas.
///
/// The canvas is partitioned by a binary tree. Every leaf is either free or
/// holds exactly one placement; every internal node has two children that tile
/// it with no gap and no overlap. [`RectPacker::insert`] walks the tree
/// depth-first, always trying the left child before the right one, and claims
/// the first free leaf that can hold the request, splitting it when it is
/// larger than needed.
///
/// Placements are final: there is no per-placement removal. Call
/// [`RectPacker::reset`] to start over on the same canvas, or
/// [`RectPacker::release`] to tear the tree down once the placements have been
/// copied out.
///
/// ## Example
///
/// ```rust
/// use quilt_packer::{RectPacker, Region};
///
/// let mut packer = RectPacker::new(100, 100);
/// assert_eq!(packer.insert(60, 100), Some(Region::new(0, 0, 60, 100)));
/// assert_eq!(packer.insert(40, 100), Some(Region::new(60, 0, 40, 100)));
///
/// // The canvas is now completely covered.
/// assert_eq!(packer.insert(1, 1), None);
/// ```
pub struct RectPacker {
    nodes: Vec<Node>,
}

impl core::fmt::Debug for RectPacker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RectPacker")
            .field("canvas", &self.canvas())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl RectPacker {
    /// Create a packer whose single free leaf covers `width` x `height` pixels.
    ///
    /// Both dimensions should be non-zero; on an empty canvas every insertion fails.
    pub fn new(width: u32, height: u32) -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node::leaf(Region::new(0, 0, width, height)));
        Self { nodes }
    }

    /// The full canvas region.
    pub fn canvas(&self) -> Region {
        self.nodes[ROOT].region
    }

    /// Number of nodes currently in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Claim a `width` x `height` region of the canvas.
    ///
    /// Returns `None` if the request has a zero dimension or no free leaf is
    /// large enough. See [`RectPacker::try_insert`] for the reason of a failure.
    pub fn insert(&mut self, width: u32, height: u32) -> Option<Region> {
        self.try_insert(width, height).ok()
    }

    /// Claim a `width` x `height` region of the canvas.
    ///
    /// On success the returned region has exactly the requested size, lies
    /// within the canvas, and is disjoint from every earlier placement.
    ///
    /// Leaves are visited depth-first, left child first. The first free leaf
    /// that matches the request exactly is filled. The first free leaf that is
    /// larger is split in two: the left child keeps the leaf's origin and is
    /// sized to the request along one axis. The split is vertical (side by
    /// side) when the horizontal leftover `width - request_width` is strictly
    /// greater than the vertical leftover, and horizontal (stacked) otherwise.
    /// The request then continues into the new left child.
    pub fn try_insert(&mut self, width: u32, height: u32) -> Result<Region, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidRequest { width, height });
        }
        let request = Region::new(0, 0, width, height);

        let mut stack = NodeStack::new();
        stack.push(ROOT);
        while let Some(idx) = stack.pop() {
            if let Some([left, right]) = self.nodes[idx].children {
                // Right is only visited once the whole left subtree has failed.
                stack.push(right);
                stack.push(left);
                continue;
            }
            match self.fit(idx, &request) {
                Fit::Reject => {}
                Fit::Exact => {
                    let node = &mut self.nodes[idx];
                    node.filled = true;
                    return Ok(node.region);
                }
                Fit::Split => {
                    let left = self.split(idx, &request);
                    stack.push(left);
                }
            }
        }
        Err(PackError::CapacityExceeded { width, height })
    }

    fn fit(&self, idx: usize, request: &Region) -> Fit {
        let node = &self.nodes[idx];
        let region = node.region;
        if node.filled {
            return Fit::Reject;
        }
        if region.area() < request.area()
            || region.width < request.width
            || region.height < request.height
        {
            return Fit::Reject;
        }
        if region.area() == request.area()
            && region.width == request.width
            && region.height == request.height
        {
            return Fit::Exact;
        }
        if region.area() > request.area() {
            return Fit::Split;
        }
        Fit::Reject
    }

    /// Turn leaf `idx` into an internal node and return its left child.
    fn split(&mut self, idx: usize, request: &Region) -> usize {
        let r = self.nodes[idx].region;
        let spare_w = r.width - request.width;
        let spare_h = r.height - request.height;

        let (left, right) = if spare_w > spare_h {
            (
                Region::new(r.x, r.y, request.width, r.height),
                Region::new(r.x + request.width, r.y, spare_w, r.height),
            )
        } else {
            (
                Region::new(r.x, r.y, r.width, request.height),
                Region::new(r.x, r.y + request.height, r.width, spare_h),
            )
        };
        debug_assert_eq!(
            left.area() + right.area(),
            r.area(),
            "split children must tile their parent"
        );

        let left_idx = self.nodes.len();
        self.nodes.push(Node::leaf(left));
        self.nodes.push(Node::leaf(right));
        self.nodes[idx].children = Some([left_idx, left_idx + 1]);
        left_idx
    }

    /// Regions claimed so far, in arena order.
    pub fn filled_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.children.is_none() && n.filled)
            .map(|n| n.region)
    }

    /// Free leaves that could still receive a placement.
    pub fn free_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.children.is_none() && !n.filled)
            .map(|n| n.region)
    }

    /// Pixels covered by placements.
    pub fn filled_area(&self) -> u64 {
        self.filled_regions().map(|r| r.area()).sum()
    }

    /// Pixels not yet covered by placements.
    ///
    /// Free area is fragmented across leaves, so a request smaller than this
    /// can still fail.
    pub fn free_area(&self) -> u64 {
        self.free_regions().map(|r| r.area()).sum()
    }

    /// Summarize the tree.
    pub fn stats(&self) -> PackStats {
        let mut stats = PackStats::default();
        self.visit_post_order(|node, depth| stats.record(node, depth));
        stats
    }

    /// Discard every placement and return to a single free leaf over the canvas.
    pub fn reset(&mut self) {
        let canvas = self.canvas();
        self.nodes.clear();
        self.nodes.push(Node::leaf(canvas));
    }

    /// Tear the tree down and return a summary of what was freed.
    ///
    /// The summary is gathered by a post-order walk before the arena is dropped.
    /// Consumes the packer; placements returned earlier stay valid as plain values.
    pub fn release(self) -> PackStats {
        let stats = self.stats();
        debug_assert_eq!(stats.nodes, self.nodes.len(), "teardown must reach every node");
        stats
    }

    /// Visit every node with its depth, children before parents, without recursion.
    fn visit_post_order(&self, mut f: impl FnMut(&Node, usize)) {
        // (node, depth, children already pushed)
        let mut stack: SmallVec<[(usize, usize, bool); 32]> = SmallVec::new();
        stack.push((ROOT, 0, false));
        while let Some((idx, depth, expanded)) = stack.pop() {
            let node = &self.nodes[idx];
            match node.children {
                Some([left, right]) if !expanded => {
                    stack.push((idx, depth, true));
                    stack.push((right, depth + 1, false));
                    stack.push((left, depth + 1, false));
                }
                _ => f(node, depth),
            }
        }
    }
}

impl PackStats {
    fn record(&mut self, node: &Node, depth: usize) {
        self.nodes += 1;
        if node.children.is_some() {
            return;
        }
        self.leaves += 1;
        self.depth = self.depth.max(depth);
        if node.filled {
            self.filled += 1;
            self.filled_area += node.region.area();
        } else {
            self.free_area += node.region.area();
        }
    }
}
