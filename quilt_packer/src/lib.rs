// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=quilt_packer --heading-base-level=0

//! Quilt Packer: a binary-tree rectangle bin packer.
//!
//! Quilt Packer places rectangles into a fixed-size canvas, one at a time, and is the
//! building block used by `quilt_atlas` to combine many small sprites into a single
//! texture atlas.
//!
//! - [`RectPacker::insert`] claims a region of exactly the requested size, or reports that
//!   no free space is large enough.
//! - Placements never overlap and never leave the canvas.
//! - Placement is deterministic: the same sequence of requests always yields the same layout.
//!
//! The canvas is partitioned by a binary tree whose leaves are free or filled regions. An
//! insertion walks the leaves depth-first, left before right, and splits the first free leaf
//! large enough for the request. Traversals use an explicit stack, so degenerate trees
//! (deep chains produced by thousands of thin placements) do not exhaust the call stack.
//!
//! The packer is greedy and has no lookahead. Callers get markedly better results by
//! inserting in order of decreasing area.
//!
//! # Example
//!
//! ```rust
//! use quilt_packer::{PackError, RectPacker, Region};
//!
//! let mut packer = RectPacker::new(100, 100);
//! let a = packer.insert(50, 50).unwrap();
//! let b = packer.insert(50, 50).unwrap();
//! assert_eq!(a, Region::new(0, 0, 50, 50));
//! assert!(!a.overlaps(&b));
//!
//! // Requests larger than the canvas can never succeed.
//! assert_eq!(
//!     packer.try_insert(200, 10),
//!     Err(PackError::CapacityExceeded { width: 200, height: 10 })
//! );
//!
//! // Tear down once the placements have been copied out.
//! let stats = packer.release();
//! assert_eq!(stats.filled, 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod packer;
mod types;

pub use error::PackError;
pub use packer::RectPacker;
pub use types::{PackStats, Region};
