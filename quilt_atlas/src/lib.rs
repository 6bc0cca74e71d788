// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=quilt_atlas --heading-base-level=0

//! Quilt Atlas: combine many small sprites into one texture atlas.
//!
//! Binding one large texture instead of dozens of small ones lets a UI renderer draw
//! every sprite (and every flat-coloured quad) without switching textures or pipelines.
//! This crate computes where each sprite goes and hands the result to a renderer.
//!
//! - [`pack_sprites`] / [`AtlasBuilder::build`] sort sprites by decreasing area, pad each
//!   one so linear filtering never bleeds between neighbours, and place them with
//!   [`quilt_packer::RectPacker`].
//! - A small opaque white "null quad" is reserved after the sprites. Untextured geometry
//!   samples it through [`AtlasLayout::null_texcoord`].
//! - [`AtlasLayout`] maps each [`SpriteId`] to its pixel region and to normalized texture
//!   coordinates ([`AtlasLayout::uv_rect`]).
//! - [`Compositor`] is the seam to the renderer: [`AtlasBuilder::build_into`] packs first
//!   and only then asks the compositor to draw, so a failed build never produces a
//!   half-drawn atlas.
//!
//! A build either places every sprite or fails with [`AtlasError::CapacityExceeded`];
//! there is no retry with a larger atlas.
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` for Kurbo's float math.
//! - `libm`: use `libm` instead, for `no_std` targets.
//! - `serde`: derive `Serialize`/`Deserialize` for [`AtlasConfig`], [`SpriteDesc`], and
//!   [`SpriteBorder`].
//! - `image`: [`ImageCompositor`], compositing `image::RgbaImage` sprites on the CPU.
//!
//! # Example
//!
//! ```rust
//! use quilt_atlas::{AtlasBuilder, AtlasConfig, SpriteBorder, SpriteDesc};
//!
//! let mut builder = AtlasBuilder::new(AtlasConfig::default());
//! let clockface = builder.add(SpriteDesc::new(256, 256).with_alpha(true));
//! let window = builder.add(
//!     SpriteDesc::new(128, 64).with_border(SpriteBorder::new(3, 3, 0, 32)),
//! );
//!
//! let layout = builder.build().unwrap();
//!
//! // The largest sprite is packed first, inside a one-pixel border.
//! let entry = layout.get(clockface).unwrap();
//! assert_eq!((entry.region.x, entry.region.y), (1, 1));
//!
//! // Texture coordinates are normalized to the atlas size.
//! let uv = layout.uv_rect(window).unwrap();
//! assert!(uv.x0 >= 0.0 && uv.x1 <= 1.0);
//! assert!(layout.null_texcoord().is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compose;
mod config;
mod error;
#[cfg(feature = "image")]
mod image_sink;
mod layout;
mod pack;
mod sprite;

pub use compose::{Compositor, compose};
pub use config::AtlasConfig;
pub use error::{AtlasError, Slot};
#[cfg(feature = "image")]
pub use image_sink::{ImageCompositor, ImageCompositorError, describe_image};
pub use layout::{AtlasEntry, AtlasLayout};
pub use pack::{AtlasBuilder, pack_sprites};
pub use sprite::{SpriteBorder, SpriteDesc, SpriteId};

pub use quilt_packer::Region;
