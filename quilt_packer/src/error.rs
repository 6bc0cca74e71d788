// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by [`RectPacker::try_insert`][crate::RectPacker::try_insert].

/// Why a region could not be claimed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    /// The request had a zero width or height.
    #[error("invalid request {width}x{height}: both dimensions must be non-zero")]
    InvalidRequest {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// No free leaf is large enough. The canvas is too small for the set being packed.
    #[error("not enough room in texture atlas for a {width}x{height} region")]
    CapacityExceeded {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}
