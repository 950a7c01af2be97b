//! Format converters for raw video frames.
//!
//! This module provides pure Rust implementations of the pixel-buffer
//! transforms sitting between a capture source and an encoder: colorspace
//! conversion, chroma resampling, packed-format deinterleaving and image
//! scaling. Every operation is a stateless buffer-to-buffer transform
//! over caller-owned memory.
//!
//! # Converters
//!
//! - [`FrameConverter`]: whole-frame pixel format conversion
//! - [`VideoScale`]: resolution scaling (nearest neighbor, box sampling)
//!
//! The per-pixel and per-plane primitives these are built from
//! ([`rgb_to_ycbcr`], [`i444_to_i420`], [`nearest_neighbor`], ...) are
//! exported for callers that manage their own planes.
//!
//! # Example
//!
//! ```rust,ignore
//! use refract::converters::{FrameConverter, PixelFormat};
//!
//! let converter = FrameConverter::new(
//!     PixelFormat::Yuyv,
//!     PixelFormat::I420,
//!     1920, 1080,
//! )?;
//!
//! let mut i420 = vec![0u8; converter.output_size()];
//! converter.convert(&captured, &mut i420)?;
//! ```

mod chroma;
mod colorspace;
mod scale;

pub use chroma::{
    decode_uyvy, decode_yuyv, i422_to_i420, i444_to_i420, nv12_to_i420, nv21_to_i420,
    uyvy_to_i420, yuyv_to_i420, SIZE_TOLERANCE,
};
pub use colorspace::{
    i444_to_rgba, repeat_rgb_to_ycbcr, repeat_ycbcr_to_rgb, rgb_to_ycbcr, rgba_to_i444,
    ycbcr_to_rgb, FrameConverter,
};
pub use scale::{box_sampling, nearest_neighbor, ScaleAlgorithm, VideoScale};

pub use crate::format::PixelFormat;
