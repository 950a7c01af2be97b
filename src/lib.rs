//! # Refract
//!
//! Pixel-format conversion and image scaling for raw video frames.
//!
//! Refract implements the numeric core that sits on the real-time path
//! between a capture source and a video encoder: chroma resampling
//! between planar YUV layouts (I420, I422, I444, NV12, YUY2, UYVY),
//! fixed-point BT.601 RGB <-> YCbCr conversion, and fast image scaling
//! (nearest neighbor and box sampling).
//!
//! ## Design
//!
//! - **Caller-owned memory**: every operation borrows its buffers for a
//!   single call. Nothing is allocated per frame, retained, or freed.
//! - **Stateless transforms**: each call is a one-shot, idempotent
//!   buffer-to-buffer transform. Concurrent calls on independent buffers
//!   need no coordination.
//! - **Closed format dispatch**: pixel formats are a closed enum;
//!   unsupported pairs are typed errors, not runtime surprises.
//! - **Frames are dropped, not truncated**: a source buffer whose length
//!   does not match its declared format is rejected before anything is
//!   written.
//!
//! ## Quick start
//!
//! ```rust
//! use refract::converters::{FrameConverter, PixelFormat};
//!
//! # fn main() -> refract::Result<()> {
//! // Convert captured YUY2 frames to I420 for an encoder.
//! let converter = FrameConverter::new(PixelFormat::Yuyv, PixelFormat::I420, 4, 4)?;
//! let captured = vec![128u8; PixelFormat::Yuyv.frame_size(4, 4)];
//! let mut i420 = vec![0u8; converter.output_size()];
//! converter.convert(&captured, &mut i420)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod converters;
pub mod error;
pub mod format;
pub mod frame;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::converters::{FrameConverter, ScaleAlgorithm, VideoScale};
    pub use crate::error::{Error, Result};
    pub use crate::format::{PixelFormat, VideoFormat};
    pub use crate::frame::{plane_layout, PixelBuffer, PixelBufferMut, PlaneLayout};
}

pub use error::{Error, Result};
