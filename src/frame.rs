//! Borrowed pixel-buffer views and per-plane frame layout.
//!
//! All buffers in Refract are caller-owned: operations borrow them for a
//! single call and never retain or free them. [`PixelBuffer`] and
//! [`PixelBufferMut`] describe one packed plane (geometry validated at
//! construction); [`plane_layout`] splits a flat frame buffer into its
//! per-plane views for a given [`VideoFormat`].

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::format::{PixelFormat, VideoFormat};

/// Location and geometry of one plane inside a flat frame buffer.
///
/// Offsets assume the tight packing produced by
/// [`PixelFormat::frame_size`]: no inter-plane padding, stride equal to
/// the plane's row width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Byte offset of the plane from the start of the frame buffer.
    pub offset: usize,
    /// Plane width in pixels (chroma planes may be narrower than the frame).
    pub width: usize,
    /// Plane height in rows.
    pub height: usize,
    /// Bytes per row.
    pub stride: usize,
    /// Interleaved channels per pixel: 1 for bare planes, 2 for
    /// semi-planar chroma, 3-4 for packed RGB.
    pub channels: usize,
}

impl PlaneLayout {
    /// Bytes this plane occupies.
    pub const fn size(&self) -> usize {
        self.stride * self.height
    }

    /// Borrow this plane out of a flat frame buffer.
    pub fn view<'a>(&self, frame: &'a [u8]) -> Result<PixelBuffer<'a>> {
        let end = self.offset + self.size();
        if frame.len() < end {
            return Err(Error::SizeMismatch {
                expected: end,
                actual: frame.len(),
            });
        }
        PixelBuffer::new(
            &frame[self.offset..end],
            self.width,
            self.height,
            self.stride,
            self.channels,
        )
    }

    /// Mutably borrow this plane out of a flat frame buffer.
    pub fn view_mut<'a>(&self, frame: &'a mut [u8]) -> Result<PixelBufferMut<'a>> {
        let end = self.offset + self.size();
        if frame.len() < end {
            return Err(Error::SizeMismatch {
                expected: end,
                actual: frame.len(),
            });
        }
        PixelBufferMut::new(
            &mut frame[self.offset..end],
            self.width,
            self.height,
            self.stride,
            self.channels,
        )
    }
}

/// Split a frame format into its plane layouts.
///
/// Packed formats yield a single multi-channel plane; planar YUV yields
/// Y/Cb/Cr entries; semi-planar yields Y plus one 2-channel chroma plane.
pub fn plane_layout(format: VideoFormat) -> SmallVec<[PlaneLayout; 3]> {
    let w = format.width as usize;
    let h = format.height as usize;
    let mut planes = SmallVec::new();

    let packed = |bpp: usize| PlaneLayout {
        offset: 0,
        width: w,
        height: h,
        stride: w * bpp,
        channels: bpp,
    };
    let luma = PlaneLayout {
        offset: 0,
        width: w,
        height: h,
        stride: w,
        channels: 1,
    };

    match format.pixel_format {
        PixelFormat::I420 => {
            planes.push(luma);
            planes.push(PlaneLayout {
                offset: w * h,
                width: w / 2,
                height: h / 2,
                stride: w / 2,
                channels: 1,
            });
            planes.push(PlaneLayout {
                offset: w * h + (w / 2) * (h / 2),
                width: w / 2,
                height: h / 2,
                stride: w / 2,
                channels: 1,
            });
        }
        PixelFormat::Nv12 | PixelFormat::Nv21 => {
            planes.push(luma);
            planes.push(PlaneLayout {
                offset: w * h,
                width: w / 2,
                height: h / 2,
                stride: w,
                channels: 2,
            });
        }
        PixelFormat::I422 => {
            planes.push(luma);
            planes.push(PlaneLayout {
                offset: w * h,
                width: w / 2,
                height: h,
                stride: w / 2,
                channels: 1,
            });
            planes.push(PlaneLayout {
                offset: w * h + (w / 2) * h,
                width: w / 2,
                height: h,
                stride: w / 2,
                channels: 1,
            });
        }
        PixelFormat::I444 => {
            planes.push(luma);
            planes.push(PlaneLayout {
                offset: w * h,
                width: w,
                height: h,
                stride: w,
                channels: 1,
            });
            planes.push(PlaneLayout {
                offset: 2 * w * h,
                width: w,
                height: h,
                stride: w,
                channels: 1,
            });
        }
        PixelFormat::Yuyv | PixelFormat::Uyvy => planes.push(packed(2)),
        PixelFormat::Rgb24 | PixelFormat::Bgr24 => planes.push(packed(3)),
        PixelFormat::Rgba | PixelFormat::Bgra => planes.push(packed(4)),
        PixelFormat::Gray8 => planes.push(packed(1)),
    }

    planes
}

fn validate_geometry(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
) -> Result<()> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(Error::Config(
            "plane dimensions and channels must be non-zero".into(),
        ));
    }
    if stride < width * channels {
        return Err(Error::Config(format!(
            "stride {} shorter than row width {}",
            stride,
            width * channels
        )));
    }
    // The final row only needs its pixel bytes, not the full stride.
    let required = stride * (height - 1) + width * channels;
    if len < required {
        return Err(Error::SizeMismatch {
            expected: required,
            actual: len,
        });
    }
    Ok(())
}

/// Immutable view over one packed image plane.
///
/// Rows are `stride` bytes apart; only the leading `width * channels`
/// bytes of each row carry pixels, the remainder is padding.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a borrowed plane, validating the geometry against the slice.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    ) -> Result<Self> {
        validate_geometry(data.len(), width, height, stride, channels)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            channels,
        })
    }

    /// Plane width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The underlying bytes.
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// One row of pixels, padding excluded.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels]
    }
}

/// Mutable view over one packed image plane.
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    channels: usize,
}

impl<'a> PixelBufferMut<'a> {
    /// Wrap a mutably borrowed plane, validating the geometry.
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: usize,
    ) -> Result<Self> {
        validate_geometry(data.len(), width, height, stride, channels)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            channels,
        })
    }

    /// Plane width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// One row of pixels, padding excluded.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width * self.channels]
    }
}
