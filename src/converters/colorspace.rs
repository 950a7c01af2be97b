//! Colorspace conversion (RGB <-> YCbCr) and whole-frame format dispatch.
//!
//! The pixel math is fixed-point ITU-R BT.601. The forward transform is
//! range-safe by construction; the inverse clamps its intermediates
//! because extreme chroma can overshoot the 8-bit range.

use crate::converters::chroma::{self, SIZE_TOLERANCE};
use crate::error::{Error, Result};
use crate::format::PixelFormat;

// ============================================================================
// Pixel math
// ============================================================================

/// Convert one RGB sample to YCbCr (BT.601 fixed point).
///
/// The result always lands in `[0, 255]` for 8-bit inputs, so no
/// clamping is applied.
#[inline]
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = i32::from(r);
    let g = i32::from(g);
    let b = i32::from(b);

    let y = (77 * r + 150 * g + 29 * b) >> 8;
    let cb = (-43 * r - 85 * g + 128 * b + 0x8000) >> 8;
    let cr = (128 * r - 107 * g - 21 * b + 0x8000) >> 8;

    (y as u8, cb as u8, cr as u8)
}

/// Convert one YCbCr sample to RGB (BT.601 fixed point).
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> (u8, u8, u8) {
    let y = i32::from(y) << 8;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    let r = clamp16(y + 359 * cr) >> 8;
    let g = clamp16(y - 88 * cb - 183 * cr) >> 8;
    let b = clamp16(y + 454 * cb) >> 8;

    (r as u8, g as u8, b as u8)
}

#[inline]
fn clamp16(v: i32) -> i32 {
    v.clamp(0, 0xffff)
}

// ============================================================================
// Batch variants
// ============================================================================

/// Fill three destination slices with the YCbCr encoding of one fixed
/// RGB sample. Used to synthesize flat-color frames without re-deriving
/// the coefficients per pixel. All three slices must share a length.
pub fn repeat_rgb_to_ycbcr(y: &mut [u8], cb: &mut [u8], cr: &mut [u8], r: u8, g: u8, b: u8) {
    debug_assert!(y.len() == cb.len() && cb.len() == cr.len());
    let (yy, cb2, cr2) = rgb_to_ycbcr(r, g, b);
    y.fill(yy);
    cb.fill(cb2);
    cr.fill(cr2);
}

/// Fill three destination slices with the RGB decoding of one fixed
/// YCbCr sample. Counterpart of [`repeat_rgb_to_ycbcr`].
pub fn repeat_ycbcr_to_rgb(r: &mut [u8], g: &mut [u8], b: &mut [u8], y: u8, cb: u8, cr: u8) {
    debug_assert!(r.len() == g.len() && g.len() == b.len());
    let (r2, g2, b2) = ycbcr_to_rgb(y, cb, cr);
    r.fill(r2);
    g.fill(g2);
    b.fill(b2);
}

// ============================================================================
// Full-plane transforms
// ============================================================================

/// Expand planar I444 into packed RGBA, forcing alpha to 255.
///
/// All three planes share `stride`; the full `stride * height` region is
/// converted and `dst` must hold four bytes per sample.
pub fn i444_to_rgba(dst: &mut [u8], y: &[u8], cb: &[u8], cr: &[u8], stride: usize, height: usize) {
    let n = stride * height;
    let mut i = 0;
    for j in 0..n {
        let (r, g, b) = ycbcr_to_rgb(y[j], cb[j], cr[j]);
        dst[i] = r;
        dst[i + 1] = g;
        dst[i + 2] = b;
        dst[i + 3] = 0xff;
        i += 4;
    }
}

/// Collapse packed RGBA into planar I444. Alpha is ignored.
///
/// Counterpart of [`i444_to_rgba`]: `src` holds `stride * height` RGBA
/// quads and each output plane receives `stride * height` samples.
pub fn rgba_to_i444(y: &mut [u8], cb: &mut [u8], cr: &mut [u8], src: &[u8], stride: usize, height: usize) {
    let n = stride * height;
    let mut addr = 0;
    for j in 0..n {
        let (yy, cb2, cr2) = rgb_to_ycbcr(src[addr], src[addr + 1], src[addr + 2]);
        y[j] = yy;
        cb[j] = cb2;
        cr[j] = cr2;
        addr += 4;
    }
}

// ============================================================================
// Whole-frame conversion
// ============================================================================

/// Video frame format converter.
///
/// Converts between pixel formats at a fixed resolution. The canonical
/// target is I420 (what encoders consume); I444 can additionally be
/// expanded to RGBA for display paths.
///
/// Construction validates dimensions eagerly so that per-frame calls
/// only check buffer lengths.
pub struct FrameConverter {
    source: PixelFormat,
    target: PixelFormat,
    width: u32,
    height: u32,
}

impl FrameConverter {
    /// Create a new converter.
    ///
    /// Fails if a dimension is zero or violates either format's chroma
    /// subsampling constraints.
    pub fn new(source: PixelFormat, target: PixelFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Config("width and height must be non-zero".into()));
        }
        if !source.dimensions_valid(width, height) || !target.dimensions_valid(width, height) {
            return Err(Error::Config(format!(
                "{width}x{height} violates subsampling constraints of {source:?} -> {target:?}"
            )));
        }
        tracing::debug!(?source, ?target, width, height, "configured frame converter");
        Ok(Self {
            source,
            target,
            width,
            height,
        })
    }

    /// Source pixel format.
    pub fn source(&self) -> PixelFormat {
        self.source
    }

    /// Target pixel format.
    pub fn target(&self) -> PixelFormat {
        self.target
    }

    /// Required output buffer size in bytes.
    pub fn output_size(&self) -> usize {
        self.target.frame_size(self.width, self.height)
    }

    /// Convert one frame.
    ///
    /// On a source-size mismatch the frame is dropped: nothing is
    /// written and [`Error::SizeMismatch`] is returned (non-fatal, the
    /// caller moves on to the next frame). Packed capture formats
    /// (NV12/NV21/YUY2/UYVY) tolerate [`SIZE_TOLERANCE`] bytes of slack;
    /// everything else must supply at least the nominal size.
    pub fn convert(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let expected_input = self.source.frame_size(self.width, self.height);
        let expected_output = self.output_size();

        match self.source {
            PixelFormat::Nv12 | PixelFormat::Nv21 | PixelFormat::Yuyv | PixelFormat::Uyvy => {
                if input.len().abs_diff(expected_input) > SIZE_TOLERANCE {
                    tracing::warn!(
                        actual = input.len(),
                        expected = expected_input,
                        "dropping frame: size outside tolerance"
                    );
                    return Err(Error::SizeMismatch {
                        expected: expected_input,
                        actual: input.len(),
                    });
                }
            }
            _ => {
                if input.len() < expected_input {
                    tracing::warn!(
                        actual = input.len(),
                        expected = expected_input,
                        "dropping frame: source buffer too small"
                    );
                    return Err(Error::SizeMismatch {
                        expected: expected_input,
                        actual: input.len(),
                    });
                }
            }
        }

        if output.len() < expected_output {
            return Err(Error::Config(format!(
                "output buffer too small: {} < {}",
                output.len(),
                expected_output
            )));
        }

        let w = self.width as usize;
        let h = self.height as usize;

        match (self.source, self.target) {
            // Same format - just copy
            (a, b) if a == b => {
                let n = expected_output.min(input.len());
                output[..n].copy_from_slice(&input[..n]);
            }

            // Planar narrowing
            (PixelFormat::I444, PixelFormat::I420) => self.i444_frame_to_i420(input, output),
            (PixelFormat::I422, PixelFormat::I420) => self.i422_frame_to_i420(input, output),

            // Capture-path conversions
            (PixelFormat::Nv12, PixelFormat::I420) => chroma::nv12_to_i420(input, w, h, output)?,
            (PixelFormat::Nv21, PixelFormat::I420) => chroma::nv21_to_i420(input, w, h, output)?,
            (PixelFormat::Yuyv, PixelFormat::I420) => chroma::yuyv_to_i420(input, w, h, output)?,
            (PixelFormat::Uyvy, PixelFormat::I420) => chroma::uyvy_to_i420(input, w, h, output)?,

            // RGB to YUV
            (PixelFormat::Rgba, PixelFormat::I420) => self.packed_rgb_to_i420(input, output, 4, false),
            (PixelFormat::Bgra, PixelFormat::I420) => self.packed_rgb_to_i420(input, output, 4, true),
            (PixelFormat::Rgb24, PixelFormat::I420) => self.packed_rgb_to_i420(input, output, 3, false),
            (PixelFormat::Bgr24, PixelFormat::I420) => self.packed_rgb_to_i420(input, output, 3, true),
            (PixelFormat::Rgba, PixelFormat::I444) => {
                let (y, rest) = output.split_at_mut(w * h);
                let (cb, cr) = rest.split_at_mut(w * h);
                rgba_to_i444(y, cb, cr, input, w, h);
            }

            // YUV to RGB
            (PixelFormat::I444, PixelFormat::Rgba) => {
                let y = &input[..w * h];
                let cb = &input[w * h..2 * w * h];
                let cr = &input[2 * w * h..3 * w * h];
                i444_to_rgba(output, y, cb, cr, w, h);
            }

            _ => {
                return Err(Error::Unsupported(format!(
                    "conversion {:?} -> {:?}",
                    self.source, self.target
                )));
            }
        }

        Ok(())
    }

    fn i444_frame_to_i420(&self, input: &[u8], output: &mut [u8]) {
        let w = self.width as usize;
        let h = self.height as usize;
        let y_size = w * h;
        let c_size = y_size / 4;

        output[..y_size].copy_from_slice(&input[..y_size]);
        let (dst_cb, dst_cr) = output[y_size..y_size + 2 * c_size].split_at_mut(c_size);
        chroma::halve_chroma_into(dst_cb, &input[y_size..2 * y_size], w, h);
        chroma::halve_chroma_into(dst_cr, &input[2 * y_size..3 * y_size], w, h);
    }

    fn i422_frame_to_i420(&self, input: &[u8], output: &mut [u8]) {
        let w = self.width as usize;
        let h = self.height as usize;
        let y_size = w * h;
        let c422 = (w / 2) * h;
        let c_size = y_size / 4;

        output[..y_size].copy_from_slice(&input[..y_size]);
        let (dst_cb, dst_cr) = output[y_size..y_size + 2 * c_size].split_at_mut(c_size);
        chroma::halve_rows_into(dst_cb, &input[y_size..y_size + c422], w / 2, h);
        chroma::halve_rows_into(dst_cr, &input[y_size + c422..y_size + 2 * c422], w / 2, h);
    }

    /// Two-pass packed-RGB to I420: a full-resolution Y pass, then a
    /// chroma pass averaging each 2x2 block.
    fn packed_rgb_to_i420(&self, input: &[u8], output: &mut [u8], bpp: usize, swap_rb: bool) {
        let w = self.width as usize;
        let h = self.height as usize;
        let y_size = w * h;
        let c_size = y_size / 4;

        for row in 0..h {
            for col in 0..w {
                let s = (row * w + col) * bpp;
                let (r, b) = if swap_rb {
                    (input[s + 2], input[s])
                } else {
                    (input[s], input[s + 2])
                };
                let (y, _, _) = rgb_to_ycbcr(r, input[s + 1], b);
                output[row * w + col] = y;
            }
        }

        for row in (0..h).step_by(2) {
            for col in (0..w).step_by(2) {
                let mut cb_sum = 0u32;
                let mut cr_sum = 0u32;
                for dy in 0..2 {
                    for dx in 0..2 {
                        let s = ((row + dy) * w + col + dx) * bpp;
                        let (r, b) = if swap_rb {
                            (input[s + 2], input[s])
                        } else {
                            (input[s], input[s + 2])
                        };
                        let (_, cb, cr) = rgb_to_ycbcr(r, input[s + 1], b);
                        cb_sum += u32::from(cb);
                        cr_sum += u32::from(cr);
                    }
                }
                let ci = (row / 2) * (w / 2) + col / 2;
                output[y_size + ci] = (cb_sum / 4) as u8;
                output[y_size + c_size + ci] = (cr_sum / 4) as u8;
            }
        }
    }
}
