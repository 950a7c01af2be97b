//! Image scaling (nearest neighbor and box sampling).
//!
//! Both algorithms operate on packed multi-channel planes described by
//! [`PixelBuffer`] views, so the same code path serves Gray8, RGB,
//! RGBA and the interleaved chroma plane of NV12. [`VideoScale`] wraps
//! them with per-plane dispatch for whole frames.

use crate::error::{Error, Result};
use crate::format::{PixelFormat, VideoFormat};
use crate::frame::{plane_layout, PixelBuffer, PixelBufferMut};

/// Scaling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleAlgorithm {
    /// Nearest neighbor: fastest, aliased output by design.
    #[default]
    NearestNeighbor,
    /// Box sampling: area average, keeps detail on downscaling.
    BoxSampling,
}

/// Nearest-neighbor resample of a packed plane.
///
/// Source coordinates truncate (`sy = dy * sh / dh`, `sx = dx * sw / dw`)
/// and every channel of the chosen source pixel is copied verbatim.
/// Destination row padding beyond `width * channels` is left untouched.
pub fn nearest_neighbor(dst: &mut PixelBufferMut<'_>, src: &PixelBuffer<'_>) -> Result<()> {
    let ch = src.channels();
    if dst.channels() != ch {
        return Err(Error::Config(format!(
            "channel mismatch: {} != {}",
            dst.channels(),
            ch
        )));
    }

    let (dw, dh) = (dst.width(), dst.height());
    let (sw, sh) = (src.width(), src.height());

    for dy in 0..dh {
        let srow = src.row(dy * sh / dh);
        let drow = dst.row_mut(dy);
        for dx in 0..dw {
            let sx = ch * (dx * sw / dw);
            let d = ch * dx;
            drow[d..d + ch].copy_from_slice(&srow[sx..sx + ch]);
        }
    }
    Ok(())
}

/// Box-sampling (area average) downscale of a packed plane.
///
/// Every source pixel lands in exactly one destination bucket (floor
/// mapping per axis). `acc` packs a sample count in the high 16 bits and
/// the running sum in the low 16 bits of each entry, one entry per
/// destination channel; it must hold `dst.width * dst.height * channels`
/// entries and is zeroed here before accumulation. Buckets no source
/// pixel reaches are written as 0.
///
/// The packed accumulator caps a bucket at 257 samples, so reductions
/// beyond roughly 16x per axis will overflow the sum field. Only
/// meaningful when neither destination dimension exceeds the source.
pub fn box_sampling(
    dst: &mut PixelBufferMut<'_>,
    src: &PixelBuffer<'_>,
    acc: &mut [u32],
) -> Result<()> {
    let ch = src.channels();
    if dst.channels() != ch {
        return Err(Error::Config(format!(
            "channel mismatch: {} != {}",
            dst.channels(),
            ch
        )));
    }

    let (dw, dh) = (dst.width(), dst.height());
    let (sw, sh) = (src.width(), src.height());

    let needed = dw * dh * ch;
    if acc.len() < needed {
        return Err(Error::Config(format!(
            "accumulator too small: {} < {}",
            acc.len(),
            needed
        )));
    }
    let acc = &mut acc[..needed];
    acc.fill(0);

    let mut ty = 0;
    for sy in 0..sh {
        while (ty + 1) * sh <= sy * dh {
            ty += 1;
        }
        let srow = src.row(sy);
        let arow = &mut acc[ty * dw * ch..(ty + 1) * dw * ch];

        let mut tx = 0;
        for sx in 0..sw {
            while (tx + 1) * sw <= sx * dw {
                tx += 1;
            }
            let a = tx * ch;
            let s = sx * ch;
            for c in 0..ch {
                // 0x10000 bumps the count field alongside the sample.
                arow[a + c] += 0x10000 + u32::from(srow[s + c]);
            }
        }
    }

    for dy in 0..dh {
        let drow = dst.row_mut(dy);
        let arow = &acc[dy * dw * ch..(dy + 1) * dw * ch];
        for (d, &a) in drow[..dw * ch].iter_mut().zip(arow) {
            *d = if a == 0 {
                0
            } else {
                ((a & 0xffff) / (a >> 16)) as u8
            };
        }
    }
    Ok(())
}

/// Video scaler between fixed resolutions.
///
/// Scales packed frames (Gray8, RGB24/BGR24, RGBA/BGRA) and planar
/// I420/I422/I444/NV12/NV21 frames plane by plane. Packed 4:2:2 input is
/// rejected; convert it to a planar layout first.
///
/// Owns its box-sampling accumulator, so a `VideoScale` value must not
/// be shared across concurrent invocations.
pub struct VideoScale {
    input: VideoFormat,
    output: VideoFormat,
    algorithm: ScaleAlgorithm,
    acc: Vec<u32>,
}

impl VideoScale {
    /// Create a new scaler.
    pub fn new(
        input_width: u32,
        input_height: u32,
        output_width: u32,
        output_height: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        if input_width == 0 || input_height == 0 || output_width == 0 || output_height == 0 {
            return Err(Error::Config("dimensions must be non-zero".into()));
        }
        if matches!(format, PixelFormat::Yuyv | PixelFormat::Uyvy) {
            return Err(Error::Unsupported(
                "scaling packed 4:2:2; convert to a planar format first".into(),
            ));
        }
        if !format.dimensions_valid(input_width, input_height)
            || !format.dimensions_valid(output_width, output_height)
        {
            return Err(Error::Config(format!(
                "{format:?} requires even dimensions for subsampled chroma"
            )));
        }
        tracing::debug!(
            ?format,
            input_width,
            input_height,
            output_width,
            output_height,
            "configured scaler"
        );
        Ok(Self {
            input: VideoFormat::new(input_width, input_height, format),
            output: VideoFormat::new(output_width, output_height, format),
            algorithm: ScaleAlgorithm::default(),
            acc: Vec::new(),
        })
    }

    /// Set the scaling algorithm.
    pub fn with_algorithm(mut self, algorithm: ScaleAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Required output buffer size in bytes.
    pub fn output_size(&self) -> usize {
        self.output.frame_size()
    }

    /// Scale one frame.
    pub fn scale(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let expected_input = self.input.frame_size();
        let expected_output = self.output.frame_size();

        if input.len() < expected_input {
            return Err(Error::Config(format!(
                "input buffer too small: {} < {}",
                input.len(),
                expected_input
            )));
        }
        if output.len() < expected_output {
            return Err(Error::Config(format!(
                "output buffer too small: {} < {}",
                output.len(),
                expected_output
            )));
        }

        // Box upsampling degenerates to nearest neighbor.
        let algorithm = if self.algorithm == ScaleAlgorithm::BoxSampling
            && self.output.width > self.input.width
            && self.output.height > self.input.height
        {
            ScaleAlgorithm::NearestNeighbor
        } else {
            self.algorithm
        };

        let in_planes = plane_layout(self.input);
        let out_planes = plane_layout(self.output);

        for (ip, op) in in_planes.iter().zip(out_planes.iter()) {
            let src = ip.view(&input[..expected_input])?;
            let mut dst = op.view_mut(&mut output[..expected_output])?;
            match algorithm {
                ScaleAlgorithm::NearestNeighbor => nearest_neighbor(&mut dst, &src)?,
                ScaleAlgorithm::BoxSampling => {
                    let needed = op.width * op.height * op.channels;
                    if self.acc.len() < needed {
                        self.acc.resize(needed, 0);
                    }
                    box_sampling(&mut dst, &src, &mut self.acc)?;
                }
            }
        }
        Ok(())
    }
}
