// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    convert::nv21_to_i420,
    error::{ImageError, Result},
};
use tracing::debug;
use turbojpeg::{OwnedBuf, Subsamp, YuvImage};

/// Quality used for still captures.
pub const CAPTURE_QUALITY: i32 = 100;

/// Quality used for preview frames saved from the frame callback.
pub const PREVIEW_QUALITY: i32 = 70;

fn check_frame(width: u32, height: u32, quality: i32) -> Result<()> {
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(ImageError::InvalidDimensions(format!(
            "4:2:0 jpeg encoding needs even non-zero dimensions, got {width}x{height}"
        )));
    }
    if !(1..=100).contains(&quality) {
        return Err(ImageError::InvalidParameter(format!(
            "jpeg quality {quality} outside 1..=100"
        )));
    }
    Ok(())
}

/// Encodes a packed I420 frame to JPEG using turbojpeg.
///
/// # Arguments
///
/// * `pix` - Y plane followed by the U and V planes, no row padding
/// * `width` - Frame width in pixels, must be even
/// * `height` - Frame height in pixels, must be even
/// * `quality` - JPEG quality in `1..=100`
///
/// # Errors
///
/// Returns an error if:
/// - Dimensions are odd or zero
/// - Quality is out of range
/// - `pix` is shorter than `width * height * 3 / 2`
/// - JPEG compression fails
///
/// # Example
///
/// ```no_run
/// use camerakit::jpeg::{encode_i420, CAPTURE_QUALITY};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let frame = vec![128u8; 640 * 480 * 3 / 2];
/// let jpeg = encode_i420(&frame, 640, 480, CAPTURE_QUALITY)?;
/// println!("Compressed to {} bytes", jpeg.len());
/// # Ok(())
/// # }
/// ```
pub fn encode_i420(pix: &[u8], width: u32, height: u32, quality: i32) -> Result<OwnedBuf> {
    check_frame(width, height, quality)?;
    let needed = width as usize * height as usize * 3 / 2;
    if pix.len() < needed {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "i420 buffer holds {} bytes, {width}x{height} needs {needed}",
            pix.len()
        )));
    }

    let image = YuvImage {
        pixels: &pix[..needed],
        width: width as usize,
        align: 1,
        height: height as usize,
        subsamp: Subsamp::Sub2x2,
    };
    let jpeg = turbojpeg::compress_yuv(image, quality)?;
    debug!("encoded {width}x{height} i420 to {} bytes", jpeg.len());
    Ok(jpeg)
}

/// Encodes an NV21 frame to JPEG.
///
/// The chroma samples are de-interleaved into I420 first, then compressed
/// with [`encode_i420`].
pub fn encode_nv21(pix: &[u8], width: u32, height: u32, quality: i32) -> Result<OwnedBuf> {
    check_frame(width, height, quality)?;
    let i420 = nv21_to_i420(pix, width, height)?;
    encode_i420(&i420, width, height, quality)
}
