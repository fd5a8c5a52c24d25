// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Planar image to packed buffer conversion.
//!
//! Camera HALs deliver 4:2:0 frames as three independent planes, each with
//! its own row and pixel stride. Encoders want a single contiguous buffer in
//! either planar (I420) or semi-planar (NV21) order. The routines here do
//! that repacking on the CPU and validate the whole read and write span up
//! front, so malformed input is reported as an [`ImageError`] instead of an
//! out-of-range access.

use crate::{
    error::{ImageError, Result},
    image::{ColorFormat, ImageFormat, Plane, PlanarImage},
};
use tracing::{debug, trace};

/// Concatenates the Y plane and the interleaved VU plane into an NV21 buffer.
///
/// Plane 0 must be the luma plane and plane 2 the V plane of a semi-planar
/// frame, whose bytes already alternate V/U. The crop rectangle is not
/// applied; see [`extract_planar_bytes`] for a crop-aware conversion.
///
/// The result is exactly `planes[0].remaining() + planes[2].remaining()`
/// bytes long and starts with the luma plane verbatim.
///
/// # Errors
///
/// Returns [`ImageError::InvalidPlaneLayout`] when there are not exactly three
/// planes or the luma plane is shorter than `width * height`.
pub fn to_nv21(planes: &[Plane], width: u32, height: u32) -> Result<Vec<u8>> {
    if planes.len() != 3 {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "nv21 conversion needs 3 planes, got {}",
            planes.len()
        )));
    }

    let y = planes[0].as_slice();
    let vu = planes[2].as_slice();
    let luma = width as usize * height as usize;
    if y.len() < luma {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "luma plane holds {} bytes, {width}x{height} needs {luma}",
            y.len()
        )));
    }

    let mut nv21 = Vec::with_capacity(y.len() + vu.len());
    nv21.extend_from_slice(y);
    nv21.extend_from_slice(vu);
    Ok(nv21)
}

/// Where one source plane lands in the packed output.
#[derive(Debug)]
struct PlaneCopy {
    /// First byte to read in the plane
    start: usize,
    /// Bytes covered by one row of samples
    row_len: usize,
    row_stride: usize,
    pixel_stride: usize,
    /// Samples per row and rows, after subsampling
    width: usize,
    height: usize,
    channel_offset: usize,
    output_stride: usize,
}

/// Validated crop origin and size.
struct Crop {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

fn validate_crop(image: &PlanarImage) -> Result<Crop> {
    let crop = image.crop();
    if crop.x < 0 || crop.y < 0 || crop.width <= 0 || crop.height <= 0 {
        return Err(ImageError::CropOutOfBounds(format!(
            "crop {},{} {}x{} must have a non-negative origin and a positive size",
            crop.x, crop.y, crop.width, crop.height
        )));
    }
    let right = crop.x as i64 + crop.width as i64;
    let bottom = crop.y as i64 + crop.height as i64;
    if right > image.width() as i64 || bottom > image.height() as i64 {
        return Err(ImageError::CropOutOfBounds(format!(
            "crop {},{} {}x{} exceeds image {}x{}",
            crop.x,
            crop.y,
            crop.width,
            crop.height,
            image.width(),
            image.height()
        )));
    }
    Ok(Crop {
        left: crop.x as usize,
        top: crop.y as usize,
        width: crop.width as usize,
        height: crop.height as usize,
    })
}

/// Output placement of plane `index` for the requested layout.
///
/// Returns `(channel_offset, output_stride)`. In the semi-planar layout V
/// samples take the even positions after the luma block and U samples the odd
/// ones, which yields NV21 ordering.
const fn channel_placement(index: usize, color_format: ColorFormat, luma: usize) -> (usize, usize) {
    match (index, color_format) {
        (0, _) => (0, 1),
        (1, ColorFormat::Planar) => (luma, 1),
        (1, ColorFormat::SemiPlanar) => (luma + 1, 2),
        (_, ColorFormat::Planar) => (luma * 5 / 4, 1),
        (_, ColorFormat::SemiPlanar) => (luma, 2),
    }
}

fn plan_plane(
    index: usize,
    plane: &Plane,
    crop: &Crop,
    color_format: ColorFormat,
    out_len: usize,
) -> Result<Option<PlaneCopy>> {
    let shift = if index == 0 { 0 } else { 1 };
    let width = crop.width >> shift;
    let height = crop.height >> shift;
    // a 1-pixel wide or tall crop has no chroma samples
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let row_stride = plane.row_stride();
    let pixel_stride = plane.pixel_stride();
    let row_len = (width - 1) * pixel_stride + 1;
    if height > 1 && row_stride < row_len {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "plane {index} row stride {row_stride} is shorter than a row of {row_len} bytes"
        )));
    }

    let overflow = || {
        ImageError::InvalidPlaneLayout(format!("plane {index} span overflows address space"))
    };
    let start = row_stride
        .checked_mul(crop.top >> shift)
        .and_then(|v| v.checked_add(pixel_stride.checked_mul(crop.left >> shift)?))
        .ok_or_else(overflow)?;
    // the last row only reads its own samples, it never seeks to the next row
    let end = row_stride
        .checked_mul(height - 1)
        .and_then(|v| v.checked_add(start))
        .and_then(|v| v.checked_add(row_len))
        .ok_or_else(overflow)?;
    if end > plane.remaining() {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "plane {index} holds {} bytes but the crop reads up to byte {end}",
            plane.remaining()
        )));
    }

    let (channel_offset, output_stride) =
        channel_placement(index, color_format, crop.width * crop.height);
    let last_write = channel_offset + (width * height - 1) * output_stride;
    if last_write >= out_len {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "plane {index} writes byte {last_write} past output of {out_len} bytes"
        )));
    }

    Ok(Some(PlaneCopy {
        start,
        row_len,
        row_stride,
        pixel_stride,
        width,
        height,
        channel_offset,
        output_stride,
    }))
}

fn copy_plane(src: &[u8], copy: &PlaneCopy, data: &mut [u8]) {
    let mut channel_offset = copy.channel_offset;
    for row in 0..copy.height {
        let pos = copy.start + row * copy.row_stride;
        if copy.pixel_stride == 1 && copy.output_stride == 1 {
            data[channel_offset..channel_offset + copy.width]
                .copy_from_slice(&src[pos..pos + copy.width]);
            channel_offset += copy.width;
        } else {
            let row_data = &src[pos..pos + copy.row_len];
            let samples = row_data.iter().step_by(copy.pixel_stride);
            let targets = data[channel_offset..]
                .iter_mut()
                .step_by(copy.output_stride);
            for (dst, &sample) in targets.zip(samples).take(copy.width) {
                *dst = sample;
            }
            channel_offset += copy.width * copy.output_stride;
        }
    }
}

/// Repacks the cropped region of a 4:2:0 image into a contiguous buffer.
///
/// The output holds `crop.width * crop.height * 12 / 8` bytes: the luma
/// samples row by row, followed by the chroma samples laid out per
/// `color_format`:
///
/// | plane | [`ColorFormat::Planar`]        | [`ColorFormat::SemiPlanar`] |
/// |-------|--------------------------------|-----------------------------|
/// | Y     | offset 0, stride 1             | offset 0, stride 1          |
/// | U     | offset `w*h`, stride 1         | offset `w*h + 1`, stride 2  |
/// | V     | offset `w*h*5/4`, stride 1     | offset `w*h`, stride 2      |
///
/// Chroma planes are read at half resolution; odd crop origins and sizes are
/// floored.
///
/// # Errors
///
/// - [`ImageError::UnsupportedFormat`] for anything but
///   [`ImageFormat::Yuv420_888`]
/// - [`ImageError::InvalidPlaneLayout`] for a plane count other than three,
///   overlapping rows, or planes too short for the crop
/// - [`ImageError::CropOutOfBounds`] for an empty crop or one that leaves the
///   image
pub fn extract_planar_bytes(image: &PlanarImage, color_format: ColorFormat) -> Result<Vec<u8>> {
    let format = image.format();
    let bits_per_pixel = match (format, format.bits_per_pixel()) {
        (ImageFormat::Yuv420_888, Some(bpp)) => bpp,
        _ => {
            return Err(ImageError::UnsupportedFormat(format!(
                "cannot extract planes from {format}"
            )));
        }
    };
    let planes = image.planes();
    if planes.len() != format.plane_count() {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "{format} needs {} planes, got {}",
            format.plane_count(),
            planes.len()
        )));
    }
    let crop = validate_crop(image)?;
    let out_len = crop.width * crop.height * bits_per_pixel / 8;

    let copies = planes
        .iter()
        .enumerate()
        .map(|(index, plane)| plan_plane(index, plane, &crop, color_format, out_len))
        .collect::<Result<Vec<_>>>()?;

    let mut data = vec![0u8; out_len];
    for (plane, copy) in planes.iter().zip(copies.iter()) {
        if let Some(copy) = copy {
            trace!(?copy, "copy plane");
            copy_plane(plane.as_slice(), copy, &mut data);
        }
    }

    debug!(
        "extracted {}x{} {:?} from {}",
        crop.width, crop.height, color_format, image
    );
    Ok(data)
}

/// Returns the bytes a capture callback hands to the application.
///
/// JPEG images are returned as-is. YUV_420_888 images are converted to NV21
/// covering the crop rectangle. The direct [`to_nv21`] concatenation is used
/// when the frame is uncropped and its planes already form a tight NV21
/// buffer; every other layout goes through [`extract_planar_bytes`].
pub fn image_to_bytes(image: &PlanarImage) -> Result<Vec<u8>> {
    match image.format() {
        ImageFormat::Jpeg => match image.planes().first() {
            Some(plane) => Ok(plane.as_slice().to_vec()),
            None => Err(ImageError::InvalidPlaneLayout(
                "jpeg image has no plane".to_string(),
            )),
        },
        ImageFormat::Yuv420_888 => {
            if image.is_uncropped() && is_tight_nv21(image) {
                to_nv21(image.planes(), image.width(), image.height())
            } else {
                extract_planar_bytes(image, ColorFormat::SemiPlanar)
            }
        }
        other => Err(ImageError::UnsupportedFormat(format!(
            "cannot convert {other} to bytes"
        ))),
    }
}

fn is_tight_nv21(image: &PlanarImage) -> bool {
    let planes = image.planes();
    if planes.len() != 3 {
        return false;
    }
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (y, vu) = (&planes[0], &planes[2]);
    width % 2 == 0
        && height % 2 == 0
        && y.pixel_stride() == 1
        && y.row_stride() == width
        && y.remaining() == width * height
        && vu.pixel_stride() == 2
        && vu.row_stride() == width
        && vu.remaining() == width * height / 2
}

/// De-interleaves an NV21 buffer into I420 order.
///
/// # Errors
///
/// Returns [`ImageError::InvalidPlaneLayout`] if `nv21` is shorter than a
/// `width` x `height` frame.
pub fn nv21_to_i420(nv21: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let luma = width as usize * height as usize;
    let chroma = (width as usize).div_ceil(2) * (height as usize).div_ceil(2);
    let needed = luma + 2 * chroma;
    if nv21.len() < needed {
        return Err(ImageError::InvalidPlaneLayout(format!(
            "nv21 buffer holds {} bytes, {width}x{height} needs {needed}",
            nv21.len()
        )));
    }

    let mut i420 = vec![0u8; needed];
    i420[..luma].copy_from_slice(&nv21[..luma]);
    let (u, v) = i420[luma..].split_at_mut(chroma);
    for (i, vu) in nv21[luma..needed].chunks_exact(2).enumerate() {
        v[i] = vu[0];
        u[i] = vu[1];
    }
    Ok(i420)
}
