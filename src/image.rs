// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{ImageError, Result};
use core::fmt;
use std::sync::Arc;

/// Sensor image formats understood by the converter.
///
/// The numeric codes match the ones reported by camera HALs so that frames
/// coming from a platform layer can be tagged without a lookup table.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Flexible 4:2:0 YUV with three planes (Y, U, V) and per-plane strides
    Yuv420_888,
    /// 4:2:0 YUV semi-planar, Y followed by interleaved V/U
    Nv21,
    /// 4:2:0 YUV planar, Y followed by V then U
    Yv12,
    /// Compressed JPEG carried in a single plane
    Jpeg,
}

impl ImageFormat {
    pub const fn code(self) -> i32 {
        match self {
            ImageFormat::Yuv420_888 => 0x23,
            ImageFormat::Nv21 => 0x11,
            ImageFormat::Yv12 => 0x3231_5659,
            ImageFormat::Jpeg => 0x100,
        }
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0x23 => Ok(ImageFormat::Yuv420_888),
            0x11 => Ok(ImageFormat::Nv21),
            0x3231_5659 => Ok(ImageFormat::Yv12),
            0x100 => Ok(ImageFormat::Jpeg),
            _ => Err(ImageError::UnsupportedFormat(format!(
                "image format code {code:#x}"
            ))),
        }
    }

    /// Bits per pixel of the uncompressed layout, `None` for compressed
    /// formats.
    pub const fn bits_per_pixel(self) -> Option<usize> {
        match self {
            ImageFormat::Yuv420_888 | ImageFormat::Nv21 | ImageFormat::Yv12 => Some(12),
            ImageFormat::Jpeg => None,
        }
    }

    pub const fn plane_count(self) -> usize {
        match self {
            ImageFormat::Yuv420_888 | ImageFormat::Yv12 => 3,
            ImageFormat::Nv21 => 2,
            ImageFormat::Jpeg => 1,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ImageFormat::Yuv420_888 => "YUV_420_888",
            ImageFormat::Nv21 => "NV21",
            ImageFormat::Yv12 => "YV12",
            ImageFormat::Jpeg => "JPEG",
        };
        f.write_str(name)
    }
}

/// Packed output layout selected by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorFormat {
    /// Fully planar I420: Y plane, then U plane, then V plane
    Planar = 1,
    /// Semi-planar NV21: Y plane, then interleaved V/U samples
    SemiPlanar = 2,
}

impl ColorFormat {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(ColorFormat::Planar),
            2 => Ok(ColorFormat::SemiPlanar),
            _ => Err(ImageError::UnsupportedFormat(format!(
                "color format {code}"
            ))),
        }
    }
}

/// Rectangle specification for crop operations.
///
/// Defines a rectangular region within an image. Coordinates are signed so
/// that platform rectangles can be carried over as-is; negative values are
/// rejected during conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: i32,
    /// Y coordinate of top-left corner
    pub y: i32,
    /// Width of the rectangle in pixels
    pub width: i32,
    /// Height of the rectangle in pixels
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Rect::new(0, 0, width as i32, height as i32)
    }
}

/// Read-only view of one image plane.
///
/// A plane borrows a window (`offset`, `len`) of a shared frame buffer and
/// describes how samples are laid out within it. Several planes usually share
/// one buffer, e.g. the U and V planes of an NV21 frame overlap by all but
/// one byte.
#[derive(Clone, Debug)]
pub struct Plane {
    buffer: Arc<[u8]>,
    offset: usize,
    len: usize,
    row_stride: usize,
    pixel_stride: usize,
}

impl Plane {
    /// Creates a plane view over `buffer[offset..offset + len]`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidPlaneLayout`] if the window does not fit
    /// in the buffer or either stride is zero.
    pub fn new(
        buffer: Arc<[u8]>,
        offset: usize,
        len: usize,
        row_stride: usize,
        pixel_stride: usize,
    ) -> Result<Self> {
        if row_stride == 0 || pixel_stride == 0 {
            return Err(ImageError::InvalidPlaneLayout(format!(
                "row stride {row_stride} and pixel stride {pixel_stride} must be non-zero"
            )));
        }
        match offset.checked_add(len) {
            Some(end) if end <= buffer.len() => {}
            _ => {
                return Err(ImageError::InvalidPlaneLayout(format!(
                    "plane window {offset}+{len} exceeds buffer of {} bytes",
                    buffer.len()
                )));
            }
        }
        Ok(Plane {
            buffer,
            offset,
            len,
            row_stride,
            pixel_stride,
        })
    }

    /// Plane owning the whole of `data`.
    pub fn from_vec(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Result<Self> {
        let len = data.len();
        Plane::new(Arc::from(data), 0, len, row_stride, pixel_stride)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[self.offset..self.offset + self.len]
    }

    /// Number of readable bytes in the plane.
    pub fn remaining(&self) -> usize {
        self.len
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }
}

/// Multi-plane sensor image.
///
/// Carries the format, the full frame dimensions, the crop rectangle that
/// bounds every read, and the planes in fixed order (Y, U, V for 4:2:0
/// formats).
///
/// # Example
///
/// ```
/// use camerakit::image::{ImageFormat, PlanarImage, Rect};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let frame = vec![0u8; 640 * 480 * 3 / 2];
/// let img = PlanarImage::from_nv21(frame, 640, 480)?.with_crop(Rect::new(0, 0, 320, 240));
///
/// assert_eq!(img.format(), ImageFormat::Yuv420_888);
/// assert_eq!(img.planes().len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PlanarImage {
    format: ImageFormat,
    width: u32,
    height: u32,
    crop: Rect,
    planes: Vec<Plane>,
}

/// Chroma dimension of a 4:2:0 frame, rounded up for odd sizes.
const fn chroma_dim(dim: u32) -> usize {
    (dim as usize).div_ceil(2)
}

/// Byte size of a tightly packed frame, `None` for compressed formats.
pub const fn image_size(width: u32, height: u32, format: ImageFormat) -> Option<usize> {
    match format.bits_per_pixel() {
        Some(bpp) => Some(width as usize * height as usize * bpp / 8),
        None => None,
    }
}

impl PlanarImage {
    /// Wraps existing planes. The crop rectangle defaults to the full frame.
    pub fn new(format: ImageFormat, width: u32, height: u32, planes: Vec<Plane>) -> Self {
        Self {
            format,
            width,
            height,
            crop: Rect::full(width, height),
            planes,
        }
    }

    /// Wraps a compressed JPEG buffer as a single-plane image.
    pub fn from_jpeg(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let len = data.len().max(1);
        let plane = Plane::from_vec(data, len, 1)?;
        Ok(Self::new(ImageFormat::Jpeg, width, height, vec![plane]))
    }

    /// Builds a three-plane view over a packed I420 frame.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidPlaneLayout`] if `frame` is shorter than
    /// the Y plane plus both chroma planes.
    pub fn from_i420(frame: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let y_len = width as usize * height as usize;
        let (cw, ch) = (chroma_dim(width), chroma_dim(height));
        let c_len = cw * ch;
        if frame.len() < y_len + 2 * c_len {
            return Err(ImageError::InvalidPlaneLayout(format!(
                "i420 frame of {} bytes is too short for {width}x{height}",
                frame.len()
            )));
        }

        let buffer: Arc<[u8]> = Arc::from(frame);
        let stride = (width as usize).max(1);
        let planes = vec![
            Plane::new(buffer.clone(), 0, y_len, stride, 1)?,
            Plane::new(buffer.clone(), y_len, c_len, cw.max(1), 1)?,
            Plane::new(buffer, y_len + c_len, c_len, cw.max(1), 1)?,
        ];
        Ok(Self::new(ImageFormat::Yuv420_888, width, height, planes))
    }

    /// Builds the three-plane view a camera HAL reports for an NV21 frame.
    ///
    /// The V plane starts at the end of the luma samples and the U plane one
    /// byte later, both with a pixel stride of 2. Each chroma plane therefore
    /// exposes one byte less than the interleaved chroma block.
    pub fn from_nv21(frame: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let y_len = width as usize * height as usize;
        let (cw, ch) = (chroma_dim(width), chroma_dim(height));
        let vu_len = 2 * cw * ch;
        if frame.len() < y_len + vu_len {
            return Err(ImageError::InvalidPlaneLayout(format!(
                "nv21 frame of {} bytes is too short for {width}x{height}",
                frame.len()
            )));
        }
        let chroma_len = vu_len.saturating_sub(1);

        let buffer: Arc<[u8]> = Arc::from(frame);
        let stride = (width as usize).max(1);
        let planes = vec![
            Plane::new(buffer.clone(), 0, y_len, stride, 1)?,
            Plane::new(buffer.clone(), y_len + 1, chroma_len, (2 * cw).max(1), 2)?,
            Plane::new(buffer, y_len, chroma_len, (2 * cw).max(1), 2)?,
        ];
        Ok(Self::new(ImageFormat::Yuv420_888, width, height, planes))
    }

    pub fn with_crop(mut self, crop: Rect) -> Self {
        self.crop = crop;
        self
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn crop(&self) -> Rect {
        self.crop
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Whether the crop rectangle covers the whole frame.
    pub fn is_uncropped(&self) -> bool {
        self.crop == Rect::full(self.width, self.height)
    }
}

impl fmt::Display for PlanarImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} crop:{},{} {}x{} planes:{}",
            self.width,
            self.height,
            self.format,
            self.crop.x,
            self.crop.y,
            self.crop.width,
            self.crop.height,
            self.planes.len()
        )
    }
}
