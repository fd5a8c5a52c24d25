// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use std::io;

/// Errors raised by image conversion, encoding and capture writing.
///
/// Every validation error is reported before the output buffer is touched,
/// so a failed conversion never leaves a partially written frame behind.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The image format or color format code is not recognized.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Plane count, strides or buffer lengths disagree with the format.
    #[error("invalid plane layout: {0}")]
    InvalidPlaneLayout(String),

    /// The crop rectangle reaches outside of the image.
    #[error("crop out of bounds: {0}")]
    CropOutOfBounds(String),

    /// Dimensions the encoder or geometry helpers cannot work with.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// An encoder or geometry parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("jpeg: {0}")]
    Jpeg(#[from] turbojpeg::Error),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// The capture writer has been shut down.
    #[error("capture writer is closed")]
    WriterClosed,
}

pub type Result<T, E = ImageError> = std::result::Result<T, E>;
