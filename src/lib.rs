// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # CameraKit Core Library
//!
//! This library provides the platform-neutral core of the CameraKit camera
//! component. It converts multi-plane sensor frames into packed buffers ready
//! for encoding, compresses them to JPEG, writes captures to disk on a
//! caller-owned worker pool, and defines the callback interfaces the preview
//! uses for gestures and tap-to-focus.
//!
//! ## Features
//!
//! - **Plane Conversion**: Repack YUV_420_888 planes with arbitrary row and
//!   pixel strides into NV21 or I420, honoring a crop rectangle.
//! - **JPEG Encoding**: Compress packed 4:2:0 frames using turbojpeg.
//! - **Capture Writer**: Queue file writes on worker threads and collect the
//!   result through a ticket.
//! - **Gestures and Focus**: Dispatch recognized gestures to a listener and
//!   compute metering regions and focus-ring geometry.
//! - **Orientation**: Derive preview and capture rotations from the camera
//!   facing, sensor and display orientation.
//!
//! ## Example
//!
//! ```no_run
//! use camerakit::{
//!     convert::extract_planar_bytes,
//!     image::{ColorFormat, PlanarImage, Rect},
//!     jpeg::{encode_i420, CAPTURE_QUALITY},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frame = std::fs::read("frame.nv21")?;
//! let img = PlanarImage::from_nv21(frame, 1280, 720)?.with_crop(Rect::new(0, 0, 640, 480));
//!
//! let i420 = extract_planar_bytes(&img, ColorFormat::Planar)?;
//! let jpeg = encode_i420(&i420, 640, 480, CAPTURE_QUALITY)?;
//! std::fs::write("frame.jpg", &*jpeg)?;
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod focus;
pub mod gesture;
pub mod image;
pub mod jpeg;
pub mod orientation;
pub mod writer;

pub use error::{ImageError, Result};
