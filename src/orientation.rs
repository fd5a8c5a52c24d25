// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{ImageError, Result};
use core::fmt;
use tracing::debug;

/// Photo size requested from the sensor, in landscape orientation.
pub const PHOTO_SIZE: (u32, u32) = (3264, 1840);

/// Which side of the device the camera faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CameraFacing {
    Back,
    Front,
}

/// Clockwise rotation in quarter turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation (0 degrees)
    Rotation0 = 0,
    /// Rotate 90 degrees clockwise
    Rotation90 = 90,
    /// Rotate 180 degrees
    Rotation180 = 180,
    /// Rotate 270 degrees clockwise (90 degrees counter-clockwise)
    Rotation270 = 270,
}

impl Rotation {
    /// Rotation for `degrees`, normalized into `0..360`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidParameter`] if `degrees` is not a
    /// multiple of 90.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Rotation0),
            90 => Ok(Rotation::Rotation90),
            180 => Ok(Rotation::Rotation180),
            270 => Ok(Rotation::Rotation270),
            _ => Err(ImageError::InvalidParameter(format!(
                "rotation of {degrees} degrees is not a quarter turn"
            ))),
        }
    }

    pub const fn degrees(self) -> i32 {
        self as i32
    }

    /// Whether the rotation swaps width and height.
    pub const fn is_transposed(self) -> bool {
        self.degrees() % 180 != 0
    }

    /// Size of a `width` x `height` landscape frame after this rotation.
    pub const fn orient(self, width: u32, height: u32) -> (u32, u32) {
        if self.is_transposed() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Display orientation for a surface rotation index (0 to 3).
///
/// The natural orientation of the supported devices is landscape, so index 0
/// reports a quarter turn.
///
/// # Errors
///
/// Returns [`ImageError::InvalidParameter`] for an index above 3.
pub fn display_orientation(surface_rotation: u32) -> Result<Rotation> {
    match surface_rotation {
        0 => Ok(Rotation::Rotation90),
        1..=3 => Rotation::from_degrees(surface_rotation as i32 * 90),
        _ => Err(ImageError::InvalidParameter(format!(
            "surface rotation index {surface_rotation}"
        ))),
    }
}

/// Rotation applied to preview frames so they appear upright.
///
/// The front camera preview is mirrored, which turns the sensor and display
/// rotations into a counter-clockwise correction.
pub fn preview_orientation(facing: CameraFacing, sensor: Rotation, display: Rotation) -> Rotation {
    let (s, d) = (sensor.degrees(), display.degrees());
    let degrees = match facing {
        CameraFacing::Back => (s - d + 360) % 360,
        CameraFacing::Front => (360 - (s + d) % 360) % 360,
    };
    let rotation = quarter_turn(degrees);
    let display_rotation = display;
    debug!("{facing:?} preview: sensor {sensor} display {display_rotation} -> {rotation}");
    rotation
}

/// Rotation applied to captured JPEGs so they are stored upright.
pub fn capture_orientation(facing: CameraFacing, sensor: Rotation, display: Rotation) -> Rotation {
    let (s, d) = (sensor.degrees(), display.degrees());
    quarter_turn(match facing {
        CameraFacing::Back => (s - d + 360) % 360,
        CameraFacing::Front => (s + d) % 360,
    })
}

/// Preview target and photo sizes for a preview rotation.
///
/// The view size is given as it appears on screen; the returned sizes are in
/// sensor orientation and are swapped for quarter-turn rotations.
pub fn oriented_sizes(
    preview: Rotation,
    view_width: u32,
    view_height: u32,
) -> ((u32, u32), (u32, u32)) {
    let target = preview.orient(view_width, view_height);
    let photo = preview.orient(PHOTO_SIZE.0, PHOTO_SIZE.1);
    (target, photo)
}

// Sums and differences of quarter turns stay quarter turns.
fn quarter_turn(degrees: i32) -> Rotation {
    match degrees {
        90 => Rotation::Rotation90,
        180 => Rotation::Rotation180,
        270 => Rotation::Rotation270,
        _ => Rotation::Rotation0,
    }
}
