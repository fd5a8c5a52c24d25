// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{ImageError, Result};
use crate::image::Rect;
use tracing::debug;

/// Half-size of the metering square, in preview pixels.
pub const FOCUS_AREA: i32 = 50;

/// Weight given to a tap metering region.
pub const METERING_WEIGHT: i32 = 1000;

/// Side of the focus ring in density-independent pixels.
pub const FOCUS_RING_DIP: f32 = 50.0;

/// Metering region on the sensor active array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeteringRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub weight: i32,
}

impl MeteringRegion {
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.right - self.left,
            self.bottom - self.top,
        )
    }
}

fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Maps a tap on the preview to a metering region on the sensor.
///
/// `active_right` and `active_bottom` are the right and bottom edges of the
/// sensor active array. The region is a square of `2 * FOCUS_AREA` preview
/// pixels around the tap, scaled to sensor coordinates and clamped to the
/// array. The right and bottom edges never fall before the mapped tap.
///
/// # Errors
///
/// Returns [`ImageError::InvalidDimensions`] if the preview size is zero.
pub fn focus_region(
    x: i32,
    y: i32,
    preview_width: u32,
    preview_height: u32,
    active_right: i32,
    active_bottom: i32,
) -> Result<MeteringRegion> {
    if preview_width == 0 || preview_height == 0 {
        return Err(ImageError::InvalidDimensions(format!(
            "preview {preview_width}x{preview_height}"
        )));
    }
    let (pw, ph) = (preview_width as i64, preview_height as i64);
    let left = (x as i64 * active_right as i64 / pw) as i32;
    let top = (y as i64 * active_bottom as i64 / ph) as i32;
    let area = (FOCUS_AREA as i64 * active_right as i64 / pw) as i32;

    let region = MeteringRegion {
        left: clamp(left - area, 0, active_right),
        top: clamp(top - area, 0, active_bottom),
        right: clamp(left + area, left, active_right),
        bottom: clamp(top + area, top, active_bottom),
        weight: METERING_WEIGHT,
    };
    debug!("tap {x},{y} -> metering {region:?}");
    Ok(region)
}

/// Converts density-independent pixels to physical pixels, rounding half up.
pub fn dip_to_px(dip: f32, density: f32) -> i32 {
    (dip * density + 0.5) as i32
}

/// Line segment in view coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Focus ring drawn where the user tapped: four corner brackets whose arms
/// are one third of the ring side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FocusRing {
    pub left: i32,
    pub top: i32,
    pub size: i32,
}

impl FocusRing {
    pub fn new(left: i32, top: i32, density: f32) -> Self {
        Self {
            left,
            top,
            size: dip_to_px(FOCUS_RING_DIP, density),
        }
    }

    /// The eight corner segments: two per corner, clockwise from top-left.
    pub fn segments(&self) -> [Segment; 8] {
        let l = self.left as f32;
        let t = self.top as f32;
        let r = (self.left + self.size) as f32;
        let b = (self.top + self.size) as f32;
        let third = (self.size / 3) as f32;
        let two_thirds = (self.size * 2 / 3) as f32;
        let seg = |x0, y0, x1, y1| Segment { x0, y0, x1, y1 };

        [
            seg(l, t, l + third, t),
            seg(l, t, l, t + third),
            seg(l + two_thirds, t, r, t),
            seg(r, t, r, t + third),
            seg(r, t + two_thirds, r, b),
            seg(l + two_thirds, b, r, b),
            seg(l, b, l + third, b),
            seg(l, t + two_thirds, l, b),
        ]
    }
}
