// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Gesture callbacks for the camera preview.
//!
//! The platform input layer recognizes gestures and reports them as
//! [`GestureEvent`]s. [`GestureDispatcher`] turns those into calls on a
//! [`GestureListener`], applying the coordinate conventions the preview
//! expects: taps arrive in view pixels while double taps and long presses
//! arrive normalized to the view size.

use tracing::trace;

/// Minimum horizontal travel, in pixels, for a fling to count as a scroll.
pub const FLING_THRESHOLD: f32 = 20.0;

/// Horizontal scroll direction derived from a fling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Finger moved toward larger x
    Left,
    /// Finger moved toward smaller x
    Right,
}

/// Receiver of preview gestures.
pub trait GestureListener {
    fn on_tap(&mut self, x: f32, y: f32);

    fn on_long_tap(&mut self, x: f32, y: f32);

    fn on_double_tap(&mut self, x: f32, y: f32);

    /// `ds` is the length of the span change vector `(dsx, dsy)`.
    fn on_pinch(&mut self, ds: f32, dsx: f32, dsy: f32);

    fn on_scroll(&mut self, direction: ScrollDirection);
}

/// Gesture already recognized by the platform input layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// Confirmed single tap at view coordinates
    SingleTap { x: f32, y: f32 },
    /// Double tap at view coordinates
    DoubleTap { x: f32, y: f32 },
    /// Long press at view coordinates
    LongPress { x: f32, y: f32 },
    /// Scale step with the current and previous finger spans
    Scale {
        current_span_x: f32,
        current_span_y: f32,
        previous_span_x: f32,
        previous_span_y: f32,
    },
    /// Fling between two horizontal positions
    Fling {
        start_x: f32,
        end_x: f32,
        velocity_x: f32,
    },
}

/// Classifies a horizontal fling, `None` when it is too short or has no
/// horizontal velocity.
pub fn fling_direction(start_x: f32, end_x: f32, velocity_x: f32) -> Option<ScrollDirection> {
    if velocity_x.abs() <= 0.0 {
        return None;
    }
    if start_x - end_x > FLING_THRESHOLD {
        Some(ScrollDirection::Right)
    } else if end_x - start_x > FLING_THRESHOLD {
        Some(ScrollDirection::Left)
    } else {
        None
    }
}

/// Maps gestures on a view of known size to listener callbacks.
#[derive(Copy, Clone, Debug)]
pub struct GestureDispatcher {
    width: f32,
    height: f32,
}

impl GestureDispatcher {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    /// Updates the view size after a layout change.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    fn normalize(&self, x: f32, y: f32) -> (f32, f32) {
        let nx = if self.width > 0.0 { x / self.width } else { 0.0 };
        let ny = if self.height > 0.0 { y / self.height } else { 0.0 };
        (nx, ny)
    }

    /// Forwards `event` to `listener`, returning whether a callback fired.
    pub fn dispatch(&self, event: GestureEvent, listener: &mut dyn GestureListener) -> bool {
        trace!(?event, "dispatch gesture");
        match event {
            GestureEvent::SingleTap { x, y } => {
                perform_tap(listener, x, y);
                true
            }
            GestureEvent::DoubleTap { x, y } => {
                let (x, y) = self.normalize(x, y);
                perform_double_tap(listener, x, y);
                true
            }
            GestureEvent::LongPress { x, y } => {
                let (x, y) = self.normalize(x, y);
                perform_long_tap(listener, x, y);
                true
            }
            GestureEvent::Scale {
                current_span_x,
                current_span_y,
                previous_span_x,
                previous_span_y,
            } => {
                perform_pinch(
                    listener,
                    current_span_x - previous_span_x,
                    current_span_y - previous_span_y,
                );
                true
            }
            GestureEvent::Fling {
                start_x,
                end_x,
                velocity_x,
            } => match fling_direction(start_x, end_x, velocity_x) {
                Some(direction) => {
                    listener.on_scroll(direction);
                    true
                }
                None => false,
            },
        }
    }
}

pub fn perform_tap(listener: &mut dyn GestureListener, x: f32, y: f32) {
    listener.on_tap(x, y);
}

pub fn perform_long_tap(listener: &mut dyn GestureListener, x: f32, y: f32) {
    listener.on_long_tap(x, y);
}

pub fn perform_double_tap(listener: &mut dyn GestureListener, x: f32, y: f32) {
    listener.on_double_tap(x, y);
}

/// Reports a pinch from the span deltas, computing the combined distance.
pub fn perform_pinch(listener: &mut dyn GestureListener, dsx: f32, dsy: f32) {
    let ds = dsx.hypot(dsy);
    listener.on_pinch(ds, dsx, dsy);
}
