// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use camerakit::{
    focus::{dip_to_px, focus_region, FocusRing, MeteringRegion, METERING_WEIGHT},
    gesture::{
        fling_direction, perform_pinch, GestureDispatcher, GestureEvent, GestureListener,
        ScrollDirection,
    },
    image::Rect,
    orientation::{
        capture_orientation, display_orientation, oriented_sizes, preview_orientation,
        CameraFacing, Rotation, PHOTO_SIZE,
    },
    ImageError,
};
use std::error::Error;

#[derive(Debug, PartialEq)]
enum Call {
    Tap(f32, f32),
    LongTap(f32, f32),
    DoubleTap(f32, f32),
    Pinch(f32, f32, f32),
    Scroll(ScrollDirection),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl GestureListener for Recorder {
    fn on_tap(&mut self, x: f32, y: f32) {
        self.calls.push(Call::Tap(x, y));
    }

    fn on_long_tap(&mut self, x: f32, y: f32) {
        self.calls.push(Call::LongTap(x, y));
    }

    fn on_double_tap(&mut self, x: f32, y: f32) {
        self.calls.push(Call::DoubleTap(x, y));
    }

    fn on_pinch(&mut self, ds: f32, dsx: f32, dsy: f32) {
        self.calls.push(Call::Pinch(ds, dsx, dsy));
    }

    fn on_scroll(&mut self, direction: ScrollDirection) {
        self.calls.push(Call::Scroll(direction));
    }
}

#[test]
fn test_dispatch() {
    let dispatcher = GestureDispatcher::new(100, 200);
    let mut recorder = Recorder::default();

    let events = [
        GestureEvent::SingleTap { x: 30.0, y: 40.0 },
        GestureEvent::DoubleTap { x: 50.0, y: 100.0 },
        GestureEvent::LongPress { x: 25.0, y: 50.0 },
        GestureEvent::Scale {
            current_span_x: 130.0,
            current_span_y: 240.0,
            previous_span_x: 100.0,
            previous_span_y: 200.0,
        },
        GestureEvent::Fling {
            start_x: 100.0,
            end_x: 50.0,
            velocity_x: -300.0,
        },
        GestureEvent::Fling {
            start_x: 50.0,
            end_x: 100.0,
            velocity_x: 300.0,
        },
    ];
    for event in events {
        assert!(dispatcher.dispatch(event, &mut recorder));
    }

    assert_eq!(
        recorder.calls,
        vec![
            Call::Tap(30.0, 40.0),
            Call::DoubleTap(0.5, 0.5),
            Call::LongTap(0.25, 0.25),
            Call::Pinch(50.0, 30.0, 40.0),
            Call::Scroll(ScrollDirection::Right),
            Call::Scroll(ScrollDirection::Left),
        ]
    );
}

#[test]
fn test_short_fling_is_ignored() {
    let dispatcher = GestureDispatcher::new(100, 100);
    let mut recorder = Recorder::default();

    let short = GestureEvent::Fling {
        start_x: 50.0,
        end_x: 60.0,
        velocity_x: 500.0,
    };
    let still = GestureEvent::Fling {
        start_x: 0.0,
        end_x: 80.0,
        velocity_x: 0.0,
    };
    assert!(!dispatcher.dispatch(short, &mut recorder));
    assert!(!dispatcher.dispatch(still, &mut recorder));
    assert!(recorder.calls.is_empty());

    assert_eq!(fling_direction(0.0, 20.0, 1.0), None);
    assert_eq!(fling_direction(0.0, 21.0, 1.0), Some(ScrollDirection::Left));
    assert_eq!(fling_direction(21.0, 0.0, -1.0), Some(ScrollDirection::Right));
}

#[test]
fn test_resize_and_empty_view() {
    let mut dispatcher = GestureDispatcher::new(0, 0);
    let mut recorder = Recorder::default();

    dispatcher.dispatch(GestureEvent::DoubleTap { x: 10.0, y: 10.0 }, &mut recorder);
    dispatcher.resize(20, 40);
    dispatcher.dispatch(GestureEvent::LongPress { x: 10.0, y: 10.0 }, &mut recorder);

    assert_eq!(
        recorder.calls,
        vec![Call::DoubleTap(0.0, 0.0), Call::LongTap(0.5, 0.25)]
    );
}

#[test]
fn test_perform_pinch() {
    let mut recorder = Recorder::default();
    perform_pinch(&mut recorder, -6.0, 8.0);
    assert_eq!(recorder.calls, vec![Call::Pinch(10.0, -6.0, 8.0)]);
}

#[test]
fn test_focus_region() -> Result<(), Box<dyn Error>> {
    let region = focus_region(640, 360, 1280, 720, 4000, 3000)?;
    assert_eq!(
        region,
        MeteringRegion {
            left: 1844,
            top: 1344,
            right: 2156,
            bottom: 1656,
            weight: METERING_WEIGHT,
        }
    );
    assert_eq!(region.as_rect(), Rect::new(1844, 1344, 312, 312));

    let corner = focus_region(0, 0, 1280, 720, 4000, 3000)?;
    assert_eq!((corner.left, corner.top), (0, 0));
    assert_eq!((corner.right, corner.bottom), (156, 156));

    let far = focus_region(1280, 720, 1280, 720, 4000, 3000)?;
    assert_eq!((far.left, far.top), (3844, 2844));
    assert_eq!((far.right, far.bottom), (4000, 3000));

    assert!(matches!(
        focus_region(10, 10, 0, 720, 4000, 3000),
        Err(ImageError::InvalidDimensions(_))
    ));

    Ok(())
}

#[test]
fn test_dip_to_px() {
    assert_eq!(dip_to_px(50.0, 2.0), 100);
    assert_eq!(dip_to_px(50.0, 1.5), 75);
    assert_eq!(dip_to_px(1.0, 0.75), 1);
    assert_eq!(dip_to_px(1.0, 0.25), 0);
}

#[test]
fn test_focus_ring() {
    let ring = FocusRing::new(10, 20, 2.0);
    assert_eq!(ring.size, 100);

    let segments = ring.segments();
    let (l, t, r, b) = (10.0, 20.0, 110.0, 120.0);
    for s in segments.iter() {
        // axis aligned and on the ring border
        assert!(s.x0 == s.x1 || s.y0 == s.y1, "{s:?}");
        let on_edge = |x: f32, y: f32| x == l || x == r || y == t || y == b;
        assert!(on_edge(s.x0, s.y0) && on_edge(s.x1, s.y1), "{s:?}");
        let len = (s.x1 - s.x0).abs() + (s.y1 - s.y0).abs();
        assert!((33.0..=34.0).contains(&len), "{s:?}");
    }

    assert_eq!((segments[0].x0, segments[0].y0), (l, t));
    assert_eq!((segments[0].x1, segments[0].y1), (43.0, t));
    assert_eq!((segments[3].x1, segments[3].y1), (r, 53.0));
    assert_eq!((segments[7].x0, segments[7].y0), (l, 86.0));
}

#[test]
fn test_rotation_degrees() -> Result<(), Box<dyn Error>> {
    assert_eq!(Rotation::from_degrees(0)?, Rotation::Rotation0);
    assert_eq!(Rotation::from_degrees(450)?, Rotation::Rotation90);
    assert_eq!(Rotation::from_degrees(-90)?, Rotation::Rotation270);
    assert_eq!(Rotation::Rotation180.degrees(), 180);
    assert_eq!(Rotation::Rotation270.to_string(), "270°");
    assert!(matches!(
        Rotation::from_degrees(45),
        Err(ImageError::InvalidParameter(_))
    ));

    assert_eq!(display_orientation(0)?, Rotation::Rotation90);
    assert_eq!(display_orientation(1)?, Rotation::Rotation90);
    assert_eq!(display_orientation(2)?, Rotation::Rotation180);
    assert_eq!(display_orientation(3)?, Rotation::Rotation270);
    assert!(matches!(
        display_orientation(4),
        Err(ImageError::InvalidParameter(_))
    ));

    Ok(())
}

#[test]
fn test_back_camera_orientation() -> Result<(), Box<dyn Error>> {
    let back = CameraFacing::Back;
    for (sensor, display, expected) in [(90, 90, 0), (90, 0, 90), (270, 90, 180), (0, 270, 90)] {
        let sensor = Rotation::from_degrees(sensor)?;
        let display = Rotation::from_degrees(display)?;
        let expected = Rotation::from_degrees(expected)?;
        assert_eq!(preview_orientation(back, sensor, display), expected);
        assert_eq!(capture_orientation(back, sensor, display), expected);
    }

    Ok(())
}

#[test]
fn test_front_camera_orientation() -> Result<(), Box<dyn Error>> {
    let front = CameraFacing::Front;
    // (sensor, display, preview, capture)
    let cases = [
        (270, 90, 0, 0),
        (270, 0, 90, 270),
        (90, 90, 180, 180),
        (270, 180, 270, 90),
    ];
    for (sensor, display, preview, capture) in cases {
        let sensor = Rotation::from_degrees(sensor)?;
        let display = Rotation::from_degrees(display)?;
        assert_eq!(
            preview_orientation(front, sensor, display),
            Rotation::from_degrees(preview)?
        );
        assert_eq!(
            capture_orientation(front, sensor, display),
            Rotation::from_degrees(capture)?
        );
    }

    Ok(())
}

#[test]
fn test_oriented_sizes() {
    let (photo_w, photo_h) = PHOTO_SIZE;

    let (target, photo) = oriented_sizes(Rotation::Rotation0, 1280, 720);
    assert_eq!(target, (1280, 720));
    assert_eq!(photo, (photo_w, photo_h));

    let (target, photo) = oriented_sizes(Rotation::Rotation180, 1280, 720);
    assert_eq!(target, (1280, 720));
    assert_eq!(photo, (photo_w, photo_h));

    for rotation in [Rotation::Rotation90, Rotation::Rotation270] {
        assert!(rotation.is_transposed());
        let (target, photo) = oriented_sizes(rotation, 720, 1280);
        assert_eq!(target, (1280, 720));
        assert_eq!(photo, (1840, 3264));
    }
}
