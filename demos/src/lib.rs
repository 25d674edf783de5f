// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Autograph demos.
//!
//! The demos run headless, so instead of reading a pointer device they replay
//! a synthetic signature generated here.

use core::f64::consts::TAU;

use autograph_ink::SignaturePad;
use kurbo::Point;
use log::info;

/// One pointer gesture in view units. A single sample is replayed as a tap.
pub type Gesture = Vec<Point>;

/// A looping, handwriting-like signature fitting in `width` x `height`.
///
/// The main flourish is a prolate cycloid sampled at a steadily increasing
/// pace, so ink gets thinner towards its end. It is followed by a fast
/// underline and a tap.
pub fn synthetic_signature(width: f64, height: f64) -> Vec<Gesture> {
    const LOOPS: f64 = 4.0;
    const SAMPLES: u32 = 220;

    let left = width * 0.1;
    let span = width * 0.75;
    let baseline = height * 0.65;
    let advance = span / (TAU * LOOPS);
    let swing = advance * 1.8;

    let flourish = (0..=SAMPLES)
        .map(|i| {
            let s = f64::from(i) / f64::from(SAMPLES);
            let t = TAU * LOOPS * s.powf(1.4);
            Point::new(
                left + advance * t - swing * t.sin(),
                baseline - height * 0.22 * (1.0 - t.cos()),
            )
        })
        .collect();

    let underline_y = height * 0.85;
    let underline = (0..=6)
        .map(|i| Point::new(left + f64::from(i) * span / 6.0, underline_y - f64::from(i)))
        .collect();

    let tap = vec![Point::new(left + span + width * 0.05, height * 0.3)];

    vec![flourish, underline, tap]
}

/// Feed `gestures` to `pad` as begin/move/end sequences or taps.
pub fn replay(pad: &mut dyn SignaturePad, gestures: &[Gesture]) {
    for gesture in gestures {
        match gesture.as_slice() {
            [] => {}
            [point] => pad.on_tap(*point),
            [first, rest @ ..] => {
                pad.on_gesture_begin(*first);
                for point in rest {
                    pad.on_gesture_move(*point);
                }
                pad.on_gesture_end();
            }
        }
        info!("replayed a gesture of {} samples", gesture.len());
    }
}
