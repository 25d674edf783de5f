// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=autograph_ink --heading-base-level=0

//! Autograph Ink: variable-width signature capture.
//!
//! This crate turns a stream of pointer samples into pen-like ink whose width
//! follows drawing speed, keeps the rendered result in a bitmap, and offers a
//! bounded undo/redo history of committed gestures.
//!
//! The pieces:
//!
//! - [`StrokeBuilder`] consumes samples and emits filled ribbon outlines
//!   (quadratic curves through sample midpoints, wider when slow, narrower
//!   when fast). Taps become round dots.
//! - [`InkPath`] accumulates the emitted [`InkSegment`]s; [`InkSnapshot`] is an
//!   immutable, cheaply shared copy of it.
//! - [`History`] is the capped snapshot log behind undo and redo.
//! - [`Compositor`] composites new ink onto the persistent [`Bitmap`] through
//!   a pluggable [`RasterBackend`].
//! - [`InkCanvas`] wires these together behind the [`SignaturePad`] trait,
//!   which is what host widgets talk to.
//!
//! Rasterization is left to a backend crate; `autograph_ink_vello_cpu`
//! provides one on top of the sparse-strips CPU renderer.
//!
//! ## Example
//!
//! ```rust
//! use autograph_ink::{
//!     Bitmap, CanvasConfig, InkCanvas, InkSegment, RasterBackend, SignaturePad,
//! };
//! use kurbo::Point;
//!
//! /// A backend that only remembers the buffer size.
//! #[derive(Default)]
//! struct Null(u16, u16, f64);
//!
//! impl RasterBackend for Null {
//!     fn begin(&mut self, width: u16, height: u16, scale: f64) {
//!         *self = Null(width, height, scale);
//!     }
//!     fn draw_bitmap(&mut self, _: &Bitmap) {}
//!     fn draw_segment(&mut self, _: &InkSegment) {}
//!     fn capture(&mut self) -> Bitmap {
//!         Bitmap::new(self.0, self.1, self.2)
//!     }
//!     fn discard(&mut self) {}
//! }
//!
//! let mut pad = InkCanvas::new(Null::default(), CanvasConfig::default());
//! pad.on_gesture_begin(Point::new(10.0, 10.0));
//! for x in [20.0, 30.0, 40.0] {
//!     pad.on_gesture_move(Point::new(x, 12.0));
//! }
//! pad.on_gesture_end();
//! assert!(!pad.is_empty());
//!
//! pad.undo();
//! assert!(pad.is_empty());
//! pad.redo();
//! assert!(pad.cropped_signature().is_some());
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `peniko/std`.
//! - `libm`: float math for `no_std` builds.
//!
//! Logging goes through the [`log`] facade; nothing is emitted unless the
//! host installs a logger.

#![no_std]

extern crate alloc;

mod bitmap;
mod compositor;
mod geometry;
mod history;
mod pad;
mod path;
pub mod ribbon;
mod style;

pub use bitmap::Bitmap;
pub use compositor::{Compositor, RasterBackend};
pub use geometry::{distance, midpoint, offset_points};
pub use history::{HISTORY_CAPACITY, History, Transition};
pub use pad::{GestureEvent, InkCanvas, PadAction, SignaturePad, SignaturePadObserver};
pub use path::{InkPath, InkSegment, InkSnapshot};
pub use ribbon::{Step, StrokeBuilder};
pub use style::{
    CanvasConfig, DEFAULT_MAX_WIDTH, DEFAULT_MIN_WIDTH, MAX_DEVICE_EXTENT, StrokeStyle,
};
