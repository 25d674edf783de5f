// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster compositing of ink onto the persistent signature bitmap.
//!
//! Every change is applied with the same protocol: open an offscreen buffer
//! at device resolution, draw the previous bitmap into it, draw the new ink
//! on top, capture the result as the new bitmap and release the buffer. The
//! bitmap is replaced wholesale each time, so it always reflects exactly the
//! ink that was composited, at the cost of touching every pixel per step.
//!
//! The offscreen buffer itself is provided by a [`RasterBackend`]. The
//! compositor holds it open through a guard that discards it on every exit
//! path, so a backend never sees two buffers or a leaked one.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;
use log::{debug, warn};

use crate::{Bitmap, CanvasConfig, InkSegment};

/// Offscreen drawing surface used by the [`Compositor`].
///
/// Calls always arrive in the order `begin`, any number of `draw_*`, then
/// exactly one of `capture` or `discard`.
pub trait RasterBackend {
    /// Open a transparent buffer of `width` x `height` pixels. Ink is given in
    /// view units and must be scaled by `scale`.
    fn begin(&mut self, width: u16, height: u16, scale: f64);

    /// Draw `bitmap` stretched over the whole buffer.
    fn draw_bitmap(&mut self, bitmap: &Bitmap);

    /// Fill `segment`'s outline and stroke it with a 1-unit round-join,
    /// round-cap line, both in the segment's color.
    fn draw_segment(&mut self, segment: &InkSegment);

    /// Capture the buffer contents and release the buffer.
    fn capture(&mut self) -> Bitmap;

    /// Release the buffer without capturing it.
    fn discard(&mut self);
}

/// An open offscreen buffer; discarded on drop unless captured.
struct Offscreen<'a, B: RasterBackend> {
    backend: &'a mut B,
    open: bool,
}

impl<'a, B: RasterBackend> Offscreen<'a, B> {
    fn begin(backend: &'a mut B, width: u16, height: u16, scale: f64) -> Self {
        backend.begin(width, height, scale);
        Self {
            backend,
            open: true,
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap) {
        self.backend.draw_bitmap(bitmap);
    }

    fn draw_segment(&mut self, segment: &InkSegment) {
        self.backend.draw_segment(segment);
    }

    fn capture(mut self) -> Bitmap {
        self.open = false;
        self.backend.capture()
    }
}

impl<B: RasterBackend> Drop for Offscreen<'_, B> {
    fn drop(&mut self) {
        if self.open {
            self.backend.discard();
        }
    }
}

/// Owner of the persistent signature bitmap.
#[derive(Debug)]
pub struct Compositor<B> {
    backend: B,
    config: CanvasConfig,
    bitmap: Option<Bitmap>,
}

impl<B: RasterBackend> Compositor<B> {
    /// Create a compositor with no bitmap yet.
    pub fn new(backend: B, config: CanvasConfig) -> Self {
        Self {
            backend,
            config,
            bitmap: None,
        }
    }

    /// The raster backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the raster backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The current canvas configuration.
    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    /// Change the canvas size or scale. The bitmap is dropped.
    pub fn set_config(&mut self, config: CanvasConfig) {
        self.config = config;
        self.bitmap = None;
    }

    /// Pixel dimensions of the offscreen buffer for the current config.
    ///
    /// An invalid config (see [`CanvasConfig::is_valid`]) maps to `(0, 0)`,
    /// so nothing is ever allocated for it.
    pub fn pixel_size(&self) -> (u16, u16) {
        if !self.config.is_valid() {
            return (0, 0);
        }
        let CanvasConfig { size, scale } = self.config;
        (to_pixels(size.width * scale), to_pixels(size.height * scale))
    }

    /// The persistent bitmap, if anything has been drawn.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Replace the persistent bitmap directly.
    pub fn set_bitmap(&mut self, bitmap: Option<Bitmap>) {
        self.bitmap = bitmap;
    }

    /// Drop the persistent bitmap.
    pub fn clear(&mut self) {
        self.bitmap = None;
    }

    /// Composite `segments` on top of the current bitmap.
    pub fn composite<'s>(&mut self, segments: impl IntoIterator<Item = &'s InkSegment>) {
        let (width, height) = self.pixel_size();
        if !self.config.is_valid() {
            warn!("skipping composite for invalid canvas config {:?}", self.config);
            return;
        }
        if width == 0 || height == 0 {
            debug!("skipping composite onto an empty {width}x{height} canvas");
            return;
        }
        let mut offscreen = Offscreen::begin(&mut self.backend, width, height, self.config.scale);
        if let Some(previous) = &self.bitmap {
            offscreen.draw_bitmap(previous);
        }
        for segment in segments {
            offscreen.draw_segment(segment);
        }
        let bitmap = offscreen.capture();
        if bitmap.width() != width || bitmap.height() != height {
            warn!(
                "backend captured {}x{} for a {width}x{height} buffer",
                bitmap.width(),
                bitmap.height()
            );
        }
        self.bitmap = Some(bitmap);
    }

    /// Drop the bitmap and render `segments` from scratch.
    pub fn redraw<'s>(&mut self, segments: impl IntoIterator<Item = &'s InkSegment>) {
        self.bitmap = None;
        self.composite(segments);
    }

    /// Crop the bitmap to `bounds` (in view units) grown by `outset` on every side.
    ///
    /// The grown rectangle is scaled by the bitmap's own scale factor before
    /// cropping. Returns `None` without a bitmap or when the region misses it.
    pub fn crop(&self, bounds: Rect, outset: f64) -> Option<Bitmap> {
        let bitmap = self.bitmap.as_ref()?;
        let region = bounds.inflate(outset, outset).scale_from_origin(bitmap.scale());
        bitmap.crop(region)
    }
}

/// Round a device-space length up to whole pixels, saturating at `u16::MAX`.
///
/// Valid configs stay well below the saturation point.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the value is clamped to the u16 range before the cast"
)]
fn to_pixels(len: f64) -> u16 {
    if len.is_nan() || len <= 0.0 {
        return 0;
    }
    len.ceil().min(f64::from(u16::MAX)) as u16
}
