// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke styling and canvas configuration.
//!
//! [`StrokeStyle`] guards its invariants with validated setters: a write that
//! would break an invariant is ignored and the previous value is kept. The
//! setters report whether the write was accepted, but callers that ignore the
//! return value get the same silent-rejection behavior the widget layer has
//! always relied on.

use kurbo::Size;
use log::debug;
use peniko::Color;

/// Default minimum ribbon width, in view units.
pub const DEFAULT_MIN_WIDTH: f64 = 1.0;

/// Default maximum ribbon width, in view units.
pub const DEFAULT_MAX_WIDTH: f64 = 2.0;

/// Color, opacity and width limits used for new ink.
///
/// Invariants, enforced on every write:
/// - `0 < min_width <= max_width`
/// - `0 < alpha <= 1`
#[derive(Clone, Copy, Debug)]
pub struct StrokeStyle {
    color: Color,
    alpha: f32,
    min_width: f64,
    max_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha: 1.0,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

impl StrokeStyle {
    /// The stroke color. Its own alpha is replaced by [`Self::alpha`] when drawing.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The stroke opacity in `(0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// The narrowest ribbon width.
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// The widest ribbon width.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// The color new ink is painted with: [`Self::color`] at [`Self::alpha`].
    pub fn paint(&self) -> Color {
        self.color.with_alpha(self.alpha)
    }

    /// Set the stroke color. Any color is accepted.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the stroke opacity.
    ///
    /// Values outside `(0, 1]` (including NaN) are rejected and the previous
    /// value is kept. Returns whether the write was accepted.
    pub fn set_alpha(&mut self, alpha: f32) -> bool {
        if alpha > 0.0 && alpha <= 1.0 {
            self.alpha = alpha;
            true
        } else {
            debug!("rejected stroke alpha {alpha}, keeping {}", self.alpha);
            false
        }
    }

    /// Set the minimum ribbon width.
    ///
    /// Rejected (previous value kept) unless `0 < width <= max_width`.
    /// Returns whether the write was accepted.
    pub fn set_min_width(&mut self, width: f64) -> bool {
        if width > 0.0 && width <= self.max_width {
            self.min_width = width;
            true
        } else {
            debug!("rejected minimum width {width}, keeping {}", self.min_width);
            false
        }
    }

    /// Set the maximum ribbon width.
    ///
    /// Rejected (previous value kept) unless `width >= min_width`, `width > 0`
    /// and `width` is finite. Returns whether the write was accepted.
    pub fn set_max_width(&mut self, width: f64) -> bool {
        if width > 0.0 && width >= self.min_width && width.is_finite() {
            self.max_width = width;
            true
        } else {
            debug!("rejected maximum width {width}, keeping {}", self.max_width);
            false
        }
    }

    /// Clamp a raw width into `[min_width, max_width]`.
    #[inline]
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min_width, self.max_width)
    }
}

/// Largest side of the offscreen buffer, in device pixels.
///
/// A [`CanvasConfig`] whose `size * scale` exceeds this on either axis is
/// invalid and never rasterized.
pub const MAX_DEVICE_EXTENT: f64 = 8192.0;

/// Size and pixel density of the drawing surface.
///
/// The fields are public and unchecked; see [`CanvasConfig::is_valid`] for
/// the configurations that are actually rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasConfig {
    /// View size in view units.
    pub size: Size,
    /// Device pixels per view unit used for the persistent bitmap.
    pub scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Size::new(320.0, 200.0),
            scale: 1.0,
        }
    }
}

impl CanvasConfig {
    /// Create a config for a view of `size` at `scale` device pixels per unit.
    pub fn new(size: Size, scale: f64) -> Self {
        Self { size, scale }
    }

    /// Like [`CanvasConfig::new`], but returns `None` for an invalid config.
    pub fn checked(size: Size, scale: f64) -> Option<Self> {
        let config = Self::new(size, scale);
        config.is_valid().then_some(config)
    }

    /// Returns `true` when the config can back an offscreen buffer.
    ///
    /// The scale must be finite and positive, the size finite and
    /// non-negative, and the device size at most [`MAX_DEVICE_EXTENT`] on
    /// each axis.
    pub fn is_valid(&self) -> bool {
        let fits =
            |len: f64| len.is_finite() && len >= 0.0 && len * self.scale <= MAX_DEVICE_EXTENT;
        self.scale.is_finite()
            && self.scale > 0.0
            && fits(self.size.width)
            && fits(self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_satisfy_invariants() {
        let style = StrokeStyle::default();
        assert!(style.min_width() > 0.0);
        assert!(style.min_width() <= style.max_width());
        assert_eq!(style.alpha(), 1.0);
    }

    #[test]
    fn max_below_min_is_rejected() {
        let mut style = StrokeStyle::default();
        assert!(style.set_min_width(1.5));
        assert!(!style.set_max_width(1.0));
        assert_eq!(style.max_width(), DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn non_positive_max_is_rejected() {
        let mut style = StrokeStyle::default();
        assert!(!style.set_max_width(0.0));
        assert!(!style.set_max_width(-3.0));
        assert!(!style.set_max_width(f64::NAN));
        assert!(!style.set_max_width(f64::INFINITY));
        assert_eq!(style.max_width(), DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn min_above_max_or_non_positive_is_rejected() {
        let mut style = StrokeStyle::default();
        assert!(!style.set_min_width(DEFAULT_MAX_WIDTH + 0.1));
        assert!(!style.set_min_width(0.0));
        assert!(!style.set_min_width(f64::NAN));
        assert_eq!(style.min_width(), DEFAULT_MIN_WIDTH);
    }

    #[test]
    fn equal_min_and_max_are_allowed() {
        let mut style = StrokeStyle::default();
        assert!(style.set_min_width(DEFAULT_MAX_WIDTH));
        assert!(style.set_max_width(DEFAULT_MAX_WIDTH));
        assert_eq!(style.clamp_width(100.0), DEFAULT_MAX_WIDTH);
        assert_eq!(style.clamp_width(0.0), DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn widening_then_raising_min_works_in_order() {
        let mut style = StrokeStyle::default();
        assert!(!style.set_min_width(3.0), "min above current max must fail");
        assert!(style.set_max_width(6.0));
        assert!(style.set_min_width(3.0));
        assert_eq!((style.min_width(), style.max_width()), (3.0, 6.0));
    }

    #[test]
    fn alpha_outside_unit_interval_is_rejected() {
        let mut style = StrokeStyle::default();
        assert!(style.set_alpha(0.25));
        assert!(!style.set_alpha(0.0));
        assert!(!style.set_alpha(1.5));
        assert!(!style.set_alpha(f32::NAN));
        assert_eq!(style.alpha(), 0.25);
        assert!(style.set_alpha(1.0));
    }

    #[test]
    fn canvas_config_rejects_unusable_scales_and_sizes() {
        let size = Size::new(320.0, 200.0);
        assert!(CanvasConfig::default().is_valid());
        assert!(CanvasConfig::checked(size, 3.0).is_some());
        assert!(CanvasConfig::checked(Size::ZERO, 1.0).is_some());

        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(CanvasConfig::checked(size, scale), None, "scale {scale}");
        }
        for bad in [f64::INFINITY, f64::NAN, -1.0, 1.0e9] {
            assert!(!CanvasConfig::new(Size::new(bad, 200.0), 1.0).is_valid());
            assert!(!CanvasConfig::new(Size::new(320.0, bad), 1.0).is_valid());
        }
        // The limit is on device pixels, so a large scale can push a small view over it.
        assert!(!CanvasConfig::new(size, MAX_DEVICE_EXTENT).is_valid());
        assert!(CanvasConfig::new(Size::new(MAX_DEVICE_EXTENT / 2.0, 1.0), 2.0).is_valid());
    }

    #[test]
    fn paint_replaces_color_alpha() {
        let mut style = StrokeStyle::default();
        style.set_color(Color::from_rgba8(255, 0, 0, 40));
        style.set_alpha(0.5);
        let paint = style.paint();
        assert_eq!(paint.components[3], 0.5);
        assert_eq!(paint.components[0], 1.0);
    }
}
