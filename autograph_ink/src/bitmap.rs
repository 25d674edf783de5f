// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persistent raster that holds the rendered signature.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};

/// RGBA8 pixels with straight (non-premultiplied) alpha, row-major, plus the
/// number of device pixels per view unit they were rendered at.
#[derive(Clone)]
pub struct Bitmap {
    width: u16,
    height: u16,
    scale: f64,
    pixels: Vec<u8>,
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// A fully transparent bitmap.
    pub fn new(width: u16, height: u16, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
            pixels: vec![0; usize::from(width) * usize::from(height) * 4],
        }
    }

    /// Wrap existing RGBA8 pixels.
    ///
    /// Returns `None` if `pixels` does not hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u16, height: u16, scale: f64, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == usize::from(width) * usize::from(height) * 4).then_some(Self {
            width,
            height,
            scale,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Device pixels per view unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Size in view units.
    pub fn logical_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height)) / self.scale
    }

    /// The pixel rectangle covered by the bitmap.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// The RGBA value at pixel `(x, y)`.
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Copy out the pixels inside `rect` (in pixel coordinates).
    ///
    /// The rectangle is rounded outwards to whole pixels and intersected with
    /// the bitmap. Returns `None` when nothing of it lies inside the bitmap.
    pub fn crop(&self, rect: Rect) -> Option<Self> {
        let rect = rect.abs().expand().intersect(self.bounds());
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "rect is integral and clipped to the bitmap bounds"
        )]
        let (x0, y0, x1, y1) = (
            rect.x0 as u16,
            rect.y0 as u16,
            rect.x1 as u16,
            rect.y1 as u16,
        );
        let (width, height) = (x1 - x0, y1 - y0);
        let stride = usize::from(self.width) * 4;
        let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height) * 4);
        for row in usize::from(y0)..usize::from(y1) {
            let start = row * stride + usize::from(x0) * 4;
            pixels.extend_from_slice(&self.pixels[start..start + usize::from(width) * 4]);
        }
        Some(Self {
            width,
            height,
            scale: self.scale,
            pixels,
        })
    }

    /// Describe the pixels as a `peniko` image so backends can draw them.
    pub fn to_image_data(&self) -> ImageData {
        ImageData {
            data: Blob::from(self.pixels.clone()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Returns `true` if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }
}
