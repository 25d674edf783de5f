// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=autograph_ink_vello_cpu --heading-base-level=0

//! Vello CPU–backed raster backend for `autograph_ink`.
//!
//! [`VelloCpuRaster`] implements [`RasterBackend`] on top of the sparse-strips
//! [`vello_cpu::RenderContext`]: each ink segment is filled and then stroked
//! with a thin round line, and the result is read back as straight-alpha
//! RGBA8. A previous bitmap of the buffer's size is composited under the new
//! ink on the CPU, so pixels no new ink touches come back byte for byte.
//!
//! With the `png` feature (on by default) the [`export`] module encodes
//! signatures as PNG files.
//!
//! ```rust
//! use autograph_ink::{CanvasConfig, SignaturePad};
//! use autograph_ink_vello_cpu::VelloCpuRaster;
//! use kurbo::{Point, Size};
//!
//! let mut pad = VelloCpuRaster::canvas(CanvasConfig::new(Size::new(64.0, 32.0), 1.0));
//! pad.on_tap(Point::new(16.0, 16.0));
//! let bitmap = pad.signature().unwrap();
//! assert_eq!(bitmap.pixel(16, 16).unwrap()[3], 255);
//! ```

#![deny(unsafe_code)]
#![no_std]

extern crate alloc;
#[cfg(feature = "png")]
extern crate std;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use autograph_ink::{Bitmap, CanvasConfig, InkCanvas, InkSegment, RasterBackend};
use kurbo::{Affine, BezPath, PathEl};
use log::warn;
use peniko::{ImageQuality, ImageSampler};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath as CpuBezPath, Cap, Join, Rect, Stroke};
use vello_cpu::{
    Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings,
};

#[cfg(feature = "png")]
pub mod export;

#[cfg(feature = "png")]
pub use export::{ExportError, encode_png, export_cropped_png, export_png};

/// Width of the line stroked over every segment outline, in view units.
///
/// Closes hairline gaps between adjacent ribbons.
pub const OUTLINE_STROKE_WIDTH: f64 = 1.0;

/// An `InkCanvas` rendering through `vello_cpu`.
pub type VelloCpuCanvas = InkCanvas<VelloCpuRaster>;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Target {
    width: u16,
    height: u16,
    scale: f64,
}

struct SizedContext {
    width: u16,
    height: u16,
    ctx: RenderContext,
}

/// CPU raster backend using `vello_cpu`.
///
/// The render context is kept between frames and only reallocated when the
/// buffer size changes.
///
/// A bitmap drawn before any segment with exactly the buffer's size is not
/// sent through the renderer. It is kept as an underlay and the rendered ink
/// is composited over it at capture, so repeated incremental frames never
/// resample earlier ink. Other bitmaps are drawn as a stretched image paint.
#[derive(Default)]
pub struct VelloCpuRaster {
    ctx: Option<SizedContext>,
    target: Option<Target>,
    underlay: Option<Vec<u8>>,
    drawn: bool,
}

impl fmt::Debug for VelloCpuRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuRaster")
            .field("target", &self.target)
            .field("underlay", &self.underlay.is_some())
            .finish_non_exhaustive()
    }
}

impl VelloCpuRaster {
    /// Create a backend with no buffer allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an [`InkCanvas`] drawing through a new backend.
    pub fn canvas(config: CanvasConfig) -> VelloCpuCanvas {
        InkCanvas::new(Self::new(), config)
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn path_to_cpu(path: &BezPath) -> CpuBezPath {
        let mut out = CpuBezPath::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
                PathEl::LineTo(p) => out.line_to((p.x, p.y)),
                PathEl::QuadTo(p1, p2) => out.quad_to((p1.x, p1.y), (p2.x, p2.y)),
                PathEl::CurveTo(p1, p2, p3) => {
                    out.curve_to((p1.x, p1.y), (p2.x, p2.y), (p3.x, p3.y));
                }
                PathEl::ClosePath => out.close_path(),
            }
        }
        out
    }

    fn open_context(&mut self, width: u16, height: u16) {
        if let Some(sized) = &mut self.ctx
            && sized.width == width
            && sized.height == height
        {
            sized.ctx.reset();
            return;
        }
        let settings = RenderSettings {
            // Keep output on the u8 pipeline so pixels are stable across feature sets.
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        self.ctx = Some(SizedContext {
            width,
            height,
            ctx: RenderContext::new_with(width, height, settings),
        });
    }

    fn open(&mut self) -> Option<(Target, &mut RenderContext)> {
        let target = self.target?;
        let sized = self.ctx.as_mut()?;
        Some((target, &mut sized.ctx))
    }
}

impl RasterBackend for VelloCpuRaster {
    fn begin(&mut self, width: u16, height: u16, scale: f64) {
        if self.target.is_some() {
            warn!("begin while a buffer is open, discarding it");
        }
        self.open_context(width, height);
        self.underlay = None;
        self.drawn = false;
        self.target = Some(Target {
            width,
            height,
            scale,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap) {
        let Some(target) = self.target else {
            warn!("draw_bitmap without an open buffer");
            return;
        };
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return;
        }
        let same_size = bitmap.width() == target.width && bitmap.height() == target.height;
        if same_size && !self.drawn && self.underlay.is_none() {
            self.underlay = Some(bitmap.pixels().to_vec());
            return;
        }
        let Some((_, ctx)) = self.open() else {
            warn!("draw_bitmap without a render context");
            return;
        };
        let (bw, bh) = (f64::from(bitmap.width()), f64::from(bitmap.height()));
        let (stretch, sampler) = if same_size {
            let exact = ImageSampler {
                quality: ImageQuality::Low,
                ..ImageSampler::default()
            };
            (Affine::IDENTITY, exact)
        } else {
            let stretch = Affine::scale_non_uniform(
                f64::from(target.width) / bw,
                f64::from(target.height) / bh,
            );
            (stretch, ImageSampler::default())
        };
        ctx.set_transform(Self::affine_to_cpu(stretch));
        ctx.set_paint(CpuImage {
            image: ImageSource::from_peniko_image_data(&bitmap.to_image_data()),
            sampler,
        });
        ctx.fill_rect(&Rect::new(0.0, 0.0, bw, bh));
        self.drawn = true;
    }

    fn draw_segment(&mut self, segment: &InkSegment) {
        let Some((target, ctx)) = self.open() else {
            warn!("draw_segment without an open buffer");
            return;
        };
        let path = Self::path_to_cpu(segment.outline());
        ctx.set_transform(Self::affine_to_cpu(Affine::scale(target.scale)));
        ctx.set_paint(segment.color());
        ctx.fill_path(&path);

        let mut stroke = Stroke::new(OUTLINE_STROKE_WIDTH);
        stroke.join = Join::Round;
        stroke.start_cap = Cap::Round;
        stroke.end_cap = Cap::Round;
        ctx.set_stroke(stroke);
        ctx.stroke_path(&path);
        self.drawn = true;
    }

    fn capture(&mut self) -> Bitmap {
        let Some((target, ctx)) = self.open() else {
            warn!("capture without an open buffer");
            return Bitmap::new(0, 0, 1.0);
        };
        let mut pixmap = Pixmap::new(target.width, target.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let len = usize::from(target.width) * usize::from(target.height) * 4;
        let mut bytes = match self.underlay.take() {
            Some(pixels) if pixels.len() == len => pixels,
            _ => vec![0; len],
        };
        for (dst, p) in bytes.chunks_exact_mut(4).zip(pixmap.data()) {
            source_over(dst, [p.r, p.g, p.b, p.a]);
        }
        self.target = None;
        Bitmap::from_rgba8(target.width, target.height, target.scale, bytes).unwrap_or_else(
            || {
                warn!(
                    "pixmap size does not match the {}x{} buffer",
                    target.width, target.height
                );
                Bitmap::new(target.width, target.height, target.scale)
            },
        )
    }

    fn discard(&mut self) {
        self.target = None;
        self.underlay = None;
    }
}

/// Composite a premultiplied `src` pixel over the straight-alpha `dst` pixel.
///
/// `dst` is left untouched when `src` is fully transparent.
fn source_over(dst: &mut [u8], src: [u8; 4]) {
    fn mul255(a: u32, b: u32) -> u32 {
        (a * b + 127) / 255
    }

    let sa = u32::from(src[3]);
    if sa == 0 {
        return;
    }
    let da = u32::from(dst[3]);
    let keep = mul255(da, 255 - sa);
    let out_a = sa + keep;
    for (d, s) in dst.iter_mut().zip(src).take(3) {
        let premul = u32::from(s) + mul255(u32::from(*d), keep);
        *d = u8::try_from((premul * 255 + out_a / 2) / out_a).unwrap_or(u8::MAX);
    }
    dst[3] = u8::try_from(out_a).unwrap_or(u8::MAX);
}
