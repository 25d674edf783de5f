// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! PNG export of signatures.
//!
//! Bitmaps are written as 8-bit RGBA with straight alpha. The bitmap's scale
//! factor is recorded as physical pixel density, taking one view unit as one
//! point (1/72 inch).

use std::io::Write;

use autograph_ink::{Bitmap, SignaturePad};
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};

const POINTS_PER_INCH: f64 = 72.0;
const METERS_PER_INCH: f64 = 0.0254;

/// Errors from PNG export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The pad has no rendered signature to export.
    #[error("no signature has been drawn")]
    NoSignature,
    /// The PNG encoder or the underlying writer failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Pixels per meter for a bitmap rendered at `scale` device pixels per point.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clamped to the u32 range before the cast"
)]
fn pixels_per_meter(scale: f64) -> Option<u32> {
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let ppm = (POINTS_PER_INCH * scale / METERS_PER_INCH).round();
    Some(ppm.clamp(1.0, f64::from(u32::MAX)) as u32)
}

/// Encode `bitmap` as a PNG into `writer`.
pub fn encode_png<W: Write>(bitmap: &Bitmap, writer: W) -> Result<(), ExportError> {
    let mut encoder = Encoder::new(
        writer,
        u32::from(bitmap.width()),
        u32::from(bitmap.height()),
    );
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    if let Some(ppm) = pixels_per_meter(bitmap.scale()) {
        encoder.set_pixel_dims(Some(PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: Unit::Meter,
        }));
    }
    let mut writer = encoder.write_header()?;
    writer.write_image_data(bitmap.pixels())?;
    writer.finish()?;
    Ok(())
}

/// Encode the pad's full signature bitmap.
pub fn export_png<W: Write>(pad: &dyn SignaturePad, writer: W) -> Result<(), ExportError> {
    let bitmap = pad.signature().ok_or(ExportError::NoSignature)?;
    encode_png(bitmap, writer)
}

/// Encode the pad's signature cropped to the ink bounds.
pub fn export_cropped_png<W: Write>(pad: &dyn SignaturePad, writer: W) -> Result<(), ExportError> {
    let bitmap = pad.cropped_signature().ok_or(ExportError::NoSignature)?;
    encode_png(&bitmap, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use std::vec::Vec;

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>, Option<PixelDimensions>) {
        let decoder = png::Decoder::new(bytes);
        let mut reader = decoder.read_info().expect("valid header");
        let dims = reader.info().pixel_dims;
        let mut buf = vec![0_u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).expect("valid frame");
        buf.truncate(info.buffer_size());
        (info, buf, dims)
    }

    #[test]
    fn pixels_survive_encoding() {
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 128, //
            0, 0, 255, 0, 10, 20, 30, 40,
        ];
        let bitmap = Bitmap::from_rgba8(2, 2, 1.0, pixels.clone()).expect("sized");
        let mut out = Vec::new();
        encode_png(&bitmap, &mut out).expect("encodes");

        let (info, decoded, _) = decode(&out);
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.color_type, ColorType::Rgba);
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn scale_is_recorded_as_density() {
        let bitmap = Bitmap::new(4, 4, 2.0);
        let mut out = Vec::new();
        encode_png(&bitmap, &mut out).expect("encodes");

        let (_, _, dims) = decode(&out);
        let dims = dims.expect("pHYs chunk");
        assert_eq!(dims.unit, Unit::Meter);
        assert_eq!(dims.xppu, 5669);
        assert_eq!(dims.yppu, 5669);
    }

    #[test]
    fn invalid_scale_has_no_density() {
        assert_eq!(pixels_per_meter(0.0), None);
        assert_eq!(pixels_per_meter(f64::NAN), None);
        assert_eq!(pixels_per_meter(1.0), Some(2835));
    }
}
