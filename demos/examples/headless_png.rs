// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw a synthetic signature with the Vello CPU backend and write PNGs.
//!
//! Usage: `cargo run -p autograph_demos --example headless_png [OUT_DIR]`
//!
//! Writes `signature.png` (full canvas), `signature_cropped.png` (ink bounds)
//! and `signature_undo.png` (after undoing the last gesture). Set
//! `RUST_LOG=debug` to see history and style decisions.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use autograph_demos::{replay, synthetic_signature};
use autograph_ink::{CanvasConfig, PadAction, SignaturePad};
use autograph_ink_vello_cpu::{ExportError, VelloCpuRaster, export_cropped_png, export_png};
use kurbo::Size;
use peniko::Color;

fn write_png(
    path: &Path,
    export: impl FnOnce(BufWriter<File>) -> Result<(), ExportError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    export(BufWriter::new(file))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let out_dir = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let size = Size::new(320.0, 120.0);
    let mut pad = VelloCpuRaster::canvas(CanvasConfig::new(size, 2.0));
    pad.style_mut().set_color(Color::from_rgb8(0x1a, 0x23, 0x7e));
    if !pad.style_mut().set_max_width(3.0) {
        log::warn!("keeping the default maximum width");
    }

    replay(&mut pad, &synthetic_signature(size.width, size.height));

    write_png(&out_dir.join("signature.png"), |w| export_png(&pad, w))?;
    write_png(&out_dir.join("signature_cropped.png"), |w| {
        export_cropped_png(&pad, w)
    })?;

    pad.apply(PadAction::Undo);
    write_png(&out_dir.join("signature_undo.png"), |w| export_png(&pad, w))?;

    Ok(())
}
