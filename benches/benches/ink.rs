// Copyright 2025 the Autograph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use autograph_ink::ribbon::{Step, StrokeBuilder};
use autograph_ink::{CanvasConfig, History, InkCanvas, SignaturePad, StrokeStyle};
use autograph_ink_vello_cpu::VelloCpuRaster;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// A random walk of `n` samples inside `size`, with jittery step lengths.
fn walk(n: usize, size: Size, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    let mut p = Point::new(size.width / 2.0, size.height / 2.0);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let dx = (rng.next_f64() - 0.5) * 12.0;
        let dy = (rng.next_f64() - 0.5) * 12.0;
        p = Point::new(
            (p.x + dx).clamp(0.0, size.width),
            (p.y + dy).clamp(0.0, size.height),
        );
        out.push(p);
    }
    out
}

fn bench_ribbons(c: &mut Criterion) {
    let mut group = c.benchmark_group("autograph_ribbon");
    let style = StrokeStyle::default();

    for &n in &[256_usize, 4_096] {
        let samples = walk(n, Size::new(320.0, 200.0), 0xA170_0000_0000_0001);
        group.bench_function(format!("advance(n={n})"), |b| {
            b.iter(|| {
                let mut stroke = StrokeBuilder::new();
                stroke.begin(samples[0]);
                let mut ribbons = 0_usize;
                for &p in &samples[1..] {
                    if let Step::Ribbon(outline) = stroke.advance(p, &style) {
                        ribbons += 1;
                        black_box(outline);
                    }
                }
                black_box(ribbons)
            });
        });
    }

    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("autograph_history");
    let size = Size::new(320.0, 200.0);

    group.bench_function("commit_and_undo_all(n=100)", |b| {
        let mut canvas = InkCanvas::new(NullRaster::default(), CanvasConfig::new(size, 1.0));
        let taps = walk(100, size, 0xA170_0000_0000_0002);
        b.iter(|| {
            canvas.clear(true);
            for &p in &taps {
                canvas.on_tap(p);
            }
            while canvas.can_undo() {
                canvas.undo();
            }
            black_box(canvas.history().len())
        });
    });

    group.bench_function("push_past_capacity", |b| {
        b.iter_batched(
            History::new,
            |mut history| {
                let canvas = InkCanvas::new(NullRaster::default(), CanvasConfig::default());
                for _ in 0..150 {
                    history.push(canvas.path().snapshot());
                }
                black_box(history)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_vello_cpu(c: &mut Criterion) {
    let mut group = c.benchmark_group("autograph_vello_cpu");
    group.sample_size(20);

    for &scale in &[1.0_f64, 2.0] {
        let size = Size::new(320.0, 200.0);
        let samples = walk(200, size, 0xA170_0000_0000_0003);
        group.bench_function(format!("gesture(n=200,scale={scale})"), |b| {
            b.iter_batched(
                || VelloCpuRaster::canvas(CanvasConfig::new(size, scale)),
                |mut pad| {
                    pad.on_gesture_begin(samples[0]);
                    for &p in &samples[1..] {
                        pad.on_gesture_move(p);
                    }
                    pad.on_gesture_end();
                    black_box(pad)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Backend that skips rasterization, isolating the model cost.
#[derive(Default)]
struct NullRaster(u16, u16, f64);

impl autograph_ink::RasterBackend for NullRaster {
    fn begin(&mut self, width: u16, height: u16, scale: f64) {
        *self = Self(width, height, scale);
    }

    fn draw_bitmap(&mut self, _: &autograph_ink::Bitmap) {}

    fn draw_segment(&mut self, _: &autograph_ink::InkSegment) {}

    fn capture(&mut self) -> autograph_ink::Bitmap {
        autograph_ink::Bitmap::new(self.0, self.1, self.2)
    }

    fn discard(&mut self) {}
}

criterion_group!(benches, bench_ribbons, bench_history, bench_vello_cpu);
criterion_main!(benches);
