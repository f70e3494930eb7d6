// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use vitrine_place::{Placement, PlacementRequest, Viewport, place};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

// Anchors scattered over a tall document, some partly off screen.
fn gen_anchors(count: usize, doc: Size) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * doc.width - 40.0;
            let y0 = rng.next_f64() * doc.height;
            Rect::new(x0, y0, x0 + 120.0, y0 + 32.0)
        })
        .collect()
}

fn bench_place(c: &mut Criterion) {
    let viewport = Viewport::new(Size::new(1280.0, 800.0)).with_scroll(Vec2::new(0.0, 1200.0));
    let anchors = gen_anchors(4096, Size::new(1280.0, 4000.0));
    let overlay = Size::new(240.0, 96.0);

    let mut group = c.benchmark_group("place");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for placement in [
        Placement::from_code("top").unwrap(),
        Placement::from_compass("es").unwrap(),
    ] {
        group.bench_function(format!("single_{}", placement.code()), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &anchor in &anchors {
                    let req = PlacementRequest {
                        anchor,
                        overlay,
                        placement,
                        offset: 8.0,
                    };
                    let p = place(black_box(&req), &viewport);
                    acc += p.x + p.y;
                }
                black_box(acc);
            });
        });
    }
    group.bench_function("all_codes", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &anchor in &anchors[..256] {
                for placement in Placement::ALL {
                    let req = PlacementRequest {
                        anchor,
                        overlay,
                        placement,
                        offset: 8.0,
                    };
                    let p = place(&req, &viewport);
                    acc += p.x + p.y;
                }
            }
            black_box(acc);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_place);
criterion_main!(benches);
