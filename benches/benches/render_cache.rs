// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use vitrine_dom::Document;
use vitrine_render::{Engine, FnRenderer};
use vitrine_widgets::Runtime;

fn select_markup(d: &Value) -> String {
    let items: String = d["options"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|o| {
            format!(
                r#"<li class="dropdown-item" data-value="{0}">{0}</li>"#,
                o.as_str().unwrap_or_default()
            )
        })
        .collect();
    format!(
        r#"<div class="dropdown"><button class="dropdown-trigger"><span class="dropdown-label"></span></button><ul class="dropdown-menu" hidden>{items}</ul></div>"#
    )
}

fn data(n: usize) -> Value {
    let options: Vec<String> = (0..n).map(|i| format!("option-{i}")).collect();
    json!({ "options": options })
}

fn engine() -> Engine {
    let mut engine = Engine::new();
    engine.register("select", FnRenderer::new(select_markup));
    engine
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &n in &[8usize, 64, 512] {
        let record = data(n);
        group.bench_function(format!("cold_n{n}"), |b| {
            let mut engine = engine();
            b.iter(|| black_box(engine.render("select", &record, false)));
        });
        group.bench_function(format!("cached_n{n}"), |b| {
            let mut engine = engine();
            engine.render("select", &record, true);
            b.iter(|| black_box(engine.render("select", &record, true)));
        });
    }
    group.finish();
}

fn bench_mount(c: &mut Criterion) {
    let mut group = c.benchmark_group("mount");
    let record = data(64);
    group.bench_function("mount_and_observe_n64", |b| {
        let mut engine = engine();
        b.iter_batched(
            || {
                let mut doc = Document::new();
                let mut rt = Runtime::new();
                rt.start(&mut doc);
                (doc, rt)
            },
            |(mut doc, mut rt)| {
                let root = doc.root();
                let _ = engine.mount(&mut doc, "select", &record, root, true);
                rt.observe(&mut doc);
                black_box(rt.drain_events().len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_render, bench_mount);
criterion_main!(benches);
