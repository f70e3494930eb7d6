// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load component data from a data script and mount it into a page.
//!
//! A missing source shows the inline error fragment in its target instead
//! of failing the whole page.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example showcase_mount`

use serde_json::Value;
use simplelog::{Config, LevelFilter, SimpleLogger};
use vitrine_dom::Document;
use vitrine_render::{Engine, FnRenderer, MemorySource};
use vitrine_widgets::Runtime;

const BUTTONS: &str = r#"
window.ShowcaseData = window.ShowcaseData || {};
ShowcaseData["button"] = {"variants": ["primary", "secondary", "ghost"]};
"#;

fn button_markup(d: &Value) -> String {
    d["variants"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(|v| format!(r#"<button class="btn btn-{v}" data-tooltip="{v} button">{v}</button>"#))
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());

    let source = MemorySource::new().with_file("data/button.data.js", BUTTONS);
    let mut engine = Engine::new();
    engine.register("button", FnRenderer::new(button_markup));
    engine.register("card", FnRenderer::new(|_: &Value| String::from("<div class=\"card\"></div>")));

    let mut doc = Document::new();
    let root = doc.root();
    let buttons = doc.create_element("section");
    let cards = doc.create_element("section");
    doc.append_child(root, buttons);
    doc.append_child(root, cards);

    let mut rt = Runtime::new();
    rt.start(&mut doc);

    for (type_name, path, target) in [
        ("button", "data/button.data.js", buttons),
        ("card", "data/card.data.js", cards),
    ] {
        match engine
            .load_and_mount(&source, &mut doc, type_name, path, target)
            .await
        {
            Ok(nodes) => println!("{type_name}: mounted {} nodes", nodes.len()),
            Err(err) => println!("{type_name}: {err}"),
        }
    }
    rt.observe(&mut doc);

    println!("{}", doc.inner_markup(root));
    println!("{:?}", engine.cache_stats());
}
