// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading data, mounting components, and handing the result to the widget
//! runtime.

use serde_json::{Value, json};
use vitrine_dom::{Document, NodeId};
use vitrine_render::{Engine, FnRenderer, LoadError, MemorySource, StaticDirSource};
use vitrine_widgets::markers::class;
use vitrine_widgets::{EventKind, InputEvent, Runtime};

const SCRIPT: &str = r#"
window.ShowcaseData = window.ShowcaseData || {};
ShowcaseData["select"] = {
  "placeholder": "Choose a size",
  "options": [{"value": "s", "label": "Small"}, {"value": "m", "label": "Medium"}]
};
ShowcaseData["badge"] = {"text": "Beta"};
"#;

fn select_renderer() -> FnRenderer<impl Fn(&Value) -> String> {
    FnRenderer::new(|d: &Value| {
        let options: String = d["options"]
            .as_array()
            .into_iter()
            .flatten()
            .map(|o| {
                format!(
                    r#"<li class="dropdown-item" data-value="{}">{}</li>"#,
                    o["value"].as_str().unwrap_or_default(),
                    o["label"].as_str().unwrap_or_default()
                )
            })
            .collect();
        format!(
            r#"<div class="dropdown" data-placeholder="{}"><button class="dropdown-trigger"><span class="dropdown-label"></span></button><ul class="dropdown-menu" hidden>{options}</ul></div>"#,
            d["placeholder"].as_str().unwrap_or_default()
        )
    })
}

fn target(doc: &mut Document) -> NodeId {
    let root = doc.root();
    let t = doc.create_element("section");
    doc.append_child(root, t);
    t
}

#[tokio::test]
async fn scripts_are_injected_once_and_memoized() {
    let source = MemorySource::new().with_file("data/select.data.js", SCRIPT);
    let mut engine = Engine::new();

    let select = engine.load_data(&source, "data/select.data.js").await.unwrap();
    assert_eq!(select["placeholder"], "Choose a size");
    engine.load_data(&source, "data/select.data.js").await.unwrap();
    assert_eq!(source.injections(), 1);

    // The same script registered `badge`; resolving it needs no injection.
    let badge = engine.load_data(&source, "other/badge.data.js").await.unwrap();
    assert_eq!(badge, json!({"text": "Beta"}));
    assert_eq!(source.injections(), 1);
    assert_eq!(engine.cache_stats().data_entries, 2);
}

#[tokio::test]
async fn registry_takes_precedence_over_sources() {
    let source = MemorySource::new().with_file("card.json", r#"{"title": "from file"}"#);
    let mut engine = Engine::new();
    engine.register_data("card", json!({"title": "registered"}));
    let card = engine.load_data(&source, "card.json").await.unwrap();
    assert_eq!(card["title"], "registered");
    assert_eq!(source.fetches(), 0);

    engine.clear_data_cache();
    let card = engine.load_data(&source, "card.json").await.unwrap();
    assert_eq!(card["title"], "from file");
    engine.load_data(&source, "card.json").await.unwrap();
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn load_failures_are_typed() {
    let source = MemorySource::new()
        .with_file("empty.data.js", "// nothing here")
        .with_file("broken.json", "{");
    let mut engine = Engine::new();
    assert!(matches!(
        engine.load_data(&source, "empty.data.js").await,
        Err(LoadError::NotRegistered { .. })
    ));
    assert!(matches!(
        engine.load_data(&source, "broken.json").await,
        Err(LoadError::Json(_))
    ));
    assert!(matches!(
        engine.load_data(&source, "missing.json").await,
        Err(LoadError::NotFound(_))
    ));
    assert!(matches!(
        engine.load_data(&source, "thing.yaml").await,
        Err(LoadError::Unsupported(_))
    ));
}

#[tokio::test]
async fn failed_load_mounts_error_fragment() {
    let source = MemorySource::new();
    let mut doc = Document::new();
    let t = target(&mut doc);
    doc.set_text(t, "loading");
    let mut engine = Engine::new();
    engine.register("select", select_renderer());

    let err = engine
        .load_and_mount(&source, &mut doc, "select", "select.data.js", t)
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
    assert_eq!(doc.query_class(t, "render-error").len(), 1);
    assert!(doc.text_content(t).contains("Unable to load"));
}

#[tokio::test]
async fn mounted_components_are_live_widgets() {
    let source = MemorySource::new().with_file("select.data.js", SCRIPT);
    let mut doc = Document::new();
    let t = target(&mut doc);
    let mut rt = Runtime::new();
    rt.start(&mut doc);

    let mut engine = Engine::new();
    engine.register("select", select_renderer());
    engine
        .load_and_mount(&source, &mut doc, "select", "select.data.js", t)
        .await
        .unwrap();

    // The runtime picks up the inserted dropdown without registration.
    rt.observe(&mut doc);
    let label = doc.query_class(t, class::DROPDOWN_LABEL)[0];
    assert_eq!(doc.text_content(label), "Choose a size");

    let trigger = doc.query_class(t, class::DROPDOWN_TRIGGER)[0];
    rt.dispatch(&mut doc, InputEvent::Click { target: trigger });
    let medium = doc.query_class(t, class::DROPDOWN_ITEM)[1];
    rt.dispatch(&mut doc, InputEvent::Click { target: medium });
    assert_eq!(doc.text_content(label), "Medium");
    assert!(
        rt.drain_events()
            .iter()
            .any(|e| e.kind == EventKind::DropdownSelect && e.value.as_deref() == Some("m"))
    );
}

#[tokio::test]
async fn static_dir_source_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("vitrine-render-{}", std::process::id()));
    tokio::fs::create_dir_all(dir.join("data")).await.unwrap();
    tokio::fs::write(dir.join("data/select.data.js"), SCRIPT)
        .await
        .unwrap();
    tokio::fs::write(dir.join("data/note.json"), r#"{"text": "hi"}"#)
        .await
        .unwrap();

    let source = StaticDirSource::new(&dir);
    let mut engine = Engine::new();
    let select = engine.load_data(&source, "/data/select.data.js").await.unwrap();
    assert_eq!(select["options"].as_array().map(Vec::len), Some(2));
    let note = engine.load_data(&source, "data/note.json").await.unwrap();
    assert_eq!(note["text"], "hi");
    assert!(matches!(
        engine.load_data(&source, "data/absent.json").await,
        Err(LoadError::Io(_))
    ));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
