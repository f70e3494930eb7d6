// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted session against a page with a dropdown, tabs, and a tooltip.
//!
//! Widget events are printed as they are drained; runtime logging goes to
//! stderr at debug level.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example dropdown_session`

use std::time::Duration;

use simplelog::{Config, LevelFilter, SimpleLogger};
use vitrine_dom::{Document, NodeId};
use vitrine_widgets::markers::class;
use vitrine_widgets::{InputEvent, Runtime};

const PAGE: &str = r#"
<div class="dropdown" data-placeholder="Pick a fruit">
  <button class="dropdown-trigger"><span class="dropdown-label"></span></button>
  <ul class="dropdown-menu" hidden>
    <li class="dropdown-item" data-value="apple">Apple</li>
    <li class="dropdown-item" data-value="pear">Pear</li>
    <li class="dropdown-item is-disabled" data-value="plum">Plum</li>
  </ul>
</div>
<div class="tabs" data-tab-group="intro">
  <button class="tab is-active" data-tab-target="one">One</button>
  <button class="tab" data-tab-target="two">Two</button>
</div>
<section data-tab-content="intro">
  <div class="tab-panel" id="one">First</div>
  <div class="tab-panel" id="two">Second</div>
</section>
<span class="has-tooltip" data-tooltip="Saved 2 minutes ago">Status</span>
"#;

fn first(doc: &Document, cls: &str) -> NodeId {
    doc.query_class(doc.root(), cls)[0]
}

fn report(step: &str, rt: &mut Runtime) {
    println!("{step}");
    for event in rt.drain_events() {
        println!("  {event:?}");
    }
}

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());

    let mut doc = Document::new();
    let root = doc.root();
    if let Err(err) = doc.set_inner_markup(root, PAGE) {
        eprintln!("bad page markup: {err}");
        return;
    }
    let mut rt = Runtime::new();
    rt.start(&mut doc);
    report("start", &mut rt);

    let trigger = first(&doc, class::DROPDOWN_TRIGGER);
    rt.dispatch(&mut doc, InputEvent::Click { target: trigger });
    report("click trigger", &mut rt);

    for key in ["ArrowDown", "ArrowDown", "Enter"] {
        rt.dispatch(
            &mut doc,
            InputEvent::KeyDown {
                target: trigger,
                key: key.to_owned(),
            },
        );
    }
    report("ArrowDown, ArrowDown, Enter", &mut rt);
    println!(
        "  label now {:?}",
        doc.text_content(first(&doc, class::DROPDOWN_LABEL))
    );

    let second_tab = doc.query_class(root, class::TAB)[1];
    rt.dispatch(&mut doc, InputEvent::Click { target: second_tab });
    report("click second tab", &mut rt);

    let status = first(&doc, class::HAS_TOOLTIP);
    rt.pointer_move(&mut doc, status);
    rt.advance(&mut doc, Duration::from_millis(250));
    report("hover status for 250ms", &mut rt);
    if let Some(surface) = rt.tooltip().surface() {
        println!("  tooltip at {:?}", doc.bounds(surface));
    }
    rt.pointer_exit(&mut doc);
    rt.advance(&mut doc, Duration::from_millis(500));
    report("leave", &mut rt);
}
