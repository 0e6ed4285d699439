// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two decks on one page: a horizontal slide deck and a vertical report.
//!
//! Both are the same controller mounted with different presets. The slide
//! deck takes keyboard, wheel, swipe and clicks; the report leaves the
//! keyboard to the slide deck. Trace lines go to the browser console.
//!
//! Build with: `wasm-pack build --target web demos/web_deck`
//! Then serve `demos/web_deck/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;

use slideway_backend_web::{ConsoleSink, Selectors, mount};
use slideway_core::config::{DeckConfig, InputSet};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

const SLIDES: [(&str, &str); 4] = [
    ("Slideway", "One controller, many decks."),
    ("One at a time", "Input mid-transition is dropped."),
    ("Counted completion", "Unlocks once every element settles."),
    ("Safety net", "A timeout covers lost transitions."),
];

const REPORT: [(&str, &str); 3] = [
    ("Q3 summary", "Swipe up or scroll to continue."),
    ("Highlights", "Same controller, vertical preset."),
    ("Next steps", "The last slide relabels the next control."),
];

const STYLE: &str = "
.deck, .report { position: relative; overflow: hidden; width: 640px; height: 360px;
  margin: 24px auto; border-radius: 12px; background: #10121f; color: #eff8ff;
  font: 16px/1.4 system-ui, sans-serif; touch-action: none; }
.slide { position: absolute; inset: 0; padding: 48px; box-sizing: border-box;
  transition-property: transform, opacity; }
.slide.is-active { transform: none; opacity: 1; }
.deck .slide.is-prev { transform: translateX(-100%); opacity: 0; }
.deck .slide.is-upcoming { transform: translateX(100%); opacity: 0; }
.report .slide.is-prev { transform: translateY(-100%); opacity: 0; }
.report .slide.is-upcoming { transform: translateY(100%); opacity: 0; }
.slide-dots { position: absolute; bottom: 16px; left: 0; right: 0; display: flex;
  gap: 8px; justify-content: center; }
.slide-dot { width: 10px; height: 10px; padding: 0; border: 0; border-radius: 50%;
  background: rgba(239,248,255,0.35); transition-property: background, transform; }
.slide-dot.is-active { background: #22b4b9; transform: scale(1.3); }
.slide-prev, .slide-next { position: absolute; bottom: 12px; border: 0;
  border-radius: 999px; padding: 6px 14px; background: #0f5d71; color: #eff8ff; }
.slide-prev { left: 12px; } .slide-next { right: 12px; }
.is-disabled { opacity: 0.4; cursor: default; }
";

/// Entry point for the web deck demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let style = element(&document, "style")?;
    style.set_text_content(Some(STYLE));
    body.append_child(&style)?;

    let deck_root = build_deck(&document, "deck", &SLIDES)?;
    body.append_child(&deck_root)?;
    let report_root = build_deck(&document, "report", &REPORT)?;
    body.append_child(&report_root)?;

    let deck = mount(&deck_root, DeckConfig::slide_deck(), &Selectors::DEFAULT)?;
    deck.set_trace_sink(Some(Box::new(ConsoleSink::new("deck"))));

    let report_config = DeckConfig {
        inputs: InputSet {
            keyboard: false,
            ..InputSet::ALL
        },
        ..DeckConfig::report()
    };
    let report = mount(&report_root, report_config, &Selectors::DEFAULT)?;
    report.set_trace_sink(Some(Box::new(ConsoleSink::new("report"))));

    // Both decks live as long as the page.
    core::mem::forget(deck);
    core::mem::forget(report);

    Ok(())
}

/// Builds a deck root with slides, an empty dot container and controls.
fn build_deck(
    doc: &Document,
    class: &str,
    slides: &[(&str, &str)],
) -> Result<HtmlElement, JsValue> {
    let root = element(doc, "section")?;
    root.set_class_name(class);
    root.set_attribute("aria-roledescription", "carousel")?;

    for (i, (title, body)) in slides.iter().enumerate() {
        let slide = element(doc, "article")?;
        slide.set_class_name("slide");
        slide.set_attribute("aria-label", &format!("{} of {}", i + 1, slides.len()))?;
        let heading = element(doc, "h2")?;
        heading.set_text_content(Some(title));
        let text = element(doc, "p")?;
        text.set_text_content(Some(body));
        slide.append_child(&heading)?;
        slide.append_child(&text)?;
        root.append_child(&slide)?;
    }

    let dots = element(doc, "nav")?;
    dots.set_class_name("slide-dots");
    root.append_child(&dots)?;

    for class in ["slide-prev", "slide-next"] {
        let button = element(doc, "button")?;
        button.set_class_name(class);
        button.set_attribute("type", "button")?;
        root.append_child(&button)?;
    }

    Ok(root)
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}
