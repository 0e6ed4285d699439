// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use alloc::format;
use alloc::string::String;

use slideway_core::trace::{
    IntentEvent, RejectedEvent, TraceSink, TransitionBeginEvent, TransitionSettledEvent,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that writes one `console.debug` line per event.
///
/// Intents are only logged when `verbose` is set; they are frequent with
/// wheel input.
#[derive(Clone, Debug)]
pub struct ConsoleSink {
    /// Prefix for every line, e.g. the deck's name.
    pub label: String,
    /// Also log every intent.
    pub verbose: bool,
}

impl ConsoleSink {
    /// Creates a sink with the given prefix that skips intents.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verbose: false,
        }
    }

    fn log(&self, line: &str) {
        console::debug_1(&JsValue::from_str(&format!("[{}] {line}", self.label)));
    }
}

impl TraceSink for ConsoleSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        if self.verbose {
            self.log(&format!(
                "intent {:?} from {:?} at slide {}",
                e.intent, e.source, e.current
            ));
        }
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.log(&format!(
            "dropped {:?} at slide {}: {:?}",
            e.target, e.current, e.reason
        ));
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.log(&format!(
            "transition #{} {} -> {} ({} pending)",
            e.generation, e.from, e.to, e.pending
        ));
    }

    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        let at = e.at.micros();
        self.log(&format!(
            "transition #{} settled on {} ({:?}, {} outstanding, t={at}µs)",
            e.generation, e.index, e.cause, e.outstanding
        ));
    }
}
