// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds.

use std::io::Write;

use slideway_core::time::HostTime;
use slideway_core::trace::{
    IntentEvent, RejectReason, RejectedEvent, SettleCause, TraceSink, TransitionBeginEvent,
    TransitionSettledEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    intents: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("intents", &self.intents)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            intents: true,
        }
    }

    /// Skips [`IntentEvent`]s, which are noisy with wheel input.
    #[must_use]
    pub fn without_intents(mut self) -> Self {
        self.intents = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.micros() as f64 / 1000.0
}

fn reason_name(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::Busy => "busy",
        RejectReason::AlreadyCurrent => "current",
        RejectReason::OutOfRange => "range",
    }
}

fn cause_name(cause: SettleCause) -> &'static str {
    match cause {
        SettleCause::Immediate => "immediate",
        SettleCause::Completed => "completed",
        SettleCause::TimedOut => "TIMEOUT",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_intent(&mut self, e: &IntentEvent) {
        if !self.intents {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[intent] {:?} from {:?} at={} t={:.1}ms",
            e.intent,
            e.source,
            e.current,
            ms(e.at),
        );
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        let target = e.target.map_or_else(|| "-".to_owned(), |t| t.to_string());
        let _ = writeln!(
            self.writer,
            "[drop] target={target} at={} reason={} t={:.1}ms",
            e.current,
            reason_name(e.reason),
            ms(e.at),
        );
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[begin] gen={} {}->{} pending={} t={:.1}ms deadline={:.1}ms",
            e.generation,
            e.from,
            e.to,
            e.pending,
            ms(e.at),
            ms(e.deadline),
        );
    }

    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        let _ = writeln!(
            self.writer,
            "[settle] gen={} index={} cause={} outstanding={} t={:.1}ms",
            e.generation,
            e.index,
            cause_name(e.cause),
            e.outstanding,
            ms(e.at),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideway_core::input::{InputSource, NavIntent};

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_intent(&IntentEvent {
            intent: NavIntent::Next,
            source: InputSource::Keyboard,
            current: 0,
            at: HostTime(1_000),
        });
        sink.on_transition_begin(&TransitionBeginEvent {
            generation: 1,
            from: 0,
            to: 1,
            pending: 5,
            at: HostTime(1_000),
            deadline: HostTime(951_000),
        });
        sink.on_transition_settled(&TransitionSettledEvent {
            generation: 1,
            index: 1,
            cause: SettleCause::TimedOut,
            outstanding: 2,
            at: HostTime(951_000),
        });
        let out = output(sink);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3, "got: {out}");
        let intent = "[intent] Next from Keyboard";
        assert!(lines[0].starts_with(intent), "got: {out}");
        assert!(lines[1].contains("0->1 pending=5"), "got: {out}");
        assert!(lines[2].contains("cause=TIMEOUT"), "got: {out}");
        assert!(lines[2].contains("t=951.0ms"), "got: {out}");
    }

    #[test]
    fn rejection_without_target() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).without_intents();
        sink.on_intent(&IntentEvent {
            intent: NavIntent::Previous,
            source: InputSource::Wheel,
            current: 0,
            at: HostTime(0),
        });
        sink.on_rejected(&RejectedEvent {
            target: None,
            current: 0,
            reason: RejectReason::OutOfRange,
            at: HostTime(0),
        });
        let out = output(sink);
        assert_eq!(out, "[drop] target=- at=0 reason=range t=0.0ms\n");
    }
}
