// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for deck navigation.
//!
//! This module provides a [`TraceSink`] trait with one method per navigation
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Rejected navigation is reported here and nowhere else: callers of the deck
//! never see an error for it.

use crate::input::{InputSource, NavIntent};
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a navigation request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// A transition was still running.
    Busy,
    /// The target is already the current slide.
    AlreadyCurrent,
    /// The target is outside the deck.
    OutOfRange,
}

/// What ended a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettleCause {
    /// The animator applied every change synchronously.
    Immediate,
    /// Every pending element reported completion.
    Completed,
    /// The settle deadline passed with completions outstanding.
    TimedOut,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when an input adapter's intent reaches the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentEvent {
    /// The intent.
    pub intent: NavIntent,
    /// Where it came from.
    pub source: InputSource,
    /// Current index when the intent arrived.
    pub current: usize,
    /// Host time of arrival.
    pub at: HostTime,
}

/// Emitted when a navigation request is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectedEvent {
    /// Requested index, if the request resolved to one.
    pub target: Option<usize>,
    /// Current index.
    pub current: usize,
    /// Why the request was dropped.
    pub reason: RejectReason,
    /// Host time of the request.
    pub at: HostTime,
}

/// Emitted when a transition starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionBeginEvent {
    /// Transition sequence number.
    pub generation: u32,
    /// Index before the transition.
    pub from: usize,
    /// Index after the transition.
    pub to: usize,
    /// Number of elements the animator is still working on.
    pub pending: u32,
    /// Host time the transition started.
    pub at: HostTime,
    /// Host time after which the deck unlocks regardless.
    pub deadline: HostTime,
}

/// Emitted when a transition ends and the deck accepts input again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSettledEvent {
    /// Transition sequence number.
    pub generation: u32,
    /// Index the deck settled on.
    pub index: usize,
    /// What ended the transition.
    pub cause: SettleCause,
    /// Completions still outstanding (non-zero only for timeouts).
    pub outstanding: u32,
    /// Host time the deck unlocked.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a deck.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an intent reaches the deck.
    fn on_intent(&mut self, e: &IntentEvent) {
        _ = e;
    }

    /// Called when a request is dropped.
    fn on_rejected(&mut self, e: &RejectedEvent) {
        _ = e;
    }

    /// Called when a transition starts.
    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        _ = e;
    }

    /// Called when a transition settles.
    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for alloc::boxed::Box<S> {
    fn on_intent(&mut self, e: &IntentEvent) {
        (**self).on_intent(e);
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        (**self).on_rejected(e);
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        (**self).on_transition_begin(e);
    }

    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        (**self).on_transition_settled(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`IntentEvent`].
    #[inline]
    pub fn intent(&mut self, e: &IntentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_intent(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectedEvent`].
    #[inline]
    pub fn rejected(&mut self, e: &RejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionBeginEvent`].
    #[inline]
    pub fn transition_begin(&mut self, e: &TransitionBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionSettledEvent`].
    #[inline]
    pub fn transition_settled(&mut self, e: &TransitionSettledEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition_settled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rejection() -> RejectedEvent {
        RejectedEvent {
            target: Some(4),
            current: 3,
            reason: RejectReason::OutOfRange,
            at: HostTime(1_000),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_rejected(&sample_rejection());
        sink.on_transition_settled(&TransitionSettledEvent {
            generation: 1,
            index: 0,
            cause: SettleCause::Immediate,
            outstanding: 0,
            at: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.rejected(&sample_rejection());
        tracer.intent(&IntentEvent {
            intent: NavIntent::Next,
            source: InputSource::Keyboard,
            current: 0,
            at: HostTime(0),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            reasons: Vec<RejectReason>,
        }
        impl TraceSink for RecordingSink {
            fn on_rejected(&mut self, e: &RejectedEvent) {
                self.reasons.push(e.reason);
            }
        }

        let mut sink = RecordingSink {
            reasons: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.rejected(&sample_rejection());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.reasons, &[RejectReason::OutOfRange]);
    }
}
