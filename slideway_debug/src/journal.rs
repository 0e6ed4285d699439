// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event journal.
//!
//! [`JournalSink`] implements [`TraceSink`] and keeps every event in arrival
//! order as a [`JournalEntry`]. The journal can be summarized with
//! [`JournalSink::stats`] or exported with [`chrome::export`](crate::chrome::export).

use slideway_core::trace::{
    IntentEvent, RejectReason, RejectedEvent, SettleCause, TraceSink, TransitionBeginEvent,
    TransitionSettledEvent,
};

/// One recorded event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalEntry {
    /// An intent reached the deck.
    Intent(IntentEvent),
    /// A request was dropped.
    Rejected(RejectedEvent),
    /// A transition started.
    Begin(TransitionBeginEvent),
    /// A transition settled.
    Settled(TransitionSettledEvent),
}

/// Counts over a journal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JournalStats {
    /// Intents received.
    pub intents: usize,
    /// Transitions started.
    pub transitions: usize,
    /// Requests dropped because a transition was running.
    pub busy: usize,
    /// Requests dropped for targeting the current slide.
    pub already_current: usize,
    /// Requests dropped for targeting outside the deck.
    pub out_of_range: usize,
    /// Transitions that settled by timeout.
    pub timed_out: usize,
}

/// A [`TraceSink`] that records events in memory.
#[derive(Debug, Default)]
pub struct JournalSink {
    entries: Vec<JournalEntry>,
}

impl JournalSink {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded entries in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Consumes the journal and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<JournalEntry> {
        self.entries
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Counts entries by kind.
    #[must_use]
    pub fn stats(&self) -> JournalStats {
        let mut stats = JournalStats::default();
        for entry in &self.entries {
            match entry {
                JournalEntry::Intent(_) => stats.intents += 1,
                JournalEntry::Begin(_) => stats.transitions += 1,
                JournalEntry::Rejected(e) => match e.reason {
                    RejectReason::Busy => stats.busy += 1,
                    RejectReason::AlreadyCurrent => stats.already_current += 1,
                    RejectReason::OutOfRange => stats.out_of_range += 1,
                },
                JournalEntry::Settled(e) => {
                    if e.cause == SettleCause::TimedOut {
                        stats.timed_out += 1;
                    }
                }
            }
        }
        stats
    }

    /// Indices the deck settled on, in order.
    pub fn visited(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            JournalEntry::Settled(e) => Some(e.index),
            _ => None,
        })
    }
}

impl TraceSink for JournalSink {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.entries.push(JournalEntry::Intent(*e));
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.entries.push(JournalEntry::Rejected(*e));
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.entries.push(JournalEntry::Begin(*e));
    }

    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        self.entries.push(JournalEntry::Settled(*e));
    }
}
