// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated deck session that exercises the tracing and diagnostics pipeline.
//!
//! Drives a five-slide deck through a scripted burst of input with a
//! simulated animator whose completions arrive some time after each request.
//! One transition loses a completion and unlocks by timeout. Events go to
//! both a [`PrettyPrintSink`](slideway_debug::pretty::PrettyPrintSink) and a
//! [`JournalSink`](slideway_debug::journal::JournalSink), and the journal is
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use slideway_core::animator::{
    AnimationRequest, AnimationTarget, Animator, Completion, CompletionToken, SlideRole,
};
use slideway_core::config::DeckConfig;
use slideway_core::deck::SlideDeck;
use slideway_core::input::{InputSource, NavIntent};
use slideway_core::time::{Duration, HostTime};
use slideway_core::trace::{
    IntentEvent, RejectedEvent, TraceSink, Tracer, TransitionBeginEvent, TransitionSettledEvent,
};

use slideway_debug::journal::JournalSink;
use slideway_debug::pretty::PrettyPrintSink;

const SLIDE_COUNT: usize = 5;
/// Simulation step.
const STEP: Duration = Duration::from_millis(50);
/// Transition whose incoming slide never reports completion.
const LOSSY_GENERATION: u32 = 3;

/// Scripted input: (time in ms, intent, source).
const SCRIPT: [(u64, NavIntent, InputSource); 10] = [
    (0, NavIntent::Next, InputSource::Keyboard),
    (100, NavIntent::Next, InputSource::Wheel),
    (150, NavIntent::Next, InputSource::Wheel),
    (1_000, NavIntent::GoTo(3), InputSource::Dot),
    (1_900, NavIntent::Previous, InputSource::Touch),
    (2_000, NavIntent::Previous, InputSource::Touch),
    (3_200, NavIntent::Last, InputSource::Keyboard),
    (4_200, NavIntent::Next, InputSource::Control),
    (4_300, NavIntent::GoTo(4), InputSource::Dot),
    (4_400, NavIntent::First, InputSource::Keyboard),
];

/// Animator whose timed requests finish after their total duration.
#[derive(Debug, Default)]
struct SimAnimator {
    /// Pending completions: (due time, token).
    inflight: Vec<(HostTime, CompletionToken)>,
    /// Time of the request being issued.
    now: HostTime,
}

impl Animator for SimAnimator {
    fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion {
        if request.timing.is_instant() {
            return Completion::Immediate;
        }
        let lost = request.token.generation == LOSSY_GENERATION
            && matches!(
                request.target,
                AnimationTarget::Slide {
                    role: SlideRole::Active,
                    ..
                }
            );
        if !lost {
            self.inflight
                .push((self.now + request.timing.total(), request.token));
        }
        Completion::Pending
    }
}

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_intent(&mut self, e: &IntentEvent) {
        self.a.on_intent(e);
        self.b.on_intent(e);
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.a.on_rejected(e);
        self.b.on_rejected(e);
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.a.on_transition_begin(e);
        self.b.on_transition_begin(e);
    }

    fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
        self.a.on_transition_settled(e);
        self.b.on_transition_settled(e);
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut journal = JournalSink::new();

    // -- deck --------------------------------------------------------------
    let animator = SimAnimator::default();
    let mut deck = SlideDeck::new(SLIDE_COUNT, DeckConfig::slide_deck(), animator)
        .expect("deck has slides");

    // -- simulated loop ----------------------------------------------------
    let end = HostTime(0) + Duration::from_millis(6_000);
    let mut now = HostTime(0);
    let mut script = SCRIPT.iter().peekable();
    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut journal,
        };
        let mut tracer = Tracer::new(&mut tee);

        while now <= end {
            // 1. Input due by now.
            while let Some(&&(at_ms, intent, source)) = script.peek() {
                if HostTime(0) + Duration::from_millis(at_ms) > now {
                    break;
                }
                script.next();
                deck.animator_mut().now = now;
                let _ = deck.dispatch(intent, source, now, &mut tracer);
            }

            // 2. Completions due by now.
            let inflight = std::mem::take(&mut deck.animator_mut().inflight);
            let (due, later): (Vec<_>, Vec<_>) =
                inflight.into_iter().partition(|(at, _)| *at <= now);
            deck.animator_mut().inflight = later;
            for (_, token) in due {
                deck.complete_traced(token, now, &mut tracer);
            }

            // 3. Settle timer.
            deck.poll_traced(now, &mut tracer);

            now = now + STEP;
        }
    }

    let stats = journal.stats();
    println!(
        "{} intents, {} transitions, {} dropped while busy, {} timed out; final slide {}",
        stats.intents,
        stats.transitions,
        stats.busy,
        stats.timed_out,
        deck.current_index(),
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "deck_trace.json";
    let file = File::create(path).expect("failed to create deck_trace.json");
    let mut writer = BufWriter::new(file);
    slideway_debug::chrome::export(journal.entries(), 0, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} events)", journal.entries().len());
}
