// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide deck controller.
//!
//! [`SlideDeck`] keeps exactly one slide current among an ordered, fixed set
//! and serializes transitions between them:
//!
//! ```text
//!            go_to (accepted)
//!   Idle ──────────────────────► Transitioning
//!    ▲                                │
//!    └──── last completion ───────────┤
//!    └──── poll() past deadline ──────┘
//! ```
//!
//! While transitioning, every navigation request is dropped (not queued).
//! A transition ends when every element the animator reported as
//! [`Completion::Pending`] has been passed back through
//! [`complete`](SlideDeck::complete), or when [`poll`](SlideDeck::poll) is
//! called at or after the settle deadline, whichever comes first.
//!
//! Slide roles, dot state and control state are derived from the current
//! index on demand; the deck stores only the index and the lock.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::animator::{
    AnimationRequest, AnimationTarget, Animator, Completion, CompletionToken, Control,
    ControlState, SlideRole, Timing,
};
use crate::config::DeckConfig;
use crate::input::{InputSource, NavIntent};
use crate::time::HostTime;
use crate::trace::{
    IntentEvent, RejectReason, RejectedEvent, SettleCause, Tracer, TransitionBeginEvent,
    TransitionSettledEvent,
};

/// Error constructing a [`SlideDeck`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckError {
    /// The deck has no slides.
    Empty,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("a slide deck needs at least one slide"),
        }
    }
}

impl core::error::Error for DeckError {}

/// Whether the deck accepts navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeckState {
    /// Accepting navigation.
    Idle,
    /// A transition is running; navigation is dropped.
    Transitioning,
}

/// Outcome of a navigation request.
///
/// Callers are free to ignore it; a rejected request simply changes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// A transition started.
    Accepted {
        /// Index before the transition.
        from: usize,
        /// Index after the transition.
        to: usize,
    },
    /// The request was dropped.
    Rejected(RejectReason),
}

impl Navigation {
    /// Returns `true` if a transition started.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// A slide and its derived role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slide {
    /// Position in the deck.
    pub index: usize,
    /// Role relative to the current slide.
    pub role: SlideRole,
}

/// A navigation dot and its derived state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavDot {
    /// Index of the slide the dot stands for.
    pub index: usize,
    /// Whether that slide is current.
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Transitioning {
        /// Elements still owed a completion.
        pending: u32,
        /// Unlock time if completions never arrive.
        deadline: HostTime,
    },
}

/// Slide deck controller.
///
/// Owns the current index, the transition lock, the configuration and the
/// [`Animator`]. All state changes go through the navigation methods
/// ([`go_to`](Self::go_to), [`next`](Self::next),
/// [`previous`](Self::previous), [`first`](Self::first),
/// [`last`](Self::last), [`dispatch`](Self::dispatch)) and the settle
/// methods ([`complete`](Self::complete), [`poll`](Self::poll)).
///
/// Every method that can emit trace events has a `_traced` variant taking a
/// [`Tracer`]; the plain variants trace nothing.
pub struct SlideDeck<A> {
    len: usize,
    current: usize,
    phase: Phase,
    generation: u32,
    /// Per-slot flag: `true` while the slot owes a completion.
    outstanding: Vec<bool>,
    config: DeckConfig,
    animator: A,
}

impl<A> fmt::Debug for SlideDeck<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideDeck")
            .field("len", &self.len)
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("outstanding", &self.outstanding)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A: Animator> SlideDeck<A> {
    /// Creates a deck of `slide_count` slides and paints its initial state.
    ///
    /// The initial index is `config.initial_index`, clamped to the last
    /// slide. The initial paint uses instant timing and does not lock the
    /// deck.
    pub fn new(slide_count: usize, config: DeckConfig, animator: A) -> Result<Self, DeckError> {
        if slide_count == 0 {
            return Err(DeckError::Empty);
        }
        let mut deck = Self {
            len: slide_count,
            current: config.initial_index.min(slide_count - 1),
            phase: Phase::Idle,
            generation: 0,
            outstanding: vec![false; slot_count(slide_count)],
            config,
            animator,
        };
        // Nothing is awaited for the initial paint; late tokens for
        // generation 0 are ignored because the deck is idle.
        let _ = deck.paint(None);
        deck.outstanding.fill(false);
        Ok(deck)
    }

    // -- queries -----------------------------------------------------------

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a deck has at least one slide.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the current slide.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Whether the deck accepts navigation.
    #[must_use]
    pub fn state(&self) -> DeckState {
        match self.phase {
            Phase::Idle => DeckState::Idle,
            Phase::Transitioning { .. } => DeckState::Transitioning,
        }
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Sequence number of the latest accepted transition (0 before any).
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of completions the running transition still waits for.
    #[must_use]
    pub fn pending(&self) -> u32 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Transitioning { pending, .. } => pending,
        }
    }

    /// Host time at which the running transition unlocks regardless of
    /// completions.
    #[must_use]
    pub fn settle_deadline(&self) -> Option<HostTime> {
        match self.phase {
            Phase::Idle => None,
            Phase::Transitioning { deadline, .. } => Some(deadline),
        }
    }

    /// Role of slide `index`, or `None` if out of range.
    #[must_use]
    pub fn role_of(&self, index: usize) -> Option<SlideRole> {
        (index < self.len).then(|| SlideRole::classify(index, self.current))
    }

    /// All slides in order, with their roles.
    pub fn slides(&self) -> impl ExactSizeIterator<Item = Slide> + '_ {
        (0..self.len).map(|index| Slide {
            index,
            role: SlideRole::classify(index, self.current),
        })
    }

    /// All navigation dots in order.
    pub fn nav_dots(&self) -> impl ExactSizeIterator<Item = NavDot> + '_ {
        (0..self.len).map(|index| NavDot {
            index,
            is_active: index == self.current,
        })
    }

    /// State of the "previous" control.
    #[must_use]
    pub fn previous_control(&self) -> ControlState<'static> {
        control_state(&self.config, Control::Previous, self.current, self.len)
    }

    /// State of the "next" control.
    #[must_use]
    pub fn next_control(&self) -> ControlState<'static> {
        control_state(&self.config, Control::Next, self.current, self.len)
    }

    /// Position through the deck, from `0.0` on the first slide to `1.0` on
    /// the last. A single-slide deck reports `1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.len == 1 {
            1.0
        } else {
            self.current as f64 / (self.len - 1) as f64
        }
    }

    /// The deck's configuration.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// The deck's animator.
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access to the deck's animator.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    // -- navigation --------------------------------------------------------

    /// Starts a transition to slide `target`.
    ///
    /// Dropped while transitioning, when `target` is already current, or
    /// when it is out of range.
    pub fn go_to(&mut self, target: usize, now: HostTime) -> Navigation {
        self.go_to_traced(target, now, &mut Tracer::none())
    }

    /// [`go_to`](Self::go_to) with tracing.
    pub fn go_to_traced(
        &mut self,
        target: usize,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Navigation {
        self.navigate(Some(target), now, tracer)
    }

    /// Moves to the following slide; dropped on the last slide.
    pub fn next(&mut self, now: HostTime) -> Navigation {
        self.dispatch(
            NavIntent::Next,
            InputSource::Programmatic,
            now,
            &mut Tracer::none(),
        )
    }

    /// Moves to the preceding slide; dropped on the first slide.
    pub fn previous(&mut self, now: HostTime) -> Navigation {
        self.dispatch(
            NavIntent::Previous,
            InputSource::Programmatic,
            now,
            &mut Tracer::none(),
        )
    }

    /// Moves to the first slide.
    pub fn first(&mut self, now: HostTime) -> Navigation {
        self.dispatch(
            NavIntent::First,
            InputSource::Programmatic,
            now,
            &mut Tracer::none(),
        )
    }

    /// Moves to the last slide.
    pub fn last(&mut self, now: HostTime) -> Navigation {
        self.dispatch(
            NavIntent::Last,
            InputSource::Programmatic,
            now,
            &mut Tracer::none(),
        )
    }

    /// Applies an intent from an input adapter.
    pub fn dispatch(
        &mut self,
        intent: NavIntent,
        source: InputSource,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Navigation {
        tracer.intent(&IntentEvent {
            intent,
            source,
            current: self.current,
            at: now,
        });
        let target = match intent {
            NavIntent::Next => self.current.checked_add(1),
            NavIntent::Previous => self.current.checked_sub(1),
            NavIntent::First => Some(0),
            NavIntent::Last => Some(self.len - 1),
            NavIntent::GoTo(index) => Some(index),
        };
        self.navigate(target, now, tracer)
    }

    fn navigate(
        &mut self,
        target: Option<usize>,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> Navigation {
        let from = self.current;
        let accepted = if self.is_transitioning() {
            Err(RejectReason::Busy)
        } else {
            match target {
                Some(t) if t == from => Err(RejectReason::AlreadyCurrent),
                Some(t) if t < self.len => Ok(t),
                _ => Err(RejectReason::OutOfRange),
            }
        };
        let to = match accepted {
            Ok(to) => to,
            Err(reason) => {
                tracer.rejected(&RejectedEvent {
                    target,
                    current: from,
                    reason,
                    at: now,
                });
                return Navigation::Rejected(reason);
            }
        };

        self.generation = self.generation.wrapping_add(1);
        self.current = to;
        self.outstanding.fill(false);
        let pending = self.paint(Some(from));
        let deadline = now.saturating_add(self.config.settle_timeout);

        tracer.transition_begin(&TransitionBeginEvent {
            generation: self.generation,
            from,
            to,
            pending,
            at: now,
            deadline,
        });

        if pending == 0 {
            self.settle(SettleCause::Immediate, now, tracer);
        } else {
            self.phase = Phase::Transitioning { pending, deadline };
        }
        Navigation::Accepted { from, to }
    }

    // -- settling ----------------------------------------------------------

    /// Records that the element behind `token` finished animating.
    ///
    /// Returns `true` if this was the last outstanding completion and the
    /// deck is idle again. Tokens from earlier transitions, unknown slots,
    /// and repeated tokens are ignored.
    pub fn complete(&mut self, token: CompletionToken, now: HostTime) -> bool {
        self.complete_traced(token, now, &mut Tracer::none())
    }

    /// [`complete`](Self::complete) with tracing.
    pub fn complete_traced(
        &mut self,
        token: CompletionToken,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if token.generation != self.generation {
            return false;
        }
        let Phase::Transitioning { pending, .. } = &mut self.phase else {
            return false;
        };
        let Some(owed) = self.outstanding.get_mut(token.slot as usize) else {
            return false;
        };
        if !*owed {
            return false;
        }
        *owed = false;
        *pending -= 1;
        if *pending > 0 {
            return false;
        }
        self.settle(SettleCause::Completed, now, tracer);
        true
    }

    /// Unlocks the deck if the running transition is past its deadline.
    ///
    /// Returns `true` if the deck was unlocked by this call.
    pub fn poll(&mut self, now: HostTime) -> bool {
        self.poll_traced(now, &mut Tracer::none())
    }

    /// [`poll`](Self::poll) with tracing.
    pub fn poll_traced(&mut self, now: HostTime, tracer: &mut Tracer<'_>) -> bool {
        match self.phase {
            Phase::Transitioning { deadline, .. } if now >= deadline => {
                self.settle(SettleCause::TimedOut, now, tracer);
                true
            }
            _ => false,
        }
    }

    fn settle(&mut self, cause: SettleCause, now: HostTime, tracer: &mut Tracer<'_>) {
        let outstanding = self.pending();
        self.phase = Phase::Idle;
        self.outstanding.fill(false);
        tracer.transition_settled(&TransitionSettledEvent {
            generation: self.generation,
            index: self.current,
            cause,
            outstanding,
            at: now,
        });
    }

    // -- painting ----------------------------------------------------------

    /// Requests the visual state for every slide, dot and control.
    ///
    /// Elements whose state did not change since `from` get instant timing,
    /// so only the elements that actually move are awaited. With no `from`
    /// everything is painted instantly. Returns the number of pending
    /// completions.
    fn paint(&mut self, from: Option<usize>) -> u32 {
        let transition = self.config.transition;
        let current = self.current;
        let mut pending = 0;

        for index in 0..self.len {
            let role = SlideRole::classify(index, current);
            let changed = from.is_some_and(|f| SlideRole::classify(index, f) != role);
            let timing = match (changed, role) {
                (false, _) => Timing::INSTANT,
                (true, SlideRole::Active) => transition.entering(),
                (true, _) => transition.leaving(),
            };
            pending += self.request(index, AnimationTarget::Slide { index, role }, timing);
        }

        for index in 0..self.len {
            let active = index == current;
            let changed = from.is_some_and(|f| (index == f) != active);
            let timing = if changed {
                transition.indicator()
            } else {
                Timing::INSTANT
            };
            let target = AnimationTarget::Dot { index, active };
            pending += self.request(self.len + index, target, timing);
        }

        for (offset, control) in [Control::Previous, Control::Next].into_iter().enumerate() {
            let state = control_state(&self.config, control, current, self.len);
            let was = from.map(|f| control_state(&self.config, control, f, self.len));
            let changed = was.is_some_and(|was| was != state);
            let timing = if changed {
                transition.indicator()
            } else {
                Timing::INSTANT
            };
            pending += self.request(
                2 * self.len + offset,
                AnimationTarget::Control { control, state },
                timing,
            );
        }

        pending
    }

    fn request(&mut self, slot: usize, target: AnimationTarget<'_>, timing: Timing) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "slot count is bounded by the number of DOM elements"
        )]
        let token = CompletionToken {
            generation: self.generation,
            slot: slot as u32,
        };
        let request = AnimationRequest {
            target,
            timing,
            token,
        };
        match self.animator.animate(&request) {
            Completion::Immediate => 0,
            Completion::Pending => {
                self.outstanding[slot] = true;
                1
            }
        }
    }
}

/// Slides, then dots, then the two controls.
const fn slot_count(len: usize) -> usize {
    2 * len + 2
}

fn control_state(
    config: &DeckConfig,
    control: Control,
    current: usize,
    len: usize,
) -> ControlState<'static> {
    let labels = &config.labels;
    match control {
        Control::Previous => ControlState {
            actionable: current > 0,
            label: labels.previous,
        },
        Control::Next => {
            let at_end = current + 1 >= len;
            ControlState {
                actionable: !at_end,
                label: match labels.finish {
                    Some(finish) if at_end => finish,
                    _ => labels.next,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::InstantAnimator;
    use crate::input::{SwipeConfig, SwipeTracker};
    use crate::time::Duration;
    use kurbo::Point;

    /// What the test animator saw for one request.
    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Seen {
        Slide(usize, SlideRole),
        Dot(usize, bool),
        Control(Control, bool),
    }

    /// Answers `Pending` for timed requests and records everything.
    #[derive(Debug, Default)]
    struct RecordingAnimator {
        seen: Vec<(Seen, Timing, CompletionToken, Completion)>,
    }

    impl RecordingAnimator {
        fn pending_tokens(&self) -> Vec<CompletionToken> {
            self.seen
                .iter()
                .filter(|(.., c)| *c == Completion::Pending)
                .map(|(_, _, token, _)| *token)
                .collect()
        }
    }

    impl Animator for RecordingAnimator {
        fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion {
            let seen = match request.target {
                AnimationTarget::Slide { index, role } => Seen::Slide(index, role),
                AnimationTarget::Dot { index, active } => Seen::Dot(index, active),
                AnimationTarget::Control { control, state } => {
                    Seen::Control(control, state.actionable)
                }
            };
            let completion = if request.timing.is_instant() {
                Completion::Immediate
            } else {
                Completion::Pending
            };
            self.seen.push((seen, request.timing, request.token, completion));
            completion
        }
    }

    fn deck(len: usize) -> SlideDeck<RecordingAnimator> {
        SlideDeck::new(len, DeckConfig::slide_deck(), RecordingAnimator::default())
            .expect("non-empty deck")
    }

    /// Reports every pending token so the running transition settles.
    fn finish(deck: &mut SlideDeck<RecordingAnimator>, now: HostTime) {
        let tokens = deck.animator().pending_tokens();
        for token in tokens {
            deck.complete(token, now);
        }
        deck.animator_mut().seen.clear();
        assert_eq!(deck.state(), DeckState::Idle, "all completions reported");
    }

    fn active_count(deck: &SlideDeck<RecordingAnimator>) -> usize {
        deck.slides().filter(|s| s.role == SlideRole::Active).count()
    }

    #[test]
    fn empty_deck_is_an_error() {
        let err = SlideDeck::new(0, DeckConfig::default(), InstantAnimator).unwrap_err();
        assert_eq!(err, DeckError::Empty);
    }

    #[test]
    fn initial_paint_is_instant_and_unlocked() {
        let d = deck(4);
        assert_eq!(d.current_index(), 0);
        assert_eq!(d.state(), DeckState::Idle);
        // 4 slides + 4 dots + 2 controls.
        assert_eq!(d.animator().seen.len(), 10);
        assert!(d.animator().seen.iter().all(|(_, t, ..)| t.is_instant()));
        assert!(!d.previous_control().actionable);
        assert!(d.next_control().actionable);
    }

    #[test]
    fn initial_index_is_clamped() {
        let config = DeckConfig {
            initial_index: 9,
            ..DeckConfig::slide_deck()
        };
        let d = SlideDeck::new(3, config, InstantAnimator).unwrap();
        assert_eq!(d.current_index(), 2);
    }

    #[test]
    fn go_to_settles_on_target_with_one_active_slide() {
        for target in 1..5 {
            let mut d = deck(5);
            let nav = d.go_to(target, HostTime(0));
            assert_eq!(
                nav,
                Navigation::Accepted {
                    from: 0,
                    to: target
                }
            );
            assert!(d.is_transitioning());
            finish(&mut d, HostTime(10));
            assert_eq!(d.current_index(), target);
            assert_eq!(active_count(&d), 1);
            assert_eq!(d.role_of(target), Some(SlideRole::Active));
        }
    }

    #[test]
    fn roles_are_derived_from_current() {
        let mut d = deck(4);
        let _ = d.go_to(2, HostTime(0));
        let roles: Vec<_> = d.slides().map(|s| s.role).collect();
        assert_eq!(
            roles,
            [
                SlideRole::Prev,
                SlideRole::Prev,
                SlideRole::Active,
                SlideRole::Upcoming
            ]
        );
        assert_eq!(d.role_of(4), None);
    }

    #[test]
    fn only_changed_elements_are_timed() {
        let mut d = deck(4);
        d.animator_mut().seen.clear();
        let _ = d.go_to(1, HostTime(0));
        let timed: Vec<_> = d
            .animator()
            .seen
            .iter()
            .filter(|(.., c)| *c == Completion::Pending)
            .map(|(seen, ..)| *seen)
            .collect();
        assert_eq!(
            timed,
            [
                Seen::Slide(0, SlideRole::Prev),
                Seen::Slide(1, SlideRole::Active),
                Seen::Dot(0, false),
                Seen::Dot(1, true),
                Seen::Control(Control::Previous, true),
            ]
        );
        assert_eq!(d.pending(), 5);
    }

    #[test]
    fn entering_slide_is_delayed() {
        let mut d = deck(3);
        d.animator_mut().seen.clear();
        let _ = d.go_to(1, HostTime(0));
        let transition = d.config().transition;
        for (seen, timing, ..) in &d.animator().seen {
            match seen {
                Seen::Slide(1, _) => assert_eq!(*timing, transition.entering()),
                Seen::Slide(0, _) => assert_eq!(*timing, transition.leaving()),
                _ => {}
            }
        }
    }

    #[test]
    fn next_at_last_and_previous_at_first_are_noops() {
        let mut d = deck(3);
        assert_eq!(
            d.previous(HostTime(0)),
            Navigation::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(d.current_index(), 0);
        assert_eq!(d.state(), DeckState::Idle);

        let _ = d.last(HostTime(0));
        finish(&mut d, HostTime(1));
        assert_eq!(d.current_index(), 2);
        assert_eq!(
            d.next(HostTime(2)),
            Navigation::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(d.current_index(), 2);
    }

    #[test]
    fn out_of_range_go_to_is_ignored() {
        let mut d = deck(4);
        assert_eq!(
            d.go_to(4, HostTime(0)),
            Navigation::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(
            d.go_to(usize::MAX, HostTime(0)),
            Navigation::Rejected(RejectReason::OutOfRange)
        );
        assert_eq!(d.current_index(), 0);
        assert_eq!(d.generation(), 0);
    }

    #[test]
    fn requests_while_transitioning_are_dropped() {
        let mut d = deck(4);
        let _ = d.go_to(1, HostTime(1_000));
        let deadline = d.settle_deadline().expect("transitioning");
        let generation = d.generation();

        for nav in [
            d.next(HostTime(2_000)),
            d.previous(HostTime(3_000)),
            d.go_to(3, HostTime(4_000)),
            d.go_to(1, HostTime(5_000)),
        ] {
            assert_eq!(nav, Navigation::Rejected(RejectReason::Busy));
        }
        assert_eq!(d.current_index(), 1);
        assert_eq!(d.generation(), generation);
        // The lock's timer is neither extended nor restarted.
        assert_eq!(d.settle_deadline(), Some(deadline));
        assert_eq!(
            deadline,
            HostTime(1_000).saturating_add(d.config().settle_timeout)
        );
    }

    #[test]
    fn exactly_one_dot_is_active() {
        let mut d = deck(4);
        let mut now = HostTime(0);
        for target in [2, 0, 3, 1] {
            let _ = d.go_to(target, now);
            let active: Vec<_> = d.nav_dots().filter(|dot| dot.is_active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].index, d.current_index());
            now = now + Duration::from_millis(10);
            finish(&mut d, now);
        }
    }

    #[test]
    fn four_slide_walk_to_the_end() {
        let mut d = deck(4);
        let mut now = HostTime(0);
        for expected in 1..=3 {
            assert!(d.next(now).is_accepted());
            now = now + Duration::from_millis(100);
            finish(&mut d, now);
            assert_eq!(d.current_index(), expected);
        }
        assert_eq!(d.next(now), Navigation::Rejected(RejectReason::OutOfRange));
        assert_eq!(d.current_index(), 3);
        let next = d.next_control();
        assert!(!next.actionable);
        assert_eq!(next.label, "Done");
        assert!(d.previous_control().actionable);
        assert!((d.progress() - 1.0).abs() < f64::EPSILON, "at the end");
    }

    #[test]
    fn go_to_current_never_locks() {
        let mut d = deck(4);
        let _ = d.go_to(2, HostTime(0));
        finish(&mut d, HostTime(1));
        assert_eq!(
            d.go_to(2, HostTime(2)),
            Navigation::Rejected(RejectReason::AlreadyCurrent)
        );
        assert_eq!(d.state(), DeckState::Idle);
        assert!(d.animator().seen.is_empty(), "nothing was animated");
    }

    #[test]
    fn short_swipe_does_not_navigate() {
        let mut d = deck(4);
        let mut swipe = SwipeTracker::new(SwipeConfig::HORIZONTAL);
        swipe.begin(Point::new(300.0, 200.0));
        let intent = swipe.end(Point::new(270.0, 200.0));
        assert_eq!(intent, None);
        assert_eq!(d.current_index(), 0);
        assert_eq!(d.state(), DeckState::Idle);

        swipe.begin(Point::new(300.0, 200.0));
        let intent = swipe.end(Point::new(220.0, 200.0)).expect("80px swipe");
        let nav = d.dispatch(intent, InputSource::Touch, HostTime(0), &mut Tracer::none());
        assert_eq!(nav, Navigation::Accepted { from: 0, to: 1 });
    }

    #[test]
    fn settles_only_after_last_completion() {
        let mut d = deck(4);
        d.animator_mut().seen.clear();
        let _ = d.go_to(1, HostTime(0));
        let tokens = d.animator().pending_tokens();
        assert_eq!(tokens.len(), 5);

        for token in &tokens[..4] {
            assert!(!d.complete(*token, HostTime(5)));
            // Duplicates do not count twice.
            assert!(!d.complete(*token, HostTime(5)));
        }
        assert!(d.is_transitioning());
        assert_eq!(d.pending(), 1);
        assert!(d.complete(tokens[4], HostTime(6)));
        assert_eq!(d.state(), DeckState::Idle);
    }

    #[test]
    fn stale_and_unknown_tokens_are_ignored() {
        let mut d = deck(4);
        d.animator_mut().seen.clear();
        let _ = d.go_to(1, HostTime(0));
        let old = d.animator().pending_tokens();
        finish(&mut d, HostTime(1));

        let _ = d.go_to(2, HostTime(2));
        let before = d.pending();
        for token in old {
            assert!(!d.complete(token, HostTime(3)));
        }
        let bogus = CompletionToken {
            generation: d.generation(),
            slot: 10_000,
        };
        assert!(!d.complete(bogus, HostTime(3)));
        assert_eq!(d.pending(), before);
    }

    #[test]
    fn timeout_unlocks_when_completions_go_missing() {
        let mut d = deck(4);
        let _ = d.go_to(1, HostTime(1_000));
        let deadline = d.settle_deadline().unwrap();

        assert!(!d.poll(HostTime(deadline.micros() - 1)));
        assert!(d.is_transitioning());
        assert!(d.poll(deadline));
        assert_eq!(d.state(), DeckState::Idle);
        assert_eq!(d.current_index(), 1);

        // A completion arriving after the timeout changes nothing.
        let late = d.animator().pending_tokens()[0];
        assert!(!d.complete(late, deadline));
        assert!(!d.poll(deadline));
    }

    #[test]
    fn instant_animator_settles_immediately() {
        let mut d = SlideDeck::new(3, DeckConfig::report(), InstantAnimator).unwrap();
        assert!(d.next(HostTime(0)).is_accepted());
        assert_eq!(d.state(), DeckState::Idle);
        assert_eq!(d.settle_deadline(), None);
        assert!(d.next(HostTime(0)).is_accepted());
        assert_eq!(d.current_index(), 2);
        assert_eq!(d.next_control().label, "Complete");
    }

    #[test]
    fn first_and_last_jump() {
        let mut d = SlideDeck::new(6, DeckConfig::default(), InstantAnimator).unwrap();
        let _ = d.last(HostTime(0));
        assert_eq!(d.current_index(), 5);
        let _ = d.first(HostTime(0));
        assert_eq!(d.current_index(), 0);
        assert_eq!(
            d.first(HostTime(0)),
            Navigation::Rejected(RejectReason::AlreadyCurrent)
        );
    }

    #[test]
    fn next_label_without_finish() {
        let mut config = DeckConfig::slide_deck();
        config.labels.finish = None;
        let d = SlideDeck::new(1, config, InstantAnimator).unwrap();
        let next = d.next_control();
        assert!(!next.actionable);
        assert_eq!(next.label, "Next");
        assert!((d.progress() - 1.0).abs() < f64::EPSILON, "single slide");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_sees_rejections_and_settles() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Sink {
            rejected: Vec<RejectReason>,
            settled: Vec<SettleCause>,
            begun: u32,
        }
        impl TraceSink for Sink {
            fn on_rejected(&mut self, e: &RejectedEvent) {
                self.rejected.push(e.reason);
            }
            fn on_transition_begin(&mut self, _e: &TransitionBeginEvent) {
                self.begun += 1;
            }
            fn on_transition_settled(&mut self, e: &TransitionSettledEvent) {
                self.settled.push(e.cause);
            }
        }

        let mut sink = Sink::default();
        let mut d = deck(3);
        {
            let mut tracer = Tracer::new(&mut sink);
            let keyboard = InputSource::Keyboard;
            let _ = d.dispatch(NavIntent::Previous, keyboard, HostTime(0), &mut tracer);
            let _ = d.dispatch(NavIntent::Next, keyboard, HostTime(0), &mut tracer);
            let wheel = InputSource::Wheel;
            let _ = d.dispatch(NavIntent::Next, wheel, HostTime(1), &mut tracer);
            let deadline = d.settle_deadline().unwrap();
            let _ = d.poll_traced(deadline, &mut tracer);
        }
        assert_eq!(
            sink.rejected,
            [RejectReason::OutOfRange, RejectReason::Busy]
        );
        assert_eq!(sink.begun, 1);
        assert_eq!(sink.settled, [SettleCause::TimedOut]);
    }
}
