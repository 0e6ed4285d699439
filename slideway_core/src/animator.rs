// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation capability that backends provide.
//!
//! A [`SlideDeck`](crate::deck::SlideDeck) never touches styles itself. For
//! every element whose visual state changes it issues one
//! [`AnimationRequest`] to its [`Animator`] and moves on. The animator either
//! finishes the change on the spot ([`Completion::Immediate`]) or promises to
//! hand the request's [`CompletionToken`] back to
//! [`SlideDeck::complete`](crate::deck::SlideDeck::complete) once the visual
//! transition has ended ([`Completion::Pending`]).
//!
//! # Backend contract
//!
//! A backend provides the following pieces:
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock.
//! - **Animator**: an implementation of [`Animator`] that applies slide
//!   roles, dot state and control state to native elements.
//! - **Completion delivery**: a way to route tokens from finished
//!   animations back into the deck. This is backend-specific because the
//!   deck usually owns the animator.
//! - **Settle timer**: a one-shot timer that calls
//!   [`SlideDeck::poll`](crate::deck::SlideDeck::poll) at the deck's
//!   [`settle_deadline`](crate::deck::SlideDeck::settle_deadline), in case a
//!   completion never arrives.

use alloc::boxed::Box;

use crate::time::Duration;

/// The role a slide plays relative to the current index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideRole {
    /// The slide at the current index.
    Active,
    /// A slide before the current index.
    Prev,
    /// A slide after the current index.
    Upcoming,
}

impl SlideRole {
    /// Classifies slide `index` against `current`.
    #[inline]
    #[must_use]
    pub const fn classify(index: usize, current: usize) -> Self {
        if index == current {
            Self::Active
        } else if index < current {
            Self::Prev
        } else {
            Self::Upcoming
        }
    }
}

/// One of the two edge navigation controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// The "previous" control.
    Previous,
    /// The "next" control.
    Next,
}

/// Boundary state of a navigation control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState<'a> {
    /// Whether clicking the control can navigate.
    pub actionable: bool,
    /// Label to show on the control.
    pub label: &'a str,
}

/// Interpolation curve for a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// A cubic Bézier curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f32, f32, f32, f32),
}

/// When and how a visual change plays out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// How long the change takes once it starts.
    pub duration: Duration,
    /// How long to wait before starting.
    pub delay: Duration,
    /// Interpolation curve.
    pub easing: Easing,
}

impl Timing {
    /// A change that applies at once.
    pub const INSTANT: Self = Self {
        duration: Duration::ZERO,
        delay: Duration::ZERO,
        easing: Easing::Linear,
    };

    /// Returns `true` if the change has no duration and no delay.
    #[inline]
    #[must_use]
    pub const fn is_instant(&self) -> bool {
        self.duration.is_zero() && self.delay.is_zero()
    }

    /// Delay plus duration.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }
}

/// Identifies one animated element within one transition.
///
/// Slots number slides first, then dots, then the previous and next
/// controls. The generation is bumped for every accepted transition, so a
/// token that arrives late is recognized as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    /// Transition sequence number.
    pub generation: u32,
    /// Per-element slot.
    pub slot: u32,
}

/// What an element should look like at the end of a request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationTarget<'a> {
    /// Move a slide into a role.
    Slide {
        /// Slide index.
        index: usize,
        /// Target role.
        role: SlideRole,
    },
    /// Mark a navigation dot active or inactive.
    Dot {
        /// Dot index (same as its slide's).
        index: usize,
        /// Whether the dot represents the current slide.
        active: bool,
    },
    /// Update an edge control's boundary state.
    Control {
        /// Which control.
        control: Control,
        /// Target state.
        state: ControlState<'a>,
    },
}

/// A fire-and-forget request to change one element's visual state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRequest<'a> {
    /// Element and target state.
    pub target: AnimationTarget<'a>,
    /// How the change plays out.
    pub timing: Timing,
    /// Token to report back if the animator answers [`Completion::Pending`].
    pub token: CompletionToken,
}

/// How an animator handled a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Completion {
    /// The change has been applied in full.
    Immediate,
    /// The change is in flight; the animator will report the token.
    Pending,
}

/// Applies visual state changes to slides, dots and controls.
///
/// Implementations must not call back into the deck from inside
/// [`animate`](Self::animate); completions are delivered later, from the
/// host's event loop.
pub trait Animator {
    /// Starts moving an element towards the requested state.
    fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion;
}

impl<A: Animator + ?Sized> Animator for &mut A {
    fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion {
        (**self).animate(request)
    }
}

impl<A: Animator + ?Sized> Animator for Box<A> {
    fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion {
        (**self).animate(request)
    }
}

/// An [`Animator`] that reports every request as already applied.
///
/// Useful for headless hosts and for honoring a reduced-motion preference;
/// every accepted navigation settles before `go_to` returns.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn animate(&mut self, _request: &AnimationRequest<'_>) -> Completion {
        Completion::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_roles() {
        assert_eq!(SlideRole::classify(2, 2), SlideRole::Active);
        assert_eq!(SlideRole::classify(0, 2), SlideRole::Prev);
        assert_eq!(SlideRole::classify(3, 2), SlideRole::Upcoming);
    }

    #[test]
    fn timing_total_and_instant() {
        let t = Timing {
            duration: Duration::from_millis(600),
            delay: Duration::from_millis(200),
            easing: Easing::EaseOut,
        };
        assert_eq!(t.total(), Duration::from_millis(800));
        assert!(!t.is_instant());
        assert!(Timing::INSTANT.is_instant());
    }

    #[test]
    fn boxed_animator_forwards() {
        let mut boxed: Box<dyn Animator> = Box::new(InstantAnimator);
        let request = AnimationRequest {
            target: AnimationTarget::Dot {
                index: 0,
                active: true,
            },
            timing: Timing::INSTANT,
            token: CompletionToken {
                generation: 0,
                slot: 0,
            },
        };
        assert_eq!(boxed.animate(&request), Completion::Immediate);
    }
}
