// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck configuration and presets.
//!
//! A single [`SlideDeck`](crate::deck::SlideDeck) serves every slideshow on
//! a page; what differs between them (timing, swipe axis, which inputs are
//! bound, control labels) lives in a [`DeckConfig`]. The two presets cover
//! the horizontal slide deck and the vertical report slideshow.

use crate::animator::{Easing, Timing};
use crate::input::{KeyMap, SwipeConfig, WheelGate};
use crate::time::Duration;

/// Timing of a slide transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    /// Length of each slide's move into its new role.
    pub duration: Duration,
    /// Extra delay before the incoming slide starts, so the outgoing slide
    /// clears first.
    pub enter_delay: Duration,
    /// Length of dot and control updates.
    pub indicator_duration: Duration,
    /// Interpolation curve for all of the above.
    pub easing: Easing,
}

impl TransitionTiming {
    /// Time from the start of a transition until the incoming slide is in
    /// place.
    #[inline]
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.enter_delay.saturating_add(self.duration)
    }

    /// Timing for the slide entering the active role.
    #[inline]
    #[must_use]
    pub const fn entering(&self) -> Timing {
        Timing {
            duration: self.duration,
            delay: self.enter_delay,
            easing: self.easing,
        }
    }

    /// Timing for slides leaving or staying out of view.
    #[inline]
    #[must_use]
    pub const fn leaving(&self) -> Timing {
        Timing {
            duration: self.duration,
            delay: Duration::ZERO,
            easing: self.easing,
        }
    }

    /// Timing for dots and controls.
    #[inline]
    #[must_use]
    pub const fn indicator(&self) -> Timing {
        Timing {
            duration: self.indicator_duration,
            delay: Duration::ZERO,
            easing: self.easing,
        }
    }
}

/// Which input adapters a backend binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputSet {
    /// Key presses on the document.
    pub keyboard: bool,
    /// Wheel events over the deck.
    pub wheel: bool,
    /// Touch swipes over the deck.
    pub touch: bool,
}

impl InputSet {
    /// Every adapter.
    pub const ALL: Self = Self {
        keyboard: true,
        wheel: true,
        touch: true,
    };
}

/// Labels for the edge controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlLabels {
    /// Label of the "previous" control.
    pub previous: &'static str,
    /// Label of the "next" control.
    pub next: &'static str,
    /// Label of the "next" control on the last slide; `None` keeps `next`.
    pub finish: Option<&'static str>,
}

/// Configuration for a [`SlideDeck`](crate::deck::SlideDeck).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeckConfig {
    /// Slide shown first; clamped to the last slide.
    pub initial_index: usize,
    /// Transition timing.
    pub transition: TransitionTiming,
    /// How long a transition may wait for completions before the deck
    /// unlocks anyway.
    pub settle_timeout: Duration,
    /// Bound input adapters.
    pub inputs: InputSet,
    /// Keyboard bindings.
    pub keys: KeyMap,
    /// Swipe recognition.
    pub swipe: SwipeConfig,
    /// Wheel filtering.
    pub wheel: WheelGate,
    /// Control labels.
    pub labels: ControlLabels,
}

/// Slack added on top of the transition length before timing out.
const SETTLE_GRACE: Duration = Duration::from_millis(150);

impl DeckConfig {
    /// Horizontal slide deck: swipe left/right, 600 ms transitions.
    #[must_use]
    pub const fn slide_deck() -> Self {
        let transition = TransitionTiming {
            duration: Duration::from_millis(600),
            enter_delay: Duration::from_millis(200),
            indicator_duration: Duration::from_millis(300),
            easing: Easing::CubicBezier(0.22, 1.0, 0.36, 1.0),
        };
        Self {
            initial_index: 0,
            transition,
            settle_timeout: transition.total().saturating_add(SETTLE_GRACE),
            inputs: InputSet::ALL,
            keys: KeyMap::DEFAULT,
            swipe: SwipeConfig::HORIZONTAL,
            wheel: WheelGate::ANY,
            labels: ControlLabels {
                previous: "Previous",
                next: "Next",
                finish: Some("Done"),
            },
        }
    }

    /// Vertical report slideshow: swipe up/down, 800 ms transitions.
    #[must_use]
    pub const fn report() -> Self {
        let transition = TransitionTiming {
            duration: Duration::from_millis(800),
            enter_delay: Duration::from_millis(300),
            indicator_duration: Duration::from_millis(400),
            easing: Easing::EaseInOut,
        };
        Self {
            initial_index: 0,
            transition,
            settle_timeout: transition.total().saturating_add(SETTLE_GRACE),
            inputs: InputSet::ALL,
            keys: KeyMap::DEFAULT,
            swipe: SwipeConfig::VERTICAL,
            wheel: WheelGate::ANY,
            labels: ControlLabels {
                previous: "Previous",
                next: "Next",
                finish: Some("Complete"),
            },
        }
    }

    /// Recomputes [`settle_timeout`](Self::settle_timeout) from the current
    /// transition timing.
    #[must_use]
    pub const fn with_transition(mut self, transition: TransitionTiming) -> Self {
        self.transition = transition;
        self.settle_timeout = transition.total().saturating_add(SETTLE_GRACE);
        self
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::slide_deck()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SwipeAxis;

    #[test]
    fn presets_differ_in_axis() {
        assert_eq!(DeckConfig::slide_deck().swipe.axis, SwipeAxis::Horizontal);
        assert_eq!(DeckConfig::report().swipe.axis, SwipeAxis::Vertical);
        assert_eq!(DeckConfig::default(), DeckConfig::slide_deck());
    }

    #[test]
    fn presets_relabel_at_the_end() {
        assert_eq!(DeckConfig::slide_deck().labels.finish, Some("Done"));
        assert_eq!(DeckConfig::report().labels.next, "Next");
        assert_eq!(DeckConfig::report().labels.finish, Some("Complete"));
    }

    #[test]
    fn settle_timeout_covers_transition() {
        let config = DeckConfig::slide_deck();
        assert_eq!(config.transition.total(), Duration::from_millis(800));
        assert_eq!(config.settle_timeout, Duration::from_millis(950));
    }

    #[test]
    fn with_transition_recomputes_timeout() {
        let config = DeckConfig::slide_deck().with_transition(TransitionTiming {
            duration: Duration::from_millis(100),
            enter_delay: Duration::ZERO,
            indicator_duration: Duration::from_millis(50),
            easing: Easing::Linear,
        });
        assert_eq!(config.settle_timeout, Duration::from_millis(250));
    }

    #[test]
    fn entering_slide_waits_for_outgoing() {
        let t = DeckConfig::slide_deck().transition;
        assert_eq!(t.entering().delay, Duration::from_millis(200));
        assert_eq!(t.leaving().delay, Duration::ZERO);
        assert_eq!(t.indicator().duration, Duration::from_millis(300));
    }
}
