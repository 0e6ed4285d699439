// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input adapters.
//!
//! Each adapter turns one kind of raw input into an optional [`NavIntent`].
//! Adapters hold no deck state and never navigate on their own; the host
//! passes their output to [`SlideDeck::dispatch`], which applies the
//! transition lock.
//!
//! [`SlideDeck::dispatch`]: crate::deck::SlideDeck::dispatch

use kurbo::Point;

use crate::animator::Control;

/// A navigation request produced by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavIntent {
    /// Go to the following slide.
    Next,
    /// Go to the preceding slide.
    Previous,
    /// Go to the first slide.
    First,
    /// Go to the last slide.
    Last,
    /// Go to a specific slide.
    GoTo(usize),
}

/// Which input channel an intent came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// A key press.
    Keyboard,
    /// A wheel or trackpad scroll.
    Wheel,
    /// A touch swipe.
    Touch,
    /// A click on the previous/next control.
    Control,
    /// A click on a navigation dot.
    Dot,
    /// A call from host code.
    Programmatic,
}

impl NavIntent {
    /// The intent behind a click on an edge control.
    #[inline]
    #[must_use]
    pub const fn from_control(control: Control) -> Self {
        match control {
            Control::Previous => Self::Previous,
            Control::Next => Self::Next,
        }
    }

    /// The intent behind a click on nav dot `index`.
    #[inline]
    #[must_use]
    pub const fn from_dot(index: usize) -> Self {
        Self::GoTo(index)
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Meta / Command / Windows.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Returns `true` if a modifier that usually introduces a browser or OS
    /// shortcut is held.
    #[inline]
    #[must_use]
    pub const fn is_shortcut(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Maps `KeyboardEvent.key` values to intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Keys that move forward.
    pub forward: &'static [&'static str],
    /// Keys that move forward, or backward with Shift held.
    pub advance: &'static [&'static str],
    /// Keys that move backward.
    pub backward: &'static [&'static str],
    /// Keys that jump to the first slide.
    pub first: &'static [&'static str],
    /// Keys that jump to the last slide.
    pub last: &'static [&'static str],
}

impl KeyMap {
    /// Arrow keys on both axes, page keys, Space/Enter, Home/End.
    pub const DEFAULT: Self = Self {
        forward: &["ArrowRight", "ArrowDown", "PageDown"],
        advance: &[" ", "Spacebar", "Enter"],
        backward: &["ArrowLeft", "ArrowUp", "PageUp"],
        first: &["Home"],
        last: &["End"],
    };

    /// Returns `true` if `key` is one of the [`advance`](Self::advance) keys.
    ///
    /// These double as the activation keys of focused buttons and links.
    #[must_use]
    pub fn is_advance(&self, key: &str) -> bool {
        self.advance.contains(&key)
    }

    /// Resolves a key press.
    ///
    /// Presses with Ctrl, Alt or Meta held and auto-repeat presses produce
    /// nothing.
    #[must_use]
    pub fn resolve(&self, key: &str, modifiers: Modifiers, repeat: bool) -> Option<NavIntent> {
        if repeat || modifiers.is_shortcut() {
            return None;
        }
        if self.is_advance(key) {
            return Some(if modifiers.shift {
                NavIntent::Previous
            } else {
                NavIntent::Next
            });
        }
        if self.forward.contains(&key) {
            Some(NavIntent::Next)
        } else if self.backward.contains(&key) {
            Some(NavIntent::Previous)
        } else if self.first.contains(&key) {
            Some(NavIntent::First)
        } else if self.last.contains(&key) {
            Some(NavIntent::Last)
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

/// Maps wheel deltas to intents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelGate {
    /// Deltas whose magnitude does not exceed this value are ignored.
    pub min_delta: f64,
}

impl WheelGate {
    /// Any non-zero delta navigates.
    pub const ANY: Self = Self { min_delta: 0.0 };

    /// Resolves a vertical wheel delta: positive scrolls forward.
    #[must_use]
    pub fn resolve(&self, delta: f64) -> Option<NavIntent> {
        if delta.is_nan() {
            None
        } else if delta > self.min_delta {
            Some(NavIntent::Next)
        } else if delta < -self.min_delta {
            Some(NavIntent::Previous)
        } else {
            None
        }
    }
}

impl Default for WheelGate {
    fn default() -> Self {
        Self::ANY
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Axis along which swipes are measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeAxis {
    /// Left/right swipes; swiping left moves forward.
    Horizontal,
    /// Up/down swipes; swiping up moves forward.
    Vertical,
}

/// Swipe recognition parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Measured axis.
    pub axis: SwipeAxis,
    /// Displacement (in CSS pixels) a swipe must strictly exceed.
    pub threshold: f64,
}

impl SwipeConfig {
    /// Default swipe threshold in CSS pixels.
    pub const DEFAULT_THRESHOLD: f64 = 50.0;

    /// A horizontal swipe with the default threshold.
    pub const HORIZONTAL: Self = Self {
        axis: SwipeAxis::Horizontal,
        threshold: Self::DEFAULT_THRESHOLD,
    };

    /// A vertical swipe with the default threshold.
    pub const VERTICAL: Self = Self {
        axis: SwipeAxis::Vertical,
        threshold: Self::DEFAULT_THRESHOLD,
    };

    /// Classifies a finished gesture from `start` to `end`.
    #[must_use]
    pub fn classify(&self, start: Point, end: Point) -> Option<NavIntent> {
        let displacement = end - start;
        let along = match self.axis {
            SwipeAxis::Horizontal => displacement.x,
            SwipeAxis::Vertical => displacement.y,
        };
        if along.is_nan() || along.abs() <= self.threshold {
            return None;
        }
        // Content follows the finger: dragging it towards the origin reveals
        // what comes next.
        Some(if along < 0.0 {
            NavIntent::Next
        } else {
            NavIntent::Previous
        })
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

/// Tracks one touch gesture from start to end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Option<Point>,
}

impl SwipeTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub const fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
        }
    }

    /// Returns the tracker's configuration.
    #[must_use]
    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Records the point where a gesture starts, replacing any gesture in
    /// progress.
    pub fn begin(&mut self, point: Point) {
        self.start = Some(point);
    }

    /// Finishes the gesture at `point` and classifies it.
    ///
    /// Returns `None` if no gesture was in progress.
    pub fn end(&mut self, point: Point) -> Option<NavIntent> {
        let start = self.start.take()?;
        self.config.classify(start, point)
    }

    /// Abandons the gesture in progress.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_intents() {
        let resolve = |key| KeyMap::DEFAULT.resolve(key, Modifiers::NONE, false);
        assert_eq!(resolve("ArrowRight"), Some(NavIntent::Next));
        assert_eq!(resolve("ArrowDown"), Some(NavIntent::Next));
        assert_eq!(resolve(" "), Some(NavIntent::Next));
        assert_eq!(resolve("ArrowLeft"), Some(NavIntent::Previous));
        assert_eq!(resolve("PageUp"), Some(NavIntent::Previous));
        assert_eq!(resolve("Home"), Some(NavIntent::First));
        assert_eq!(resolve("End"), Some(NavIntent::Last));
        assert_eq!(resolve("a"), None);
    }

    #[test]
    fn shift_space_goes_back() {
        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            KeyMap::DEFAULT.resolve(" ", shift, false),
            Some(NavIntent::Previous)
        );
        // Shift does not flip plain arrows.
        assert_eq!(
            KeyMap::DEFAULT.resolve("ArrowRight", shift, false),
            Some(NavIntent::Next)
        );
    }

    #[test]
    fn activation_keys_are_advance_keys() {
        let keys = KeyMap::DEFAULT;
        assert!(keys.is_advance("Enter"));
        assert!(keys.is_advance(" "));
        assert!(!keys.is_advance("ArrowRight"));
        assert!(!keys.is_advance("Home"));
    }

    #[test]
    fn shortcuts_and_repeats_are_ignored() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(KeyMap::DEFAULT.resolve("ArrowRight", ctrl, false), None);
        assert_eq!(KeyMap::DEFAULT.resolve("ArrowLeft", meta, false), None);
        assert_eq!(
            KeyMap::DEFAULT.resolve("ArrowRight", Modifiers::NONE, true),
            None
        );
    }

    #[test]
    fn wheel_sign_selects_direction() {
        let gate = WheelGate::ANY;
        assert_eq!(gate.resolve(120.0), Some(NavIntent::Next));
        assert_eq!(gate.resolve(-3.0), Some(NavIntent::Previous));
        assert_eq!(gate.resolve(0.0), None);
        assert_eq!(gate.resolve(f64::NAN), None);
    }

    #[test]
    fn wheel_min_delta_filters_noise() {
        let gate = WheelGate { min_delta: 4.0 };
        assert_eq!(gate.resolve(4.0), None);
        assert_eq!(gate.resolve(-4.0), None);
        assert_eq!(gate.resolve(4.5), Some(NavIntent::Next));
    }

    #[test]
    fn short_swipe_is_not_navigation() {
        let mut swipe = SwipeTracker::new(SwipeConfig::HORIZONTAL);
        swipe.begin(Point::new(200.0, 100.0));
        assert_eq!(swipe.end(Point::new(170.0, 100.0)), None);
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn threshold_is_exclusive() {
        let config = SwipeConfig::HORIZONTAL;
        let start = Point::new(100.0, 0.0);
        assert_eq!(config.classify(start, Point::new(50.0, 0.0)), None);
        assert_eq!(
            config.classify(start, Point::new(49.0, 0.0)),
            Some(NavIntent::Next)
        );
    }

    #[test]
    fn forward_swipe_is_next() {
        let mut swipe = SwipeTracker::new(SwipeConfig::HORIZONTAL);
        swipe.begin(Point::new(200.0, 100.0));
        assert_eq!(swipe.end(Point::new(120.0, 110.0)), Some(NavIntent::Next));

        swipe.begin(Point::new(120.0, 100.0));
        assert_eq!(
            swipe.end(Point::new(200.0, 100.0)),
            Some(NavIntent::Previous)
        );
    }

    #[test]
    fn vertical_swipe_ignores_horizontal_motion() {
        let config = SwipeConfig::VERTICAL;
        let start = Point::new(0.0, 300.0);
        assert_eq!(config.classify(start, Point::new(200.0, 290.0)), None);
        assert_eq!(
            config.classify(start, Point::new(0.0, 220.0)),
            Some(NavIntent::Next)
        );
        assert_eq!(
            config.classify(start, Point::new(0.0, 380.0)),
            Some(NavIntent::Previous)
        );
    }

    #[test]
    fn end_without_begin_and_cancel() {
        let mut swipe = SwipeTracker::new(SwipeConfig::HORIZONTAL);
        assert_eq!(swipe.end(Point::new(0.0, 0.0)), None);

        swipe.begin(Point::new(300.0, 0.0));
        swipe.cancel();
        assert_eq!(swipe.end(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn clicks_map_directly() {
        assert_eq!(NavIntent::from_control(Control::Next), NavIntent::Next);
        assert_eq!(
            NavIntent::from_control(Control::Previous),
            NavIntent::Previous
        );
        assert_eq!(NavIntent::from_dot(3), NavIntent::GoTo(3));
    }
}
