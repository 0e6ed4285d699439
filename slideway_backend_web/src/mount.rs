// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding a deck to a DOM subtree.
//!
//! [`mount`] discovers the slides, dots and controls under a root element,
//! builds a [`SlideDeck`] around a [`CssAnimator`], and attaches the input
//! listeners the configuration asks for. Everything lives as long as the
//! returned [`DeckHandle`]; dropping it removes every listener.
//!
//! Event handlers borrow the deck for the duration of one dispatch. An event
//! that arrives while the deck is already borrowed is dropped, like any other
//! request made while the deck is busy.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::Point;
use slideway_core::animator::{CompletionToken, Control};
use slideway_core::config::DeckConfig;
use slideway_core::deck::{DeckError, Navigation, SlideDeck};
use slideway_core::input::{InputSource, Modifiers, NavIntent, SwipeTracker};
use slideway_core::trace::{RejectReason, TraceSink, Tracer};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, TouchEvent, WheelEvent,
};

use crate::animator::CssAnimator;
use crate::listener::Listener;
use crate::now;
use crate::timer::SettleTimer;

/// CSS selectors locating a deck's parts, relative to its root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors<'a> {
    /// Slide elements, in document order.
    pub slides: &'a str,
    /// Container of the navigation dots. Dots are its element children;
    /// an empty container is filled with one `<button>` per slide.
    pub dots: Option<&'a str>,
    /// The "previous" control.
    pub previous: Option<&'a str>,
    /// The "next" control.
    pub next: Option<&'a str>,
}

impl Selectors<'static> {
    /// `.slide`, `.slide-dots`, `.slide-prev`, `.slide-next`.
    pub const DEFAULT: Self = Self {
        slides: ".slide",
        dots: Some(".slide-dots"),
        previous: Some(".slide-prev"),
        next: Some(".slide-next"),
    };
}

impl Default for Selectors<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error binding a deck to the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountError {
    /// The root element is not attached to a document.
    NoDocument,
    /// A selector could not be parsed.
    InvalidSelector(String),
    /// No element matched the slide selector.
    NoSlides,
    /// The dot container holds a different number of dots than there are
    /// slides.
    DotCountMismatch {
        /// Number of slides.
        slides: usize,
        /// Number of dots found.
        dots: usize,
    },
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => f.write_str("deck root is not in a document"),
            Self::InvalidSelector(selector) => write!(f, "invalid selector `{selector}`"),
            Self::NoSlides => f.write_str("deck root contains no slides"),
            Self::DotCountMismatch { slides, dots } => {
                write!(f, "deck has {slides} slides but {dots} navigation dots")
            }
        }
    }
}

impl core::error::Error for MountError {}

impl From<DeckError> for MountError {
    fn from(err: DeckError) -> Self {
        match err {
            DeckError::Empty => Self::NoSlides,
        }
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        Self::from_str(&err.to_string())
    }
}

/// State shared between the handle and every event handler.
struct Shared {
    deck: RefCell<SlideDeck<CssAnimator>>,
    swipe: RefCell<SwipeTracker>,
    sink: RefCell<Option<Box<dyn TraceSink>>>,
    timer: SettleTimer,
}

impl Shared {
    fn dispatch(&self, intent: NavIntent, source: InputSource) -> Navigation {
        let Ok(mut deck) = self.deck.try_borrow_mut() else {
            return Navigation::Rejected(RejectReason::Busy);
        };
        let now = now();
        let nav = self.with_tracer(|tracer| deck.dispatch(intent, source, now, tracer));
        if nav.is_accepted() {
            match deck.settle_deadline() {
                Some(deadline) => self.timer.schedule_at(deadline, now),
                None => self.timer.cancel(),
            }
        }
        nav
    }

    fn complete(&self, token: CompletionToken) {
        let Ok(mut deck) = self.deck.try_borrow_mut() else {
            return;
        };
        let now = now();
        if self.with_tracer(|tracer| deck.complete_traced(token, now, tracer)) {
            self.timer.cancel();
        }
    }

    fn poll(&self) {
        let Ok(mut deck) = self.deck.try_borrow_mut() else {
            return;
        };
        let now = now();
        self.with_tracer(|tracer| deck.poll_traced(now, tracer));
        // Timers may fire a little early; try again at the deadline.
        if let Some(deadline) = deck.settle_deadline() {
            self.timer.schedule_at(deadline, now);
        }
    }

    /// Returns `true` if `el` is, or sits inside, one of this deck's dots
    /// or edge controls.
    fn owns_control(&self, el: &HtmlElement) -> bool {
        let Ok(deck) = self.deck.try_borrow() else {
            return false;
        };
        let animator = deck.animator();
        animator
            .dots()
            .iter()
            .chain(animator.control(Control::Previous))
            .chain(animator.control(Control::Next))
            .any(|control| control.contains(Some(el.as_ref())))
    }

    fn with_tracer<R>(&self, f: impl FnOnce(&mut Tracer<'_>) -> R) -> R {
        let Ok(mut sink) = self.sink.try_borrow_mut() else {
            return f(&mut Tracer::none());
        };
        let mut tracer = match sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        f(&mut tracer)
    }
}

/// A mounted deck.
///
/// Dropping the handle detaches the deck from the page: listeners are
/// removed and the pending settle timer is cancelled. The DOM keeps its last
/// state.
pub struct DeckHandle {
    listeners: Vec<Listener>,
    shared: Rc<Shared>,
}

impl fmt::Debug for DeckHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckHandle")
            .field("listeners", &self.listeners.len())
            .field("deck", &self.shared.deck)
            .field("timer", &self.shared.timer)
            .finish_non_exhaustive()
    }
}

impl DeckHandle {
    /// Starts a transition to slide `index`.
    pub fn go_to(&self, index: usize) -> Navigation {
        self.shared.dispatch(NavIntent::GoTo(index), InputSource::Programmatic)
    }

    /// Moves to the following slide.
    pub fn next(&self) -> Navigation {
        self.shared.dispatch(NavIntent::Next, InputSource::Programmatic)
    }

    /// Moves to the preceding slide.
    pub fn previous(&self) -> Navigation {
        self.shared.dispatch(NavIntent::Previous, InputSource::Programmatic)
    }

    /// Moves to the first slide.
    pub fn first(&self) -> Navigation {
        self.shared.dispatch(NavIntent::First, InputSource::Programmatic)
    }

    /// Moves to the last slide.
    pub fn last(&self) -> Navigation {
        self.shared.dispatch(NavIntent::Last, InputSource::Programmatic)
    }

    /// Index of the current slide.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.shared.deck.borrow().current_index()
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.deck.borrow().len()
    }

    /// Always `false`: a mounted deck has at least one slide.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.shared.deck.borrow().is_transitioning()
    }

    /// Routes trace events to `sink`, or stops tracing with `None`.
    ///
    /// Events only flow when `slideway_core` is built with its `trace`
    /// feature.
    pub fn set_trace_sink(&self, sink: Option<Box<dyn TraceSink>>) {
        *self.shared.sink.borrow_mut() = sink;
    }
}

/// Binds a deck to the subtree under `root`.
///
/// Slides, dots and controls are located with `selectors` once; elements
/// added later are not picked up. The initial state is painted before this
/// returns.
pub fn mount(
    root: &Element,
    config: DeckConfig,
    selectors: &Selectors<'_>,
) -> Result<DeckHandle, JsValue> {
    let document = root.owner_document().ok_or(MountError::NoDocument)?;

    let slides = query_all(root, selectors.slides)?;
    if slides.is_empty() {
        return Err(MountError::NoSlides.into());
    }
    let dots = match query_optional(root, selectors.dots)? {
        Some(container) => collect_dots(&document, &container, slides.len())?,
        None => Vec::new(),
    };
    let previous = query_optional(root, selectors.previous)?;
    let next = query_optional(root, selectors.next)?;

    let slide_count = slides.len();
    let animator = CssAnimator::new(slides, dots, previous, next);
    let deck = SlideDeck::new(slide_count, config, animator).map_err(MountError::from)?;

    let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
        let mut deck = deck;
        let on_complete = weak.clone();
        deck.animator_mut().set_completion_handler(move |token| {
            if let Some(shared) = on_complete.upgrade() {
                shared.complete(token);
            }
        });
        let on_timeout = weak.clone();
        Shared {
            deck: RefCell::new(deck),
            swipe: RefCell::new(SwipeTracker::new(config.swipe)),
            sink: RefCell::new(None),
            timer: SettleTimer::new(move || {
                if let Some(shared) = on_timeout.upgrade() {
                    shared.poll();
                }
            }),
        }
    });

    let listeners = bind_inputs(&shared, root, &document, &config)?;
    Ok(DeckHandle { listeners, shared })
}

/// Attaches every listener `config` asks for.
fn bind_inputs(
    shared: &Rc<Shared>,
    root: &Element,
    document: &Document,
    config: &DeckConfig,
) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    // Controls and dots are always clickable.
    {
        let deck = shared.deck.borrow();
        let animator = deck.animator();
        for control in [Control::Previous, Control::Next] {
            if let Some(el) = animator.control(control) {
                let intent = NavIntent::from_control(control);
                listeners.push(bind(shared, el, "click", move |shared, _event| {
                    let _ = shared.dispatch(intent, InputSource::Control);
                })?);
            }
        }
        for (index, dot) in animator.dots().iter().enumerate() {
            let intent = NavIntent::from_dot(index);
            listeners.push(bind(shared, dot, "click", move |shared, _event| {
                let _ = shared.dispatch(intent, InputSource::Dot);
            })?);
        }
    }

    if config.inputs.keyboard {
        let keys = config.keys;
        listeners.push(bind(shared, document, "keydown", move |shared, event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.default_prevented() {
                return;
            }
            let target = KeyTarget::of(shared, event.target());
            if target == KeyTarget::Text {
                return;
            }
            let key = event.key();
            // Let Enter and Space activate the focused button natively.
            if target == KeyTarget::Activatable && keys.is_advance(&key) {
                return;
            }
            let modifiers = Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            };
            if let Some(intent) = keys.resolve(&key, modifiers, event.repeat()) {
                event.prevent_default();
                let _ = shared.dispatch(intent, InputSource::Keyboard);
            }
        })?);
    }

    if config.inputs.wheel {
        let gate = config.wheel;
        listeners.push(bind(shared, root, "wheel", move |shared, event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            if let Some(intent) = gate.resolve(dominant_delta(event.delta_x(), event.delta_y())) {
                event.prevent_default();
                let _ = shared.dispatch(intent, InputSource::Wheel);
            }
        })?);
    }

    if config.inputs.touch {
        listeners.push(bind(shared, root, "touchstart", |shared, event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            let mut swipe = shared.swipe.borrow_mut();
            // A second finger turns the gesture into something else.
            match first_changed_touch(event) {
                Some(point) if event.touches().length() <= 1 => swipe.begin(point),
                _ => swipe.cancel(),
            }
        })?);
        listeners.push(bind(shared, root, "touchend", |shared, event| {
            let Some(point) = event.dyn_ref::<TouchEvent>().and_then(first_changed_touch) else {
                return;
            };
            let intent = shared.swipe.borrow_mut().end(point);
            if let Some(intent) = intent {
                let _ = shared.dispatch(intent, InputSource::Touch);
            }
        })?);
        listeners.push(bind(shared, root, "touchcancel", |shared, _event| {
            shared.swipe.borrow_mut().cancel();
        })?);
    }

    Ok(listeners)
}

/// Attaches `handler` to `target`, holding the shared state weakly.
fn bind(
    shared: &Rc<Shared>,
    target: &EventTarget,
    kind: &'static str,
    mut handler: impl FnMut(&Shared, &Event) + 'static,
) -> Result<Listener, JsValue> {
    let weak = Rc::downgrade(shared);
    Listener::attach(target, kind, move |event| {
        if let Some(shared) = weak.upgrade() {
            handler(&shared, &event);
        }
    })
}

fn query_all(root: &Element, selector: &str) -> Result<Vec<HtmlElement>, MountError> {
    let list = root
        .query_selector_all(selector)
        .map_err(|_| MountError::InvalidSelector(selector.into()))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn query_one(root: &Element, selector: &str) -> Result<Option<HtmlElement>, MountError> {
    let found = root
        .query_selector(selector)
        .map_err(|_| MountError::InvalidSelector(selector.into()))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn query_optional(
    root: &Element,
    selector: Option<&str>,
) -> Result<Option<HtmlElement>, MountError> {
    match selector {
        Some(selector) => query_one(root, selector),
        None => Ok(None),
    }
}

/// Returns the container's dots, creating them if it is empty.
fn collect_dots(
    document: &Document,
    container: &HtmlElement,
    count: usize,
) -> Result<Vec<HtmlElement>, JsValue> {
    let children = container.children();
    if children.length() == 0 {
        let mut dots = Vec::with_capacity(count);
        for index in 0..count {
            let dot: HtmlElement = document.create_element("button")?.unchecked_into();
            dot.set_attribute("type", "button")?;
            dot.set_class_name("slide-dot");
            dot.set_attribute("aria-label", &dot_label(index))?;
            container.append_child(&dot)?;
            dots.push(dot);
        }
        return Ok(dots);
    }

    let dots: Vec<HtmlElement> = (0..children.length())
        .filter_map(|i| children.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    if dots.len() != count {
        return Err(MountError::DotCountMismatch {
            slides: count,
            dots: dots.len(),
        }
        .into());
    }
    Ok(dots)
}

fn first_changed_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.changed_touches().get(0)?;
    Some(Point::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

/// What a focused element does with key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyTarget {
    /// A text field: every key belongs to it.
    Text,
    /// A button, link or deck control: Enter and Space activate it.
    Activatable,
    /// Anything else.
    Other,
}

impl KeyTarget {
    fn of(shared: &Shared, target: Option<EventTarget>) -> Self {
        let Some(el) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
            return Self::Other;
        };
        if shared.owns_control(&el) {
            return Self::Activatable;
        }
        Self::classify(
            &el.tag_name(),
            el.has_attribute("href"),
            el.get_attribute("role").as_deref(),
            el.is_content_editable(),
        )
    }

    fn classify(tag: &str, has_href: bool, role: Option<&str>, editable: bool) -> Self {
        let is = |name: &str| tag.eq_ignore_ascii_case(name);
        if editable || is("INPUT") || is("TEXTAREA") || is("SELECT") {
            Self::Text
        } else if is("BUTTON")
            || is("SUMMARY")
            || (is("A") && has_href)
            || role.is_some_and(|r| r.eq_ignore_ascii_case("button"))
        {
            Self::Activatable
        } else {
            Self::Other
        }
    }
}

/// Picks the wheel axis that moved more; trackpads report both.
fn dominant_delta(dx: f64, dy: f64) -> f64 {
    if dx.abs() > dy.abs() { dx } else { dy }
}

fn dot_label(index: usize) -> String {
    format!("Go to slide {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selectors() {
        let s = Selectors::default();
        assert_eq!(s.slides, ".slide");
        assert_eq!(s.dots, Some(".slide-dots"));
    }

    #[test]
    fn key_targets() {
        use KeyTarget::{Activatable, Other, Text};
        let cases = [
            ("INPUT", false, None, false, Text),
            ("textarea", false, None, false, Text),
            ("DIV", false, None, true, Text),
            ("BUTTON", false, None, false, Activatable),
            ("SUMMARY", false, None, false, Activatable),
            ("A", true, None, false, Activatable),
            ("DIV", false, Some("button"), false, Activatable),
            // An anchor without href is not a link.
            ("A", false, None, false, Other),
            ("DIV", false, None, false, Other),
            ("SECTION", false, Some("region"), false, Other),
        ];
        for (tag, has_href, role, editable, expected) in cases {
            let kind = KeyTarget::classify(tag, has_href, role, editable);
            assert_eq!(kind, expected, "{tag} role={role:?}");
        }
    }

    #[test]
    fn wheel_uses_dominant_axis() {
        assert_eq!(dominant_delta(0.0, 120.0), 120.0);
        assert_eq!(dominant_delta(-40.0, 3.0), -40.0);
        assert_eq!(dominant_delta(0.0, 0.0), 0.0);
    }

    #[test]
    fn dots_are_labeled_from_one() {
        assert_eq!(dot_label(0), "Go to slide 1");
        assert_eq!(dot_label(11), "Go to slide 12");
    }

    #[test]
    fn mount_errors_read_well() {
        assert_eq!(
            MountError::DotCountMismatch { slides: 4, dots: 3 }.to_string(),
            "deck has 4 slides but 3 navigation dots"
        );
        assert_eq!(MountError::from(DeckError::Empty), MountError::NoSlides);
    }
}
