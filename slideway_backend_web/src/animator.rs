// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS transition animator.
//!
//! [`CssAnimator`] expresses every [`AnimationRequest`] as class and
//! attribute changes plus inline `transition-*` properties, and leaves the
//! actual motion to the page's stylesheet. Slides get exactly one of
//! `is-active`, `is-prev`, `is-upcoming`; the active dot gets `is-active`.
//!
//! Timed slide and dot changes answer [`Completion::Pending`] and report
//! their token once the element's own `transitionend` fires. Control updates
//! are always [`Completion::Immediate`].

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use slideway_core::animator::{
    AnimationRequest, AnimationTarget, Animator, Completion, CompletionToken, Control,
    ControlState, Easing, SlideRole, Timing,
};
use slideway_core::time::Duration;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::listener::Listener;

/// Class applied to the element in each [`SlideRole`].
const ROLE_CLASSES: [(SlideRole, &str); 3] = [
    (SlideRole::Active, "is-active"),
    (SlideRole::Prev, "is-prev"),
    (SlideRole::Upcoming, "is-upcoming"),
];

/// Class on the active dot.
const ACTIVE_CLASS: &str = "is-active";

/// Class on a control that cannot navigate.
const DISABLED_CLASS: &str = "is-disabled";

/// Receives completion tokens from finished CSS transitions.
pub type CompletionHandler = Rc<dyn Fn(CompletionToken)>;

/// An [`Animator`] backed by CSS transitions on existing DOM elements.
pub struct CssAnimator {
    slides: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    previous: Option<HtmlElement>,
    next: Option<HtmlElement>,
    on_complete: Option<CompletionHandler>,
    /// One `transitionend` listener per slot, replaced on every request.
    listeners: Vec<Option<Listener>>,
}

impl core::fmt::Debug for CssAnimator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CssAnimator")
            .field("slides_len", &self.slides.len())
            .field("dots_len", &self.dots.len())
            .field("has_previous", &self.previous.is_some())
            .field("has_next", &self.next.is_some())
            .field(
                "listening",
                &self.listeners.iter().filter(|l| l.is_some()).count(),
            )
            .finish_non_exhaustive()
    }
}

impl CssAnimator {
    /// Creates an animator over the given elements.
    ///
    /// `dots` is either empty or parallel to `slides`. Until a handler is
    /// installed with [`set_completion_handler`](Self::set_completion_handler)
    /// every request completes immediately.
    #[must_use]
    pub fn new(
        slides: Vec<HtmlElement>,
        dots: Vec<HtmlElement>,
        previous: Option<HtmlElement>,
        next: Option<HtmlElement>,
    ) -> Self {
        let slots = 2 * slides.len() + 2;
        let mut listeners = Vec::new();
        listeners.resize_with(slots, || None);
        Self {
            slides,
            dots,
            previous,
            next,
            on_complete: None,
            listeners,
        }
    }

    /// Installs the function that receives tokens of finished transitions.
    pub fn set_completion_handler(&mut self, handler: impl Fn(CompletionToken) + 'static) {
        self.on_complete = Some(Rc::new(handler));
    }

    /// The slide elements, in deck order.
    #[must_use]
    pub fn slides(&self) -> &[HtmlElement] {
        &self.slides
    }

    /// The dot elements, in deck order.
    #[must_use]
    pub fn dots(&self) -> &[HtmlElement] {
        &self.dots
    }

    /// The element for `control`, if the page has one.
    #[must_use]
    pub fn control(&self, control: Control) -> Option<&HtmlElement> {
        match control {
            Control::Previous => self.previous.as_ref(),
            Control::Next => self.next.as_ref(),
        }
    }

    /// Reports `token` once `element` itself finishes a transition.
    fn listen(&mut self, slot: usize, element: &HtmlElement, token: CompletionToken) -> Completion {
        let Some(handler) = self.on_complete.clone() else {
            return Completion::Immediate;
        };
        // Replacing the slot drops (and unregisters) the previous listener.
        self.listeners[slot] = None;

        let own: JsValue = element.clone().into();
        let fired = Cell::new(false);
        let listener = Listener::attach(element, "transitionend", move |event| {
            // Ignore transitions bubbling up from descendants.
            let from_self = event.target().is_some_and(|t| JsValue::from(t) == own);
            if from_self && !fired.replace(true) {
                handler(token);
            }
        });
        match listener {
            Ok(listener) => {
                self.listeners[slot] = Some(listener);
                Completion::Pending
            }
            // Without a listener nothing would ever report; let the deck move on.
            Err(_) => Completion::Immediate,
        }
    }
}

impl Animator for CssAnimator {
    fn animate(&mut self, request: &AnimationRequest<'_>) -> Completion {
        let slot = request.token.slot as usize;
        let element = match request.target {
            AnimationTarget::Slide { index, role } => {
                let Some(el) = self.slides.get(index) else {
                    return Completion::Immediate;
                };
                apply_timing(el, &request.timing);
                apply_role(el, role);
                el.clone()
            }
            AnimationTarget::Dot { index, active } => {
                let Some(el) = self.dots.get(index) else {
                    return Completion::Immediate;
                };
                apply_timing(el, &request.timing);
                apply_dot(el, active);
                el.clone()
            }
            AnimationTarget::Control { control, state } => {
                if let Some(el) = self.control(control) {
                    apply_timing(el, &request.timing);
                    apply_control(el, &state);
                }
                return Completion::Immediate;
            }
        };
        if request.timing.is_instant() || slot >= self.listeners.len() {
            if let Some(listener) = self.listeners.get_mut(slot) {
                *listener = None;
            }
            return Completion::Immediate;
        }
        self.listen(slot, &element, request.token)
    }
}

fn apply_timing(el: &HtmlElement, timing: &Timing) {
    let s = el.style();
    let _ = s.set_property("transition-duration", &css_millis(timing.duration));
    let _ = s.set_property("transition-delay", &css_millis(timing.delay));
    let _ = s.set_property("transition-timing-function", &css_easing(timing.easing));
}

fn apply_role(el: &HtmlElement, role: SlideRole) {
    let classes = el.class_list();
    for (r, class) in ROLE_CLASSES {
        let _ = classes.toggle_with_force(class, r == role);
    }
    let hidden = if role == SlideRole::Active {
        "false"
    } else {
        "true"
    };
    let _ = el.set_attribute("aria-hidden", hidden);
}

fn apply_dot(el: &HtmlElement, active: bool) {
    let _ = el.class_list().toggle_with_force(ACTIVE_CLASS, active);
    if active {
        let _ = el.set_attribute("aria-current", "true");
    } else {
        let _ = el.remove_attribute("aria-current");
    }
}

fn apply_control(el: &HtmlElement, state: &ControlState<'_>) {
    let _ = el
        .class_list()
        .toggle_with_force(DISABLED_CLASS, !state.actionable);
    if state.actionable {
        let _ = el.remove_attribute("disabled");
    } else {
        let _ = el.set_attribute("disabled", "");
    }
    let disabled = if state.actionable { "false" } else { "true" };
    let _ = el.set_attribute("aria-disabled", disabled);
    let _ = el.set_attribute("aria-label", state.label);
    // Controls with markup inside (icons) keep it; plain ones show the label.
    if el.child_element_count() == 0 {
        el.set_text_content(Some(state.label));
    }
}

/// Formats a duration as a CSS `<time>` in milliseconds.
fn css_millis(d: Duration) -> String {
    format!("{}ms", d.as_millis_f64())
}

/// Formats an easing as a CSS `<easing-function>`.
fn css_easing(easing: Easing) -> String {
    match easing {
        Easing::Linear => "linear".into(),
        Easing::EaseIn => "ease-in".into(),
        Easing::EaseOut => "ease-out".into(),
        Easing::EaseInOut => "ease-in-out".into(),
        Easing::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1},{y1},{x2},{y2})"),
    }
}
