// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` timer.
//!
//! [`SettleTimer`] unlocks a deck whose transition never reported every
//! completion (an element without a CSS transition, a detached node, a tab
//! that was hidden mid-transition). At most one timeout is pending; arming
//! the timer again replaces it.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use slideway_core::time::{Duration, HostTime};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods, so the timer
// works without fetching (and unwrapping) the Window object.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A restartable one-shot timeout.
pub struct SettleTimer {
    inner: Rc<TimerInner>,
}

type TimerClosure = Closure<dyn FnMut()>;

struct TimerInner {
    /// The JS closure handed to `setTimeout`; created once and reused.
    closure: RefCell<Option<TimerClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut()>>,

    /// The ID of the pending timeout, if any.
    pending: Cell<Option<i32>>,
}

impl SettleTimer {
    /// Creates a timer that runs `callback` each time it fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(TimerInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });
        let fired = Rc::clone(&inner);
        let closure = Closure::wrap(Box::new(move || {
            fired.pending.set(None);
            if let Ok(mut callback) = fired.callback.try_borrow_mut() {
                callback();
            }
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);
        Self { inner }
    }

    /// Fires the timer once `after` has elapsed, cancelling any pending
    /// timeout.
    pub fn schedule(&self, after: Duration) {
        self.cancel();
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref().unchecked_ref(), timeout_ms(after));
            self.inner.pending.set(Some(id));
        }
    }

    /// Fires the timer at host time `deadline`, or as soon as possible if
    /// it has already passed.
    pub fn schedule_at(&self, deadline: HostTime, now: HostTime) {
        self.schedule(deadline.saturating_duration_since(now));
    }

    /// Cancels the pending timeout, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            clear_timeout(id);
        }
    }

    /// Returns `true` if a timeout is pending.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl Drop for SettleTimer {
    fn drop(&mut self) {
        self.cancel();
        // The closure holds a strong reference to `inner`; dropping it breaks
        // the cycle.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for SettleTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SettleTimer")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

/// Converts a duration to a `setTimeout` delay, rounding up so the timer
/// never fires before the deadline.
fn timeout_ms(after: Duration) -> i32 {
    i32::try_from(after.micros().div_ceil(1_000)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_rounds_up() {
        assert_eq!(timeout_ms(Duration::ZERO), 0);
        assert_eq!(timeout_ms(Duration(1)), 1);
        assert_eq!(timeout_ms(Duration::from_millis(950)), 950);
        assert_eq!(timeout_ms(Duration(950_001)), 951);
    }

    #[test]
    fn deadlines_become_delays() {
        // `schedule_at` waits for what is left until the deadline.
        let now = HostTime(5_000);
        let deadline = now + Duration::from_millis(750);
        assert_eq!(timeout_ms(deadline.saturating_duration_since(now)), 750);
        // A deadline already behind `now` fires on the next task.
        let late = HostTime(1_000).saturating_duration_since(now);
        assert_eq!(timeout_ms(late), 0);
    }

    #[test]
    fn timeout_saturates() {
        assert_eq!(timeout_ms(Duration(u64::MAX)), i32::MAX);
    }
}
