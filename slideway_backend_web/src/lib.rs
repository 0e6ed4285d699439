// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for slideway.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`CssAnimator`]: slide roles, dot and control state as classes and
//!   attributes, with `transitionend` completion reporting
//! - [`SettleTimer`]: `setTimeout` safety net for transitions that never
//!   report
//! - [`mount`]: discovers a deck in the DOM and binds keyboard, wheel,
//!   touch and click input to it
//! - [`ConsoleSink`]: trace events on the browser console

#![no_std]

extern crate alloc;

mod animator;
mod console;
mod listener;
mod mount;
mod timer;

pub use animator::{CompletionHandler, CssAnimator};
pub use console::ConsoleSink;
pub use mount::{DeckHandle, MountError, Selectors, mount};
pub use slideway_core::animator::Animator;
pub use timer::SettleTimer;

use slideway_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microseconds since the page's time
/// origin.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(timer::performance_now())
}

