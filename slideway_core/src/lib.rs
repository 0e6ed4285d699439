// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide deck state machine with counted-completion transitions.
//!
//! `slideway_core` owns everything about a slideshow that does not depend on
//! a particular platform: the ordered set of slides, the current index, the
//! transition lock, and the mapping from raw input to navigation intents. It
//! is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Input adapters (keys, wheel, swipe, clicks)
//!       │ NavIntent
//!       ▼
//!   SlideDeck::dispatch() ──► Animator::animate() per slide / dot / control
//!       ▲                              │
//!       │ CompletionToken              │ Completion::Pending
//!       └── SlideDeck::complete() ◄────┘   (or SlideDeck::poll() on timeout)
//! ```
//!
//! **[`deck`]**: The [`SlideDeck`](deck::SlideDeck) controller. Accepts at
//! most one transition at a time and drops navigation requested while one
//! is running.
//!
//! **[`animator`]**: The [`Animator`](animator::Animator) capability that
//! platform backends implement to move elements between visual states.
//!
//! **[`input`]**: Adapters from keyboard keys, wheel deltas, touch swipes,
//! and control clicks to [`NavIntent`](input::NavIntent)s.
//!
//! **[`config`]**: [`DeckConfig`](config::DeckConfig) and its presets.
//!
//! **[`time`]**: Microsecond host time and durations.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! navigation instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animator;
pub mod config;
pub mod deck;
pub mod input;
pub mod time;
pub mod trace;
