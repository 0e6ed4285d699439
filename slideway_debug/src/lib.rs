// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Journaling, pretty-printing, and Chrome trace export for slideway
//! diagnostics.
//!
//! This crate provides [`TraceSink`](slideway_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`journal::JournalSink`]: in-memory event log with summary queries.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from a
//!   journal.

pub mod chrome;
pub mod journal;
pub mod pretty;
