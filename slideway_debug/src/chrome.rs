// Copyright 2026 the Slideway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads a journal from a [`JournalSink`](super::journal::JournalSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//! Each transition becomes a `B`/`E` duration pair; intents and dropped
//! requests become instant events.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use slideway_core::time::HostTime;

use crate::journal::JournalEntry;

/// Exports journal entries as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// `pid` distinguishes decks when several journals are merged.
pub fn export(entries: &[JournalEntry], pid: u32, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::with_capacity(entries.len());

    for entry in entries {
        match entry {
            JournalEntry::Intent(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.intent),
                    "cat": "Input",
                    "ts": us(e.at),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "source": format!("{:?}", e.source),
                        "current": e.current,
                    }
                }));
            }
            JournalEntry::Rejected(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Dropped",
                    "cat": "Input",
                    "ts": us(e.at),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "target": e.target,
                        "current": e.current,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            JournalEntry::Begin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Transition",
                    "cat": "Deck",
                    "ts": us(e.at),
                    "pid": pid,
                    "tid": 0,
                    "args": {
                        "generation": e.generation,
                        "from": e.from,
                        "to": e.to,
                        "pending": e.pending,
                        "deadline_us": us(e.deadline),
                    }
                }));
            }
            JournalEntry::Settled(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Transition",
                    "cat": "Deck",
                    "ts": us(e.at),
                    "pid": pid,
                    "tid": 0,
                    "args": {
                        "generation": e.generation,
                        "index": e.index,
                        "cause": format!("{:?}", e.cause),
                        "outstanding": e.outstanding,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn us(t: HostTime) -> u64 {
    t.micros()
}
