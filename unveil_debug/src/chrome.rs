// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recordings carry no wall-clock time, so the per-instance sequence number
//! is used as the timestamp and each controller instance becomes its own
//! process row. A binding shows up as a duration span from attach to
//! detach; everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let stamp = recorded.stamp();
        let (ts, pid) = (stamp.seq, stamp.instance.0);
        match recorded {
            RecordedEvent::Attach(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Watch",
                    "cat": "Watcher",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "args": {
                        "generation": e.watch.generation(),
                        "threshold": e.threshold,
                        "root_margin": e.margin.to_string(),
                    }
                }));
            }
            RecordedEvent::Detach(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Watch",
                    "cat": "Watcher",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "args": {
                        "generation": e.watch.generation(),
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::Records(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Records",
                    "cat": "Watcher",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "generation": e.watch.generation(),
                        "is_intersecting": e.is_intersecting,
                        "batch_len": e.batch_len,
                    }
                }));
            }
            RecordedEvent::StaleRecords(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "StaleRecords",
                    "cat": "Watcher",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "generation": e.watch.generation(),
                        "batch_len": e.batch_len,
                    }
                }));
            }
            RecordedEvent::TargetMissing(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TargetMissing",
                    "cat": "Mount",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "lookup": format!("{:?}", e.kind),
                    }
                }));
            }
            RecordedEvent::ObserveRefused(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ObserveRefused",
                    "cat": "Mount",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "generation": e.watch.generation(),
                        "error": e.error.to_string(),
                    }
                }));
            }
            RecordedEvent::Transition(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.to),
                    "cat": "State",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "from": format!("{:?}", e.from),
                        "cause": format!("{:?}", e.cause),
                    }
                }));
            }
            RecordedEvent::Click(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Click",
                    "cat": "Input",
                    "ts": ts,
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "accepted": e.accepted,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use unveil_core::controller::DisclosureState;
    use unveil_core::id::{InstanceId, WatchId};
    use unveil_core::margin::RootMargin;
    use unveil_core::trace::{
        AttachEvent, DetachEvent, DetachReason, Stamp, TraceSink, TransitionCause,
        TransitionEvent,
    };

    fn stamp(seq: u64) -> Stamp {
        Stamp {
            instance: InstanceId(4),
            seq,
        }
    }

    #[test]
    fn export_produces_valid_json() {
        let watch = WatchId::from_generation(1);
        let mut rec = RecorderSink::new();
        rec.on_attach(&AttachEvent {
            stamp: stamp(0),
            watch,
            threshold: 1.0,
            margin: RootMargin::ZERO,
        });
        rec.on_transition(&TransitionEvent {
            stamp: stamp(1),
            from: DisclosureState::Hidden,
            to: DisclosureState::Revealed,
            cause: TransitionCause::Intersection,
        });
        rec.on_detach(&DetachEvent {
            stamp: stamp(2),
            watch,
            reason: DetachReason::Revealed,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "B");
        assert_eq!(parsed[0]["pid"], 4);
        assert_eq!(parsed[0]["args"]["root_margin"], "0px");

        assert_eq!(parsed[1]["ph"], "i");
        assert_eq!(parsed[1]["name"], "Revealed");
        assert_eq!(parsed[1]["ts"], 1);

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["args"]["reason"], "Revealed");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
