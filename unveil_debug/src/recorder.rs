// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Every record starts with a one-byte tag followed by the event
//! [`Stamp`] (`u32` instance, `u64` sequence number).

use unveil_core::backend::ObserveError;
use unveil_core::controller::DisclosureState;
use unveil_core::id::{InstanceId, WatchId};
use unveil_core::margin::{Length, RootMargin};
use unveil_core::trace::{
    AttachEvent, ClickEvent, DetachEvent, DetachReason, ObserveRefusedEvent, RecordsEvent,
    StaleRecordsEvent, Stamp, TargetKind, TargetMissingEvent, TraceSink, TransitionCause,
    TransitionEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_ATTACH: u8 = 1;
const TAG_DETACH: u8 = 2;
const TAG_RECORDS: u8 = 3;
const TAG_STALE_RECORDS: u8 = 4;
const TAG_TARGET_MISSING: u8 = 5;
const TAG_OBSERVE_REFUSED: u8 = 6;
const TAG_TRANSITION: u8 = 7;
const TAG_CLICK: u8 = 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_header(&mut self, tag: u8, stamp: Stamp) {
        self.write_u8(tag);
        self.write_u32(stamp.instance.0);
        self.write_u64(stamp.seq);
    }

    fn write_watch(&mut self, watch: WatchId) {
        self.write_u32(watch.generation());
    }

    fn write_length(&mut self, length: Length) {
        match length {
            Length::Px(v) => {
                self.write_u8(0);
                self.write_f64(v);
            }
            Length::Percent(v) => {
                self.write_u8(1);
                self.write_f64(v);
            }
        }
    }

    fn write_margin(&mut self, margin: &RootMargin) {
        self.write_length(margin.top);
        self.write_length(margin.right);
        self.write_length(margin.bottom);
        self.write_length(margin.left);
    }

    fn write_state(&mut self, state: DisclosureState) {
        self.write_bool(state.is_revealed());
    }
}

impl TraceSink for RecorderSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.write_header(TAG_ATTACH, e.stamp);
        self.write_watch(e.watch);
        self.write_f64(e.threshold);
        self.write_margin(&e.margin);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.write_header(TAG_DETACH, e.stamp);
        self.write_watch(e.watch);
        self.write_u8(match e.reason {
            DetachReason::Revealed => 0,
            DetachReason::Rebind => 1,
            DetachReason::TargetLost => 2,
            DetachReason::Teardown => 3,
        });
    }

    fn on_records(&mut self, e: &RecordsEvent) {
        self.write_header(TAG_RECORDS, e.stamp);
        self.write_watch(e.watch);
        self.write_bool(e.is_intersecting);
        self.write_u32(e.batch_len);
    }

    fn on_stale_records(&mut self, e: &StaleRecordsEvent) {
        self.write_header(TAG_STALE_RECORDS, e.stamp);
        self.write_watch(e.watch);
        self.write_u32(e.batch_len);
    }

    fn on_target_missing(&mut self, e: &TargetMissingEvent) {
        self.write_header(TAG_TARGET_MISSING, e.stamp);
        self.write_u8(match e.kind {
            TargetKind::Reference => 0,
            TargetKind::Id => 1,
        });
    }

    fn on_observe_refused(&mut self, e: &ObserveRefusedEvent) {
        self.write_header(TAG_OBSERVE_REFUSED, e.stamp);
        self.write_watch(e.watch);
        self.write_u8(match e.error {
            ObserveError::Unsupported => 0,
            ObserveError::Rejected => 1,
        });
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_header(TAG_TRANSITION, e.stamp);
        self.write_state(e.from);
        self.write_state(e.to);
        self.write_u8(match e.cause {
            TransitionCause::Intersection => 0,
            TransitionCause::Click => 1,
        });
    }

    fn on_click(&mut self, e: &ClickEvent) {
        self.write_header(TAG_CLICK, e.stamp);
        self.write_bool(e.accepted);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// An [`AttachEvent`].
    Attach(AttachEvent),
    /// A [`DetachEvent`].
    Detach(DetachEvent),
    /// A [`RecordsEvent`].
    Records(RecordsEvent),
    /// A [`StaleRecordsEvent`].
    StaleRecords(StaleRecordsEvent),
    /// A [`TargetMissingEvent`].
    TargetMissing(TargetMissingEvent),
    /// An [`ObserveRefusedEvent`].
    ObserveRefused(ObserveRefusedEvent),
    /// A [`TransitionEvent`].
    Transition(TransitionEvent),
    /// A [`ClickEvent`].
    Click(ClickEvent),
}

impl RecordedEvent {
    /// The stamp common to every event.
    #[must_use]
    pub fn stamp(&self) -> Stamp {
        match self {
            Self::Attach(e) => e.stamp,
            Self::Detach(e) => e.stamp,
            Self::Records(e) => e.stamp,
            Self::StaleRecords(e) => e.stamp,
            Self::TargetMissing(e) => e.stamp,
            Self::ObserveRefused(e) => e.stamp,
            Self::Transition(e) => e.stamp,
            Self::Click(e) => e.stamp,
        }
    }

    /// Short event name, as used by the exporters.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attach(_) => "Attach",
            Self::Detach(_) => "Detach",
            Self::Records(_) => "Records",
            Self::StaleRecords(_) => "StaleRecords",
            Self::TargetMissing(_) => "TargetMissing",
            Self::ObserveRefused(_) => "ObserveRefused",
            Self::Transition(_) => "Transition",
            Self::Click(_) => "Click",
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|b| b != 0)
    }

    fn read_stamp(&mut self) -> Option<Stamp> {
        Some(Stamp {
            instance: InstanceId(self.read_u32()?),
            seq: self.read_u64()?,
        })
    }

    fn read_watch(&mut self) -> Option<WatchId> {
        self.read_u32().map(WatchId::from_generation)
    }

    fn read_length(&mut self) -> Option<Length> {
        let unit = self.read_u8()?;
        let v = self.read_f64()?;
        Some(if unit == 0 {
            Length::Px(v)
        } else {
            Length::Percent(v)
        })
    }

    fn read_margin(&mut self) -> Option<RootMargin> {
        Some(RootMargin {
            top: self.read_length()?,
            right: self.read_length()?,
            bottom: self.read_length()?,
            left: self.read_length()?,
        })
    }

    fn read_state(&mut self) -> Option<DisclosureState> {
        self.read_bool().map(DisclosureState::from_visible)
    }

    fn decode_attach(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::Attach(AttachEvent {
            stamp,
            watch: self.read_watch()?,
            threshold: self.read_f64()?,
            margin: self.read_margin()?,
        }))
    }

    fn decode_detach(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::Detach(DetachEvent {
            stamp,
            watch: self.read_watch()?,
            reason: match self.read_u8()? {
                0 => DetachReason::Revealed,
                1 => DetachReason::Rebind,
                2 => DetachReason::TargetLost,
                _ => DetachReason::Teardown,
            },
        }))
    }

    fn decode_records(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::Records(RecordsEvent {
            stamp,
            watch: self.read_watch()?,
            is_intersecting: self.read_bool()?,
            batch_len: self.read_u32()?,
        }))
    }

    fn decode_stale_records(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::StaleRecords(StaleRecordsEvent {
            stamp,
            watch: self.read_watch()?,
            batch_len: self.read_u32()?,
        }))
    }

    fn decode_target_missing(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        let kind = match self.read_u8()? {
            0 => TargetKind::Reference,
            _ => TargetKind::Id,
        };
        Some(RecordedEvent::TargetMissing(TargetMissingEvent { stamp, kind }))
    }

    fn decode_observe_refused(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::ObserveRefused(ObserveRefusedEvent {
            stamp,
            watch: self.read_watch()?,
            error: match self.read_u8()? {
                0 => ObserveError::Unsupported,
                _ => ObserveError::Rejected,
            },
        }))
    }

    fn decode_transition(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::Transition(TransitionEvent {
            stamp,
            from: self.read_state()?,
            to: self.read_state()?,
            cause: match self.read_u8()? {
                0 => TransitionCause::Intersection,
                _ => TransitionCause::Click,
            },
        }))
    }

    fn decode_click(&mut self, stamp: Stamp) -> Option<RecordedEvent> {
        Some(RecordedEvent::Click(ClickEvent {
            stamp,
            accepted: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let stamp = self.read_stamp()?;
        match tag {
            TAG_ATTACH => self.decode_attach(stamp),
            TAG_DETACH => self.decode_detach(stamp),
            TAG_RECORDS => self.decode_records(stamp),
            TAG_STALE_RECORDS => self.decode_stale_records(stamp),
            TAG_TARGET_MISSING => self.decode_target_missing(stamp),
            TAG_OBSERVE_REFUSED => self.decode_observe_refused(stamp),
            TAG_TRANSITION => self.decode_transition(stamp),
            TAG_CLICK => self.decode_click(stamp),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
