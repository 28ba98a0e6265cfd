// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the disclosure lifecycle.
//!
//! This module provides a [`TraceSink`] trait with one method per lifecycle
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink and stamps each event with the
//! controller's [`InstanceId`] and a per-instance sequence number. When the
//! `trace` feature is **off**, every `Tracer` method compiles to nothing.
//! When **on**, each method performs a single `Option` branch before
//! dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::backend::{ObserveError, ObserveOptions};
use crate::controller::DisclosureState;
use crate::id::{InstanceId, WatchId};
use crate::margin::RootMargin;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a binding was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetachReason {
    /// Reveal-once disclosure completed; the watcher is single-shot.
    Revealed,
    /// The target or observation parameters changed.
    Rebind,
    /// The id-addressed target is no longer in the document.
    TargetLost,
    /// The owning controller was torn down.
    Teardown,
}

/// What caused a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionCause {
    /// An intersection record.
    Intersection,
    /// A user click on the trigger button.
    Click,
}

/// How the controller tried to locate its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The trigger element handed over by the host.
    Reference,
    /// Lookup by configured id.
    Id,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Identifies the emitting controller and orders its events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stamp {
    /// Emitting controller.
    pub instance: InstanceId,
    /// Per-instance sequence number, starting at zero.
    pub seq: u64,
}

/// Emitted when a watcher starts observing a target.
#[derive(Clone, Copy, Debug)]
pub struct AttachEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// The new binding.
    pub watch: WatchId,
    /// Normalized threshold ratio.
    pub threshold: f64,
    /// Effective root margin.
    pub margin: RootMargin,
}

/// Emitted when a watcher releases its binding.
#[derive(Clone, Copy, Debug)]
pub struct DetachEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// The released binding.
    pub watch: WatchId,
    /// Why it was released.
    pub reason: DetachReason,
}

/// Emitted when a batch of records for the active binding is consumed.
#[derive(Clone, Copy, Debug)]
pub struct RecordsEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// Binding the batch belongs to.
    pub watch: WatchId,
    /// Flag of the authoritative (first) record.
    pub is_intersecting: bool,
    /// Number of records in the batch.
    pub batch_len: u32,
}

/// Emitted when records arrive for a binding that is no longer active.
#[derive(Clone, Copy, Debug)]
pub struct StaleRecordsEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// Binding the batch was tagged with.
    pub watch: WatchId,
    /// Number of records dropped.
    pub batch_len: u32,
}

/// Emitted when a mount pass could not locate the target.
#[derive(Clone, Copy, Debug)]
pub struct TargetMissingEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// Which lookup failed.
    pub kind: TargetKind,
}

/// Emitted when the platform declined to observe.
#[derive(Clone, Copy, Debug)]
pub struct ObserveRefusedEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// The binding that was not created.
    pub watch: WatchId,
    /// Platform error.
    pub error: ObserveError,
}

/// Emitted on every disclosure state change.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// Previous state.
    pub from: DisclosureState,
    /// New state.
    pub to: DisclosureState,
    /// What caused it.
    pub cause: TransitionCause,
}

/// Emitted for every user click delivered to the controller.
#[derive(Clone, Copy, Debug)]
pub struct ClickEvent {
    /// Origin and ordering.
    pub stamp: Stamp,
    /// Whether the click was acted on (click trigger configured).
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives lifecycle events from a
/// [`DisclosureController`](crate::controller::DisclosureController).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a binding is created.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called when a binding is released.
    fn on_detach(&mut self, e: &DetachEvent) {
        _ = e;
    }

    /// Called when a batch for the active binding is consumed.
    fn on_records(&mut self, e: &RecordsEvent) {
        _ = e;
    }

    /// Called when a batch for a released binding is dropped.
    fn on_stale_records(&mut self, e: &StaleRecordsEvent) {
        _ = e;
    }

    /// Called when a mount pass found no target.
    fn on_target_missing(&mut self, e: &TargetMissingEvent) {
        _ = e;
    }

    /// Called when the platform refused to observe.
    fn on_observe_refused(&mut self, e: &ObserveRefusedEvent) {
        _ = e;
    }

    /// Called on every state change.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called for every delivered click.
    fn on_click(&mut self, e: &ClickEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Shares one sink between a [`Tracer`] and whoever reads it back, or
/// between several controllers.
impl<S: TraceSink + ?Sized> TraceSink for Rc<RefCell<S>> {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.borrow_mut().on_attach(e);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.borrow_mut().on_detach(e);
    }

    fn on_records(&mut self, e: &RecordsEvent) {
        self.borrow_mut().on_records(e);
    }

    fn on_stale_records(&mut self, e: &StaleRecordsEvent) {
        self.borrow_mut().on_stale_records(e);
    }

    fn on_target_missing(&mut self, e: &TargetMissingEvent) {
        self.borrow_mut().on_target_missing(e);
    }

    fn on_observe_refused(&mut self, e: &ObserveRefusedEvent) {
        self.borrow_mut().on_observe_refused(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.borrow_mut().on_transition(e);
    }

    fn on_click(&mut self, e: &ClickEvent) {
        self.borrow_mut().on_click(e);
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owns an optional [`TraceSink`] and stamps outgoing events.
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink passed to [`Tracer::new`] is dropped immediately.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
    #[cfg(feature = "trace")]
    instance: InstanceId,
    #[cfg(feature = "trace")]
    seq: u64,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::none()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to `sink`, stamping events with
    /// `instance`.
    #[inline]
    #[must_use]
    pub fn new(instance: InstanceId, sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                sink: Some(sink),
                instance,
                seq: 0,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (instance, sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                sink: None,
                instance: InstanceId::default(),
                seq: 0,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {}
        }
    }

    #[cfg(feature = "trace")]
    #[inline]
    fn dispatch(&mut self, emit: impl FnOnce(&mut dyn TraceSink, Stamp)) {
        if let Some(sink) = self.sink.as_deref_mut() {
            let stamp = Stamp {
                instance: self.instance,
                seq: self.seq,
            };
            self.seq += 1;
            emit(sink, stamp);
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, watch: WatchId, options: &ObserveOptions) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_attach(&AttachEvent {
                stamp,
                watch,
                threshold: options.threshold,
                margin: options.margin,
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (watch, options);
        }
    }

    /// Emits a [`DetachEvent`].
    #[inline]
    pub fn detach(&mut self, watch: WatchId, reason: DetachReason) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_detach(&DetachEvent {
                stamp,
                watch,
                reason,
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (watch, reason);
        }
    }

    /// Emits a [`RecordsEvent`].
    #[inline]
    pub fn records(&mut self, watch: WatchId, is_intersecting: bool, batch_len: usize) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_records(&RecordsEvent {
                stamp,
                watch,
                is_intersecting,
                batch_len: saturate(batch_len),
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (watch, is_intersecting, batch_len);
        }
    }

    /// Emits a [`StaleRecordsEvent`].
    #[inline]
    pub fn stale_records(&mut self, watch: WatchId, batch_len: usize) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_stale_records(&StaleRecordsEvent {
                stamp,
                watch,
                batch_len: saturate(batch_len),
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (watch, batch_len);
        }
    }

    /// Emits a [`TargetMissingEvent`].
    #[inline]
    pub fn target_missing(&mut self, kind: TargetKind) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| s.on_target_missing(&TargetMissingEvent { stamp, kind }));
        #[cfg(not(feature = "trace"))]
        {
            _ = kind;
        }
    }

    /// Emits an [`ObserveRefusedEvent`].
    #[inline]
    pub fn observe_refused(&mut self, watch: WatchId, error: ObserveError) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_observe_refused(&ObserveRefusedEvent {
                stamp,
                watch,
                error,
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (watch, error);
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(
        &mut self,
        from: DisclosureState,
        to: DisclosureState,
        cause: TransitionCause,
    ) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| {
            s.on_transition(&TransitionEvent {
                stamp,
                from,
                to,
                cause,
            });
        });
        #[cfg(not(feature = "trace"))]
        {
            _ = (from, to, cause);
        }
    }

    /// Emits a [`ClickEvent`].
    #[inline]
    pub fn click(&mut self, accepted: bool) {
        #[cfg(feature = "trace")]
        self.dispatch(|s, stamp| s.on_click(&ClickEvent { stamp, accepted }));
        #[cfg(not(feature = "trace"))]
        {
            _ = accepted;
        }
    }
}

#[cfg(feature = "trace")]
fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
