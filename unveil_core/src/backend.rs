// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability contract for platform integrations.
//!
//! The disclosure state machine never touches a rendering surface. It
//! consumes two platform capabilities through traits defined here:
//!
//! - **Intersection observation**: [`IntersectionObserve`] starts and stops
//!   observing one element with a threshold ratio and root margin. The
//!   platform later reports [`IntersectionRecord`] batches, which the host
//!   routes to
//!   [`DisclosureController::on_records`](crate::controller::DisclosureController::on_records)
//!   together with the [`WatchId`] the batch belongs to.
//!
//! - **Element lookup**: [`ElementLookup`] finds an element by a stable
//!   identifier. It is only consulted in id-addressed mode.
//!
//! # Crate boundaries
//!
//! `unveil_core` owns the state machine and this contract. Backend crates
//! (for example `unveil_backend_web`) implement the traits over real platform
//! APIs; test doubles implement them over scripted data. Application code
//! depends on both and routes deliveries back into the controller.
//!
//! # Delivery pseudocode
//!
//! ```rust,ignore
//! // Platform callback for the binding created under `watch`:
//! fn on_platform_callback(watch: WatchId, entries: &[Entry]) {
//!     let records: Vec<IntersectionRecord> = entries.iter().map(to_record).collect();
//!     controller.on_records(watch, &records);
//!     view.present(&controller.surface());
//! }
//! ```

use core::fmt;

use crate::id::WatchId;
use crate::margin::RootMargin;

/// Construction-time parameters of one observation.
///
/// Platform observers are keyed by these values and cannot be reconfigured,
/// so changing either one means releasing the binding and creating a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserveOptions {
    /// Normalized intersection ratio in `[0, 1]`.
    pub threshold: f64,
    /// Margin applied to the reference viewport.
    pub margin: RootMargin,
}

/// One intersection report from the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionRecord {
    /// Whether the target currently satisfies the observation.
    pub is_intersecting: bool,
    /// Fraction of the target inside the effective root, if the platform
    /// reports it (informational only).
    pub ratio: f64,
}

impl IntersectionRecord {
    /// A record with the given flag and a matching nominal ratio.
    #[must_use]
    pub const fn flag(is_intersecting: bool) -> Self {
        Self {
            is_intersecting,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

/// Why a platform declined to start an observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserveError {
    /// The host has no intersection observation primitive.
    Unsupported,
    /// The primitive rejected the target or options.
    Rejected,
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("intersection observation is not supported"),
            Self::Rejected => f.write_str("intersection observation was rejected"),
        }
    }
}

impl core::error::Error for ObserveError {}

/// Starts and stops platform intersection observations.
///
/// Implementations must deliver records for `watch` in the order the
/// platform reports them, and must stop delivering (or tolerate that
/// deliveries are ignored) after [`unobserve`](Self::unobserve).
pub trait IntersectionObserve {
    /// The platform element type.
    type Target;

    /// Begins observing `target`, tagging every future delivery with `watch`.
    fn observe(
        &mut self,
        watch: WatchId,
        target: &Self::Target,
        options: &ObserveOptions,
    ) -> Result<(), ObserveError>;

    /// Ends the observation created under `watch`.
    fn unobserve(&mut self, watch: WatchId);
}

/// Locates elements by a stable identifier.
pub trait ElementLookup {
    /// The platform element type.
    type Element;

    /// Returns the element currently registered under `id`, if mounted.
    fn find(&self, id: &str) -> Option<Self::Element>;
}

/// A lookup that never finds anything, for hosts that only use
/// reference-addressed triggers.
#[derive(Debug)]
pub struct NoLookup<T>(core::marker::PhantomData<fn() -> T>);

impl<T> NoLookup<T> {
    /// Creates the lookup.
    #[must_use]
    pub const fn new() -> Self {
        Self(core::marker::PhantomData)
    }
}

impl<T> Default for NoLookup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ElementLookup for NoLookup<T> {
    type Element = T;

    fn find(&self, _id: &str) -> Option<T> {
        None
    }
}
