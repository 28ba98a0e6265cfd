// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles and simulators for `unveil_core`.
//!
//! - [`ScriptedObserver`]: an intersection capability that records every
//!   call, shared between a controller and the test that drives it.
//! - [`StaticLookup`]: an id table standing in for a document.
//! - [`Viewport`]: rectangles on a scrollable page, turned into deliveries
//!   with the same geometry a browser uses.
//! - [`lifecycle::check`]: verifies that a call log never overlaps bindings
//!   and releases each one exactly once.

#![no_std]

extern crate alloc;

pub mod lifecycle;
mod lookup;
mod observer;
mod viewport;

pub use lifecycle::{LifecycleReport, LifecycleViolation};
pub use lookup::StaticLookup;
pub use observer::{Call, ElementHandle, ScriptedObserver};
pub use viewport::Viewport;
