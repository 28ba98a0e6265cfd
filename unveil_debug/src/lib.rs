// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for unveil
//! diagnostics.
//!
//! This crate provides [`TraceSink`](unveil_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`recorder::RecorderSink`]: compact binary recording, read back with
//!   [`recorder::decode`].
//! - [`chrome::export`]: Chrome Trace Event Format JSON from recorded bytes.
//!
//! Sinks are owned by the controller's tracer. Wrap one in
//! `Rc<RefCell<_>>` to keep reading it while the controller runs.

pub mod chrome;
pub mod pretty;
pub mod recorder;
