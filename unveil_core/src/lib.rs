// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-triggered disclosure for deferred page content.
//!
//! `unveil_core` decides when a lazy container swaps its lightweight
//! placeholder for its real content. It is `no_std` compatible (with
//! `alloc`) and never touches a rendering surface: platform observation and
//! element lookup come in through capability traits, and the host renders
//! whatever [`Surface`](view::Surface) the controller reports.
//!
//! # Architecture
//!
//! ```text
//!   Options ──► Config::from_options() ──► DisclosureController
//!                                               │
//!           host mount pass ──► mount() ────────┤──► VisibilityWatcher
//!                                               │        │ observe/unobserve
//!                                               │        ▼
//!                                               │    IntersectionObserve (backend)
//!                                               │        │ records (WatchId-tagged)
//!           platform delivery ──► on_records() ◄┘◄───────┘
//!           button click ──► user_clicked()
//!                                               │
//!                                               ▼
//!                                   surface() ──► host renders
//! ```
//!
//! **[`threshold`]**: percentage → intersection ratio, falling back to full
//! visibility.
//!
//! **[`margin`]**: CSS-style root margin parsing, canonical output and
//! resolution against a viewport rectangle.
//!
//! **[`geometry`]**: reference intersection math on `kurbo` rectangles.
//!
//! **[`options`]** and **[`config`]**: the flat option set and its
//! never-failing resolution into a closed [`Strategy`](config::Strategy).
//!
//! **[`backend`]**: the [`IntersectionObserve`](backend::IntersectionObserve)
//! and [`ElementLookup`](backend::ElementLookup) capability traits.
//!
//! **[`watcher`]**: single-binding observation lifecycle with stale
//! delivery filtering.
//!
//! **[`controller`]**: the disclosure state machine.
//!
//! **[`view`]**: placeholder/content composition and style resolution.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and lifecycle event
//! types, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod id;
pub mod margin;
pub mod options;
pub mod threshold;
pub mod trace;
pub mod view;
pub mod watcher;
