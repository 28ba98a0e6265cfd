// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for unveil.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomIntersectionSource`]: `IntersectionObserver` capability
//! - [`DocumentLookup`]: `getElementById` lookup
//! - [`DomView`]: placeholder and deferred-content swapping
//! - [`options_from_dataset`]: options from `data-unveil-*` attributes
//! - [`LazyMount`]: all of the above wired to one host element

#![no_std]

extern crate alloc;

pub mod dataset;
mod lookup;
mod mount;
mod observer;
mod view;

pub use dataset::options_from_dataset;
pub use lookup::DocumentLookup;
pub use mount::LazyMount;
pub use observer::DomIntersectionSource;
pub use unveil_core::backend::{ElementLookup, IntersectionObserve};
pub use view::DomView;
