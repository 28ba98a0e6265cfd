// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver`-backed observation.
//!
//! Browser observers are configured at construction, so
//! [`DomIntersectionSource`] creates one `IntersectionObserver` per binding
//! and disconnects it on release. Batches are forwarded, tagged with the
//! binding's [`WatchId`], to the delivery callback given at construction.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::{self, Array};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use unveil_core::backend::{IntersectionObserve, IntersectionRecord, ObserveError, ObserveOptions};
use unveil_core::id::WatchId;

type EntriesClosure = Closure<dyn FnMut(Array)>;

type Delivery = Rc<dyn Fn(WatchId, &[IntersectionRecord])>;

struct Live {
    watch: WatchId,
    observer: IntersectionObserver,
    callback: EntriesClosure,
}

/// An [`IntersectionObserve`] capability over the browser's
/// `IntersectionObserver`.
///
/// A released binding's JS closure is parked rather than dropped, because
/// release usually happens from inside that closure's own invocation (a
/// reveal-once controller detaches while handling the record). Parked
/// closures are freed on the next [`observe`](IntersectionObserve::observe)
/// or when the source is dropped. Consequently `observe` must not be called
/// from within a delivery.
pub struct DomIntersectionSource {
    deliver: Delivery,
    live: Option<Live>,
    retired: Vec<EntriesClosure>,
}

impl core::fmt::Debug for DomIntersectionSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomIntersectionSource")
            .field("live", &self.live.as_ref().map(|l| l.watch))
            .field("retired", &self.retired.len())
            .finish_non_exhaustive()
    }
}

impl DomIntersectionSource {
    /// Creates a source that hands every delivered batch to `deliver`.
    pub fn new(deliver: impl Fn(WatchId, &[IntersectionRecord]) + 'static) -> Self {
        Self {
            deliver: Rc::new(deliver),
            live: None,
            retired: Vec::new(),
        }
    }

    /// Whether the global object exposes `IntersectionObserver`.
    #[must_use]
    pub fn is_supported() -> bool {
        js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(live) = self.live.take() {
            live.observer.disconnect();
            self.retired.push(live.callback);
        }
    }
}

fn records(entries: &Array) -> Vec<IntersectionRecord> {
    entries
        .iter()
        .map(|value| {
            let entry: IntersectionObserverEntry = value.unchecked_into();
            IntersectionRecord {
                is_intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            }
        })
        .collect()
}

impl IntersectionObserve for DomIntersectionSource {
    type Target = Element;

    fn observe(
        &mut self,
        watch: WatchId,
        target: &Element,
        options: &ObserveOptions,
    ) -> Result<(), ObserveError> {
        if !Self::is_supported() {
            return Err(ObserveError::Unsupported);
        }
        self.release();
        self.retired.clear();

        let deliver = Rc::clone(&self.deliver);
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            deliver(watch, &records(&entries));
        }) as Box<dyn FnMut(Array)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.margin.to_string());
        init.set_threshold(&JsValue::from_f64(options.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|_| ObserveError::Rejected)?;
        observer.observe(target);

        self.live = Some(Live {
            watch,
            observer,
            callback,
        });
        Ok(())
    }

    fn unobserve(&mut self, watch: WatchId) {
        if self.live.as_ref().is_some_and(|l| l.watch == watch) {
            self.release();
        }
    }
}

impl Drop for DomIntersectionSource {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.observer.disconnect();
        }
    }
}
