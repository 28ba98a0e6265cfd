// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrollable viewport that derives deliveries from geometry.
//!
//! Elements are placed as rectangles in page coordinates and the viewport is
//! a window onto the page. [`Viewport::pending`] plays the role of the
//! platform: for every binding the [`ScriptedObserver`] holds, it computes
//! the record the platform would report and emits it when the binding is
//! new or its flag changed since the last delivery.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};
use unveil_core::backend::IntersectionRecord;
use unveil_core::controller::DisclosureController;
use unveil_core::geometry;
use unveil_core::id::WatchId;

use crate::observer::{ElementHandle, ScriptedObserver};

/// A simulated page viewport.
#[derive(Clone, Debug)]
pub struct Viewport {
    frame: Rect,
    elements: BTreeMap<ElementHandle, Rect>,
    delivered: Vec<(WatchId, bool)>,
}

impl Viewport {
    /// Creates a viewport of `size` scrolled to the page origin.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            frame: Rect::from_origin_size((0.0, 0.0), size),
            elements: BTreeMap::new(),
            delivered: Vec::new(),
        }
    }

    /// The visible region in page coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Places (or moves) `element` at `bounds`.
    pub fn place(&mut self, element: ElementHandle, bounds: Rect) {
        self.elements.insert(element, bounds);
    }

    /// Removes `element` from the page.
    pub fn remove(&mut self, element: ElementHandle) {
        self.elements.remove(&element);
    }

    /// Scrolls so that the top of the viewport sits at `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.frame = self.frame.with_origin((self.frame.x0, y));
    }

    /// Scrolls vertically by `dy`.
    pub fn scroll_by(&mut self, dy: f64) {
        self.frame = self.frame + Vec2::new(0.0, dy);
    }

    /// Computes the deliveries the platform would make now.
    ///
    /// Each live binding gets one record when first seen and another each
    /// time its flag flips. Bindings whose element is not placed produce
    /// nothing.
    pub fn pending(&mut self, observer: &ScriptedObserver) -> Vec<(WatchId, IntersectionRecord)> {
        let live = observer.live();
        self.delivered
            .retain(|(watch, _)| live.iter().any(|(w, _, _)| w == watch));

        let mut out = Vec::new();
        for (watch, target, options) in live {
            let Some(bounds) = self.elements.get(&target) else {
                continue;
            };
            let record =
                geometry::observe_rect(*bounds, self.frame, &options.margin, options.threshold);
            match self.delivered.iter_mut().find(|(w, _)| *w == watch) {
                Some((_, last)) if *last == record.is_intersecting => {}
                Some((_, last)) => {
                    *last = record.is_intersecting;
                    out.push((watch, record));
                }
                None => {
                    self.delivered.push((watch, record.is_intersecting));
                    out.push((watch, record));
                }
            }
        }
        out
    }

    /// Delivers everything [`pending`](Self::pending) for `controller`, one
    /// single-record batch at a time. Returns `true` if its state changed.
    pub fn deliver(&mut self, controller: &mut DisclosureController<ScriptedObserver>) -> bool {
        let mut changed = false;
        for (watch, record) in self.pending(controller.observer()) {
            changed |= controller.on_records(watch, &[record]);
        }
        changed
    }
}
