// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One lazy container wired to the browser.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

use unveil_core::backend::IntersectionRecord;
use unveil_core::config::{Config, Strategy};
use unveil_core::controller::{DisclosureController, DisclosureState};
use unveil_core::id::WatchId;
use unveil_core::options::Options;
use unveil_core::trace::Tracer;
use unveil_core::view::BlockClasses;

use crate::dataset::options_from_dataset;
use crate::lookup::DocumentLookup;
use crate::observer::DomIntersectionSource;
use crate::view::DomView;

type ClickClosure = Closure<dyn FnMut(Event)>;

/// A mounted lazy container.
///
/// Owns the controller, its `IntersectionObserver` binding and the DOM view
/// for one host element. The host itself is the observed trigger: it holds
/// the placeholder while hidden and stays in place when content is swapped
/// in, so reference-mode bindings never need re-creating.
///
/// Dropping the mount releases the observation and detaches listeners; the
/// host is left showing whatever it showed last.
pub struct LazyMount {
    inner: Rc<MountInner>,
}

struct MountInner {
    state: RefCell<MountState>,
    click: ClickClosure,
}

struct MountState {
    controller: DisclosureController<DomIntersectionSource>,
    view: DomView,
    styles: BlockClasses,
    lookup: DocumentLookup,
}

impl LazyMount {
    /// Mounts `host` with `options`.
    pub fn new(host: HtmlElement, options: &Options) -> Result<Self, JsValue> {
        Self::with_tracer(host, options, Tracer::none())
    }

    /// Mounts `host`, reading options from its `data-unveil-*` attributes.
    pub fn from_dataset(host: HtmlElement) -> Result<Self, JsValue> {
        let options = options_from_dataset(&host);
        Self::new(host, &options)
    }

    /// Mounts `host` with `options`, reporting lifecycle events to `tracer`.
    pub fn with_tracer(
        host: HtmlElement,
        options: &Options,
        tracer: Tracer,
    ) -> Result<Self, JsValue> {
        let config = Config::from_options(options);
        if let Some(id) = assigned_id(&config, &host.id()) {
            host.set_id(id);
        }
        let styles = BlockClasses::new(config.block_class.as_deref());
        let document = host
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host element has no owner document"))?;
        let view = DomView::new(host, &styles)?;

        let inner = Rc::new_cyclic(|weak: &Weak<MountInner>| {
            let on_records = weak.clone();
            let source = DomIntersectionSource::new(move |watch, records| {
                if let Some(inner) = on_records.upgrade() {
                    inner.deliver(watch, records);
                }
            });
            let on_click = weak.clone();
            let click = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(inner) = on_click.upgrade() {
                    inner.clicked();
                }
            }) as Box<dyn FnMut(Event)>);

            MountInner {
                state: RefCell::new(MountState {
                    controller: DisclosureController::new(config, source).with_tracer(tracer),
                    view,
                    styles,
                    lookup: DocumentLookup::new(document),
                }),
                click,
            }
        });

        let mount = Self { inner };
        mount.refresh()?;
        Ok(mount)
    }

    /// Mounts every `[data-unveil]` element under `document`.
    ///
    /// Elements that fail to mount are skipped; the error of the last such
    /// element is returned if none succeeded.
    pub fn mount_all(document: &Document) -> Result<Vec<Self>, JsValue> {
        let nodes = document.query_selector_all("[data-unveil]")?;
        let mut mounts = Vec::new();
        let mut last_error = None;
        for i in 0..nodes.length() {
            let Some(host) = nodes
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            match Self::from_dataset(host) {
                Ok(mount) => mounts.push(mount),
                Err(error) => last_error = Some(error),
            }
        }
        match last_error {
            Some(error) if mounts.is_empty() => Err(error),
            _ => Ok(mounts),
        }
    }

    /// Runs a mount pass: redraws the host if an earlier render failed,
    /// re-locates an id-addressed target and (re)binds the observer if
    /// needed.
    ///
    /// Call this after page scripts replace elements the container watches.
    pub fn refresh(&self) -> Result<(), JsValue> {
        self.inner.render()?;
        if let Ok(mut state) = self.inner.state.try_borrow_mut() {
            let state = &mut *state;
            let host: &Element = state.view.host();
            state.controller.mount(Some(host), &state.lookup);
        }
        Ok(())
    }

    /// Current disclosure state.
    #[must_use]
    pub fn state(&self) -> DisclosureState {
        self.inner.state.borrow().controller.state()
    }

    /// The host element.
    #[must_use]
    pub fn host(&self) -> HtmlElement {
        self.inner.state.borrow().view.host().clone()
    }
}

/// The id `host` must carry for an id-addressed lookup to find it.
///
/// Only toggle mode locates its target by id; a host that already has an id
/// keeps it.
fn assigned_id<'a>(config: &'a Config, current: &str) -> Option<&'a str> {
    match &config.strategy {
        Strategy::Toggle {
            target_id: Some(id),
        } if current.is_empty() => Some(id.as_str()),
        _ => None,
    }
}

impl MountInner {
    fn deliver(&self, watch: WatchId, records: &[IntersectionRecord]) {
        let changed = match self.state.try_borrow_mut() {
            Ok(mut state) => state.controller.on_records(watch, records),
            Err(_) => return,
        };
        // A failed render leaves the view blank; `refresh` or the next
        // transition draws it again.
        if changed {
            let _ = self.render();
        }
    }

    fn clicked(&self) {
        let changed = match self.state.try_borrow_mut() {
            Ok(mut state) => state.controller.user_clicked(),
            Err(_) => return,
        };
        if changed {
            let _ = self.render();
        }
    }

    fn render(&self) -> Result<(), JsValue> {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return Ok(());
        };
        let state = &mut *state;
        let surface = state.controller.surface();
        state
            .view
            .present(surface, &state.styles, self.click.as_ref().unchecked_ref())
    }
}

impl Drop for LazyMount {
    fn drop(&mut self) {
        if let Ok(mut state) = self.inner.state.try_borrow_mut() {
            state.controller.teardown();
        }
    }
}

impl core::fmt::Debug for LazyMount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.state.try_borrow() {
            Ok(state) => f
                .debug_struct("LazyMount")
                .field("controller", &state.controller)
                .field("view", &state.view)
                .finish(),
            Err(_) => f.debug_struct("LazyMount").finish_non_exhaustive(),
        }
    }
}
