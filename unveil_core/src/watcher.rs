// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-target observation lifecycle.
//!
//! A [`VisibilityWatcher`] owns at most one live binding of one target to an
//! [`IntersectionObserve`] capability. It guarantees:
//!
//! - attaching to an absent target is a no-op;
//! - attaching while bound releases the previous binding first, so there is
//!   never more than one outstanding observation;
//! - [`detach`](VisibilityWatcher::detach) is idempotent;
//! - dropping the watcher releases any live binding.
//!
//! Records reach the watcher through [`accept`](VisibilityWatcher::accept),
//! tagged with the [`WatchId`] they were observed under. Batches for
//! anything but the live binding are dropped, and within a live batch only
//! the first record counts.

use crate::backend::{IntersectionObserve, IntersectionRecord, ObserveOptions};
use crate::id::WatchId;
use crate::trace::{DetachReason, Tracer};

struct Binding<T> {
    watch: WatchId,
    target: T,
    options: ObserveOptions,
}

/// Owns the observation of one target element.
pub struct VisibilityWatcher<O: IntersectionObserve> {
    observer: O,
    active: Option<Binding<O::Target>>,
    next_generation: u32,
}

impl<O: IntersectionObserve> core::fmt::Debug for VisibilityWatcher<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityWatcher")
            .field("active", &self.active.as_ref().map(|b| b.watch))
            .field("next_generation", &self.next_generation)
            .finish_non_exhaustive()
    }
}

impl<O: IntersectionObserve> VisibilityWatcher<O> {
    /// Creates an unbound watcher over the given capability.
    #[must_use]
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            active: None,
            next_generation: 1,
        }
    }

    /// Returns the live binding, if any.
    #[must_use]
    pub fn active(&self) -> Option<WatchId> {
        self.active.as_ref().map(|b| b.watch)
    }

    /// Returns the wrapped capability.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Releases the live binding, if any. Returns the released handle.
    pub fn detach(&mut self, reason: DetachReason, tracer: &mut Tracer) -> Option<WatchId> {
        let binding = self.active.take()?;
        self.observer.unobserve(binding.watch);
        tracer.detach(binding.watch, reason);
        Some(binding.watch)
    }

    /// Consumes a delivered batch.
    ///
    /// Returns the first record's flag when `watch` is the live binding and
    /// the batch is non-empty; `None` otherwise.
    pub fn accept(
        &mut self,
        watch: WatchId,
        records: &[IntersectionRecord],
        tracer: &mut Tracer,
    ) -> Option<bool> {
        if self.active() != Some(watch) {
            tracer.stale_records(watch, records.len());
            return None;
        }
        let first = records.first()?;
        tracer.records(watch, first.is_intersecting, records.len());
        Some(first.is_intersecting)
    }

    fn mint(&mut self) -> WatchId {
        let watch = WatchId::from_generation(self.next_generation);
        self.next_generation = self.next_generation.wrapping_add(1).max(1);
        watch
    }
}

impl<O> VisibilityWatcher<O>
where
    O: IntersectionObserve,
    O::Target: Clone + PartialEq,
{
    /// Whether the live binding already observes `target` with `options`.
    #[must_use]
    pub fn is_bound_to(&self, target: &O::Target, options: &ObserveOptions) -> bool {
        self.active
            .as_ref()
            .is_some_and(|b| b.target == *target && b.options == *options)
    }

    /// Starts observing `target`.
    ///
    /// A `None` target is tolerated and leaves the watcher untouched: the
    /// element may simply not be mounted yet. Any live binding is released
    /// before the new one is created. If the platform refuses, the watcher
    /// ends up unbound and `None` is returned.
    pub fn attach(
        &mut self,
        target: Option<&O::Target>,
        options: ObserveOptions,
        tracer: &mut Tracer,
    ) -> Option<WatchId> {
        let target = target?;
        self.detach(DetachReason::Rebind, tracer);
        let watch = self.mint();
        match self.observer.observe(watch, target, &options) {
            Ok(()) => {
                tracer.attach(watch, &options);
                self.active = Some(Binding {
                    watch,
                    target: target.clone(),
                    options,
                });
                Some(watch)
            }
            Err(error) => {
                tracer.observe_refused(watch, error);
                None
            }
        }
    }
}

impl<O: IntersectionObserve> Drop for VisibilityWatcher<O> {
    fn drop(&mut self) {
        if let Some(binding) = self.active.take() {
            self.observer.unobserve(binding.watch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ObserveError;
    use crate::margin::RootMargin;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        Observe(u32, &'static str),
        Unobserve(u32),
    }

    #[derive(Clone, Default)]
    struct Fake {
        calls: Rc<RefCell<Vec<Call>>>,
        refuse: bool,
    }

    impl IntersectionObserve for Fake {
        type Target = &'static str;

        fn observe(
            &mut self,
            watch: WatchId,
            target: &&'static str,
            _options: &ObserveOptions,
        ) -> Result<(), ObserveError> {
            if self.refuse {
                return Err(ObserveError::Rejected);
            }
            self.calls
                .borrow_mut()
                .push(Call::Observe(watch.generation(), *target));
            Ok(())
        }

        fn unobserve(&mut self, watch: WatchId) {
            self.calls.borrow_mut().push(Call::Unobserve(watch.generation()));
        }
    }

    fn opts(threshold: f64) -> ObserveOptions {
        ObserveOptions {
            threshold,
            margin: RootMargin::ZERO,
        }
    }

    #[test]
    fn absent_target_is_a_no_op() {
        let fake = Fake::default();
        let mut w = VisibilityWatcher::new(fake.clone());
        let mut t = Tracer::none();
        assert_eq!(w.attach(None, opts(1.0), &mut t), None);
        assert!(fake.calls.borrow().is_empty());
        assert_eq!(w.active(), None);
    }

    #[test]
    fn rebinding_detaches_first() {
        let fake = Fake::default();
        let mut w = VisibilityWatcher::new(fake.clone());
        let mut t = Tracer::none();
        let a = w.attach(Some(&"a"), opts(1.0), &mut t).unwrap();
        let b = w.attach(Some(&"b"), opts(0.5), &mut t).unwrap();
        assert_ne!(a, b);
        assert_eq!(
            *fake.calls.borrow(),
            [
                Call::Observe(1, "a"),
                Call::Unobserve(1),
                Call::Observe(2, "b")
            ]
        );
        assert!(w.is_bound_to(&"b", &opts(0.5)));
        assert!(!w.is_bound_to(&"b", &opts(1.0)));
    }

    #[test]
    fn detach_is_idempotent() {
        let fake = Fake::default();
        let mut w = VisibilityWatcher::new(fake.clone());
        let mut t = Tracer::none();
        assert_eq!(w.detach(DetachReason::Teardown, &mut t), None);
        let a = w.attach(Some(&"a"), opts(1.0), &mut t);
        assert_eq!(w.detach(DetachReason::Teardown, &mut t), a);
        assert_eq!(w.detach(DetachReason::Teardown, &mut t), None);
        assert_eq!(fake.calls.borrow().len(), 2);
    }

    #[test]
    fn only_first_record_of_live_batch_counts() {
        let mut w = VisibilityWatcher::new(Fake::default());
        let mut t = Tracer::none();
        let a = w.attach(Some(&"a"), opts(1.0), &mut t).unwrap();
        let batch = [IntersectionRecord::flag(false), IntersectionRecord::flag(true)];
        assert_eq!(w.accept(a, &batch, &mut t), Some(false));
        assert_eq!(w.accept(a, &[], &mut t), None);
    }

    #[test]
    fn stale_batches_are_dropped() {
        let mut w = VisibilityWatcher::new(Fake::default());
        let mut t = Tracer::none();
        let a = w.attach(Some(&"a"), opts(1.0), &mut t).unwrap();
        let _b = w.attach(Some(&"b"), opts(1.0), &mut t).unwrap();
        assert_eq!(
            w.accept(a, &[IntersectionRecord::flag(true)], &mut t),
            None
        );
    }

    #[test]
    fn refusal_leaves_watcher_unbound() {
        let fake = Fake {
            refuse: true,
            ..Fake::default()
        };
        let mut w = VisibilityWatcher::new(fake.clone());
        let mut t = Tracer::none();
        assert_eq!(w.attach(Some(&"a"), opts(1.0), &mut t), None);
        assert_eq!(w.active(), None);
        assert!(fake.calls.borrow().is_empty());
    }

    #[test]
    fn drop_releases_live_binding() {
        let fake = Fake::default();
        {
            let mut w = VisibilityWatcher::new(fake.clone());
            w.attach(Some(&"a"), opts(1.0), &mut Tracer::none());
        }
        assert_eq!(
            *fake.calls.borrow(),
            [Call::Observe(1, "a"), Call::Unobserve(1)]
        );
    }
}
