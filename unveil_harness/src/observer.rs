// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted intersection capability.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use unveil_core::backend::{IntersectionObserve, ObserveError, ObserveOptions};
use unveil_core::id::WatchId;

use crate::lifecycle::{self, LifecycleReport, LifecycleViolation};

/// A fake element. Tests give elements numeric identities and compare them
/// by value, like a platform compares node references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u32);

/// One call made against a [`ScriptedObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Call {
    /// `observe(watch, target, options)` succeeded.
    Observe {
        /// Binding handle.
        watch: WatchId,
        /// Observed element.
        target: ElementHandle,
        /// Construction-time options.
        options: ObserveOptions,
    },
    /// `observe` was refused.
    Refused {
        /// Binding handle that was not created.
        watch: WatchId,
    },
    /// `unobserve(watch)`.
    Unobserve {
        /// Released handle.
        watch: WatchId,
    },
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<Call>,
    refuse_next: Option<ObserveError>,
}

/// An [`IntersectionObserve`] implementation that records every call.
///
/// Clones share the same log, so a test can hand one clone to a controller
/// and keep another for assertions.
#[derive(Clone, Debug, Default)]
pub struct ScriptedObserver {
    script: Rc<RefCell<Script>>,
}

impl ScriptedObserver {
    /// Creates an observer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `observe` call fail with `error`.
    pub fn refuse_next(&self, error: ObserveError) {
        self.script.borrow_mut().refuse_next = Some(error);
    }

    /// Returns a copy of the call log.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.script.borrow().calls.clone()
    }

    /// Number of successful `observe` calls.
    #[must_use]
    pub fn observe_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Observe { .. }))
    }

    /// Number of `unobserve` calls.
    #[must_use]
    pub fn unobserve_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Unobserve { .. }))
    }

    /// Bindings that were observed and not yet released, oldest first.
    #[must_use]
    pub fn live(&self) -> Vec<(WatchId, ElementHandle, ObserveOptions)> {
        let script = self.script.borrow();
        let mut live: Vec<(WatchId, ElementHandle, ObserveOptions)> = Vec::new();
        for call in &script.calls {
            match *call {
                Call::Observe {
                    watch,
                    target,
                    options,
                } => live.push((watch, target, options)),
                Call::Unobserve { watch } => live.retain(|(w, _, _)| *w != watch),
                Call::Refused { .. } => {}
            }
        }
        live
    }

    /// Checks the call log against the single-binding lifecycle rules.
    pub fn lifecycle(&self) -> Result<LifecycleReport, LifecycleViolation> {
        lifecycle::check(&self.script.borrow().calls)
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.script.borrow().calls.iter().filter(|c| pred(c)).count()
    }
}

impl IntersectionObserve for ScriptedObserver {
    type Target = ElementHandle;

    fn observe(
        &mut self,
        watch: WatchId,
        target: &ElementHandle,
        options: &ObserveOptions,
    ) -> Result<(), ObserveError> {
        let mut script = self.script.borrow_mut();
        if let Some(error) = script.refuse_next.take() {
            script.calls.push(Call::Refused { watch });
            return Err(error);
        }
        script.calls.push(Call::Observe {
            watch,
            target: *target,
            options: *options,
        });
        Ok(())
    }

    fn unobserve(&mut self, watch: WatchId) {
        self.script.borrow_mut().calls.push(Call::Unobserve { watch });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::margin::RootMargin;

    const OPTS: ObserveOptions = ObserveOptions {
        threshold: 1.0,
        margin: RootMargin::ZERO,
    };

    #[test]
    fn clones_share_the_log() {
        let observer = ScriptedObserver::new();
        let mut handed_out = observer.clone();
        handed_out
            .observe(WatchId::from_generation(1), &ElementHandle(3), &OPTS)
            .unwrap();
        assert_eq!(observer.observe_count(), 1);
        assert_eq!(observer.live().len(), 1);
        handed_out.unobserve(WatchId::from_generation(1));
        assert!(observer.live().is_empty());
        assert_eq!(observer.unobserve_count(), 1);
    }

    #[test]
    fn refusal_is_one_shot() {
        let observer = ScriptedObserver::new();
        observer.refuse_next(ObserveError::Unsupported);
        let mut o = observer.clone();
        assert_eq!(
            o.observe(WatchId::from_generation(1), &ElementHandle(1), &OPTS),
            Err(ObserveError::Unsupported)
        );
        assert!(
            o.observe(WatchId::from_generation(2), &ElementHandle(1), &OPTS)
                .is_ok()
        );
        assert_eq!(observer.observe_count(), 1);
    }
}
