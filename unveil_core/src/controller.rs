// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The disclosure state machine.
//!
//! One [`DisclosureController`] backs one lazy container. It owns the
//! [`DisclosureState`] and a [`VisibilityWatcher`], and reacts to three
//! inputs from its host:
//!
//! - [`mount`](DisclosureController::mount): a render/mount pass. The
//!   controller (re)locates its target and binds the watcher if needed.
//! - [`on_records`](DisclosureController::on_records): a platform delivery.
//! - [`user_clicked`](DisclosureController::user_clicked): a click on the
//!   placeholder button.
//!
//! Behavior per [`Strategy`]:
//!
//! ```text
//!   Click       Hidden ──click──► Revealed            (never watches)
//!
//!   RevealOnce  Hidden ──record(true)──► Revealed     (watcher released,
//!                 ▲  └──record(false)──┘                never re-created)
//!                 └─ mount binds trigger element
//!
//!   Toggle      Hidden ◄──record(false)── Revealed
//!                      ───record(true)──►
//!               mount re-looks-up target by id and rebinds when it changed
//! ```
//!
//! Teardown, explicit or by drop, releases the watcher in every strategy.

use crate::backend::{ElementLookup, IntersectionObserve, IntersectionRecord};
use crate::config::{Config, Strategy};
use crate::id::WatchId;
use crate::trace::{DetachReason, TargetKind, Tracer, TransitionCause};
use crate::view::{self, Surface};
use crate::watcher::VisibilityWatcher;

/// Whether the real content is disclosed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisclosureState {
    /// The placeholder is shown.
    #[default]
    Hidden,
    /// The content is shown.
    Revealed,
}

impl DisclosureState {
    /// Returns `true` for [`DisclosureState::Revealed`].
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    /// Maps an intersection flag to the state it implies.
    #[must_use]
    pub const fn from_visible(visible: bool) -> Self {
        if visible { Self::Revealed } else { Self::Hidden }
    }
}

/// Decides when a lazy container reveals its content.
pub struct DisclosureController<O: IntersectionObserve> {
    config: Config,
    state: DisclosureState,
    watcher: VisibilityWatcher<O>,
    tracer: Tracer,
}

impl<O: IntersectionObserve> core::fmt::Debug for DisclosureController<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisclosureController")
            .field("strategy", &self.config.strategy)
            .field("state", &self.state)
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl<O: IntersectionObserve> DisclosureController<O> {
    /// Creates a hidden controller. No observation starts until the first
    /// [`mount`](Self::mount).
    #[must_use]
    pub fn new(config: Config, observer: O) -> Self {
        Self {
            config,
            state: DisclosureState::Hidden,
            watcher: VisibilityWatcher::new(observer),
            tracer: Tracer::none(),
        }
    }

    /// Replaces the tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Current disclosure state.
    #[must_use]
    pub fn state(&self) -> DisclosureState {
        self.state
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The live binding, if the controller is currently watching.
    #[must_use]
    pub fn active_watch(&self) -> Option<WatchId> {
        self.watcher.active()
    }

    /// The platform capability.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.watcher.observer()
    }

    /// What the host should display now.
    #[must_use]
    pub fn surface(&self) -> Surface<'_> {
        view::compose(&self.config, self.state)
    }

    /// Handles a platform delivery for `watch`. Returns `true` if the state
    /// changed.
    ///
    /// Batches for released bindings are ignored, as are empty batches.
    /// Only the first record of a batch is considered.
    pub fn on_records(&mut self, watch: WatchId, records: &[IntersectionRecord]) -> bool {
        let Some(visible) = self.watcher.accept(watch, records, &mut self.tracer) else {
            return false;
        };
        match self.config.strategy {
            // No binding ever exists in click mode.
            Strategy::Click => false,
            Strategy::RevealOnce => {
                if !visible {
                    return false;
                }
                let changed =
                    self.transition(DisclosureState::Revealed, TransitionCause::Intersection);
                self.watcher.detach(DetachReason::Revealed, &mut self.tracer);
                changed
            }
            Strategy::Toggle { .. } => self.transition(
                DisclosureState::from_visible(visible),
                TransitionCause::Intersection,
            ),
        }
    }

    /// Handles a click on the placeholder button. Returns `true` if the
    /// state changed.
    ///
    /// Only click-triggered controllers react; the reveal is permanent.
    pub fn user_clicked(&mut self) -> bool {
        let accepted = matches!(self.config.strategy, Strategy::Click);
        self.tracer.click(accepted);
        accepted && self.transition(DisclosureState::Revealed, TransitionCause::Click)
    }

    /// Releases any live observation. Safe to call repeatedly; also runs on
    /// drop.
    pub fn teardown(&mut self) {
        self.watcher.detach(DetachReason::Teardown, &mut self.tracer);
    }

    fn transition(&mut self, to: DisclosureState, cause: TransitionCause) -> bool {
        let from = self.state;
        if from == to {
            return false;
        }
        self.tracer.transition(from, to, cause);
        self.state = to;
        true
    }
}

impl<O> DisclosureController<O>
where
    O: IntersectionObserve,
    O::Target: Clone + PartialEq,
{
    /// Runs a mount pass.
    ///
    /// `trigger` is the placeholder's root element as currently rendered (or
    /// `None` before it exists). `lookup` is consulted only for id-addressed
    /// toggling. A target that cannot be found is not an error; the next
    /// mount pass tries again.
    pub fn mount<L>(&mut self, trigger: Option<&O::Target>, lookup: &L)
    where
        L: ElementLookup<Element = O::Target> + ?Sized,
    {
        let (target, kind) = match &self.config.strategy {
            Strategy::Click => return,
            // Single-shot: once revealed, never observe again.
            Strategy::RevealOnce if self.state.is_revealed() => return,
            Strategy::RevealOnce | Strategy::Toggle { target_id: None } => {
                (trigger.cloned(), TargetKind::Reference)
            }
            Strategy::Toggle {
                target_id: Some(id),
            } => (lookup.find(id), TargetKind::Id),
        };

        let Some(target) = target else {
            self.tracer.target_missing(kind);
            if kind == TargetKind::Id {
                self.watcher.detach(DetachReason::TargetLost, &mut self.tracer);
            }
            return;
        };
        if self.watcher.is_bound_to(&target, &self.config.observe) {
            return;
        }
        let options = self.config.observe;
        self.watcher.attach(Some(&target), options, &mut self.tracer);
    }
}

impl<O: IntersectionObserve> Drop for DisclosureController<O> {
    fn drop(&mut self) {
        self.teardown();
    }
}
