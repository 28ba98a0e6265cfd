// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach/detach balance checking.
//!
//! A controller must never hold two observations at once, must release each
//! observation exactly once, and must leave nothing live after teardown.
//! [`check`] replays a [`Call`] log and reports the first rule it breaks.

use core::fmt;

use unveil_core::id::WatchId;

use crate::observer::Call;

/// Summary of a well-formed call log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Successful observations.
    pub attaches: usize,
    /// Releases.
    pub detaches: usize,
    /// Refused observations.
    pub refused: usize,
    /// The binding still live at the end of the log, if any.
    pub live: Option<WatchId>,
}

impl LifecycleReport {
    /// `true` when every observation was released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.live.is_none() && self.attaches == self.detaches
    }
}

/// The first lifecycle rule a call log breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleViolation {
    /// A new observation started while another was live.
    Overlap {
        /// Binding that was still live.
        live: WatchId,
        /// Binding that started on top of it.
        started: WatchId,
    },
    /// A release did not match the live binding.
    UnmatchedRelease {
        /// The released handle.
        watch: WatchId,
    },
}

impl fmt::Display for LifecycleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap { live, started } => {
                write!(f, "{started:?} started while {live:?} was still live")
            }
            Self::UnmatchedRelease { watch } => {
                write!(f, "{watch:?} released without a matching observation")
            }
        }
    }
}

impl core::error::Error for LifecycleViolation {}

/// Replays `calls` and checks the single-binding rules.
pub fn check(calls: &[Call]) -> Result<LifecycleReport, LifecycleViolation> {
    let mut report = LifecycleReport::default();
    for call in calls {
        match *call {
            Call::Observe { watch, .. } => {
                if let Some(live) = report.live {
                    return Err(LifecycleViolation::Overlap {
                        live,
                        started: watch,
                    });
                }
                report.live = Some(watch);
                report.attaches += 1;
            }
            Call::Unobserve { watch } => {
                if report.live != Some(watch) {
                    return Err(LifecycleViolation::UnmatchedRelease { watch });
                }
                report.live = None;
                report.detaches += 1;
            }
            Call::Refused { .. } => report.refused += 1,
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ElementHandle;
    use unveil_core::backend::ObserveOptions;
    use unveil_core::margin::RootMargin;

    fn observe(generation: u32) -> Call {
        Call::Observe {
            watch: WatchId::from_generation(generation),
            target: ElementHandle(0),
            options: ObserveOptions {
                threshold: 1.0,
                margin: RootMargin::ZERO,
            },
        }
    }

    fn release(generation: u32) -> Call {
        Call::Unobserve {
            watch: WatchId::from_generation(generation),
        }
    }

    #[test]
    fn balanced_log() {
        let report = check(&[observe(1), release(1), observe(2), release(2)]).unwrap();
        assert_eq!(report.attaches, 2);
        assert!(report.is_released());
    }

    #[test]
    fn open_binding_is_reported() {
        let report = check(&[observe(1)]).unwrap();
        assert_eq!(report.live, Some(WatchId::from_generation(1)));
        assert!(!report.is_released());
    }

    #[test]
    fn overlap_is_a_violation() {
        assert_eq!(
            check(&[observe(1), observe(2)]),
            Err(LifecycleViolation::Overlap {
                live: WatchId::from_generation(1),
                started: WatchId::from_generation(2),
            })
        );
    }

    #[test]
    fn double_release_is_a_violation() {
        assert_eq!(
            check(&[observe(1), release(1), release(1)]),
            Err(LifecycleViolation::UnmatchedRelease {
                watch: WatchId::from_generation(1)
            })
        );
    }
}
