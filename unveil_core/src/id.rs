// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller and binding identity types.

use core::fmt;

/// Identifies one controller instance (one mounted lazy container).
///
/// Callers assign these; core only passes them through to trace events so
/// that interleaved diagnostics from several containers can be told apart.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InstanceId(pub u32);

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.0)
    }
}

/// A handle to one observation binding created by a
/// [`VisibilityWatcher`](crate::watcher::VisibilityWatcher).
///
/// Every attach mints a fresh generation, so records that a platform
/// delivers for an already released binding can be recognized and dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId {
    pub(crate) generation: u32,
}

impl WatchId {
    /// Creates a handle from a raw generation (for backends and test doubles
    /// that need to fabricate deliveries).
    #[inline]
    #[must_use]
    pub const fn from_generation(generation: u32) -> Self {
        Self { generation }
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WatchId(gen{})", self.generation)
    }
}
