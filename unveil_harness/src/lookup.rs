// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory id table standing in for a document.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::cell::RefCell;

use unveil_core::backend::ElementLookup;

use crate::observer::ElementHandle;

/// Maps element ids to [`ElementHandle`]s.
///
/// Interior mutability lets a test remount or remove elements while a
/// controller holds a shared reference to the table.
#[derive(Debug, Default)]
pub struct StaticLookup {
    ids: RefCell<BTreeMap<String, ElementHandle>>,
}

impl StaticLookup {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the element mounted under `id`.
    pub fn insert(&self, id: &str, element: ElementHandle) -> Option<ElementHandle> {
        self.ids.borrow_mut().insert(id.into(), element)
    }

    /// Unmounts the element under `id`.
    pub fn remove(&self, id: &str) -> Option<ElementHandle> {
        self.ids.borrow_mut().remove(id)
    }
}

impl ElementLookup for StaticLookup {
    type Element = ElementHandle;

    fn find(&self, id: &str) -> Option<ElementHandle> {
        self.ids.borrow().get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replace_remove() {
        let lookup = StaticLookup::new();
        assert_eq!(lookup.find("a"), None);
        assert_eq!(lookup.insert("a", ElementHandle(1)), None);
        assert_eq!(lookup.insert("a", ElementHandle(2)), Some(ElementHandle(1)));
        assert_eq!(lookup.find("a"), Some(ElementHandle(2)));
        assert_eq!(lookup.remove("a"), Some(ElementHandle(2)));
        assert_eq!(lookup.find("a"), None);
    }
}
