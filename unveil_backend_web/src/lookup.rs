// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element lookup by `id`.

use web_sys::{Document, Element};

use unveil_core::backend::ElementLookup;

/// Resolves ids with `document.getElementById`.
#[derive(Clone)]
pub struct DocumentLookup {
    document: Document,
}

impl core::fmt::Debug for DocumentLookup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DocumentLookup")
            .field("document", &"Document")
            .finish()
    }
}

impl DocumentLookup {
    /// Creates a lookup over `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ElementLookup for DocumentLookup {
    type Element = Element;

    fn find(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}
