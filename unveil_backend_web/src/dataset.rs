// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options from `data-unveil-*` attributes.
//!
//! ```html
//! <section data-unveil data-unveil-loading-message="Loading reviews"
//!          data-unveil-loading-animation="spinner" data-unveil-threshold="50">
//!   ...deferred content...
//! </section>
//! ```

use alloc::string::String;

use web_sys::HtmlElement;

use unveil_core::options::Options;

/// Attribute prefix shared by every option (`data-unveil-…`).
pub const PREFIX: &str = "unveil";

/// `dataset` key for a camelCase option name: `buttonText` is read from
/// `data-unveil-button-text`, i.e. `dataset.unveilButtonText`.
#[must_use]
pub fn dataset_key(option: &str) -> String {
    let mut key = String::with_capacity(PREFIX.len() + option.len());
    key.push_str(PREFIX);
    let mut chars = option.chars();
    if let Some(first) = chars.next() {
        key.push(first.to_ascii_uppercase());
        key.extend(chars);
    }
    key
}

/// Reads every known option from `element`'s data attributes.
#[must_use]
pub fn options_from_dataset(element: &HtmlElement) -> Options {
    let dataset = element.dataset();
    let mut options = Options::default();
    for name in Options::NAMES {
        if let Some(value) = dataset.get(&dataset_key(name)) {
            options.set(name, &value);
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_dataset_camel_case() {
        assert_eq!(dataset_key("id"), "unveilId");
        assert_eq!(dataset_key("buttonText"), "unveilButtonText");
        assert_eq!(dataset_key("fadeIn"), "unveilFadeIn");
    }

    #[test]
    fn every_option_has_a_distinct_key() {
        let mut keys: alloc::vec::Vec<_> = Options::NAMES.iter().map(|n| dataset_key(n)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Options::NAMES.len());
    }
}
