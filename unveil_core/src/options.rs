// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat set of named options a page author configures.
//!
//! [`Options`] holds raw, unvalidated values. It can be filled with a struct
//! literal, the `with_*` builders, or string pairs through [`Options::set`]
//! (as read from markup attributes). Interpretation happens later in
//! [`Config::from_options`](crate::config::Config::from_options), which never
//! fails.

use alloc::string::String;

/// Raw configuration of one lazy container.
///
/// Empty strings are stored as absent, matching how the options are treated
/// downstream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Stable key used to locate the trigger element in id-addressed mode.
    pub id: Option<String>,
    /// `reveal-once` (default) or `toggle-on-visibility`.
    pub mode: Option<String>,
    /// Text shown in the scroll-trigger placeholder.
    pub loading_message: Option<String>,
    /// `none`, `spinner` or `bouncing-arrow`.
    pub loading_animation: Option<String>,
    /// Enables click-trigger mode.
    pub button_text: Option<String>,
    /// Root margin in CSS margin syntax.
    pub bounding_box: Option<String>,
    /// Percentage of the trigger that must be visible.
    pub threshold: Option<f64>,
    /// Placeholder height as a CSS length.
    pub height: Option<String>,
    /// Wrap revealed content in a fade-in container.
    pub fade_in: bool,
    /// Styling hook suffix.
    pub block_class: Option<String>,
}

/// Known option names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Id,
    Mode,
    LoadingMessage,
    LoadingAnimation,
    ButtonText,
    BoundingBox,
    Threshold,
    Height,
    FadeIn,
    BlockClass,
}

impl Key {
    const ALL: [(&'static str, Self); 10] = [
        ("id", Self::Id),
        ("mode", Self::Mode),
        ("loadingmessage", Self::LoadingMessage),
        ("loadinganimation", Self::LoadingAnimation),
        ("buttontext", Self::ButtonText),
        ("boundingbox", Self::BoundingBox),
        ("threshold", Self::Threshold),
        ("height", Self::Height),
        ("fadein", Self::FadeIn),
        ("blockclass", Self::BlockClass),
    ];

    /// Matches `loadingMessage`, `loading-message` and `loading_message`
    /// alike.
    fn lookup(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .iter()
            .find(|(canonical, _)| *canonical == folded)
            .map(|(_, key)| *key)
    }
}

impl Options {
    /// Canonical option names, in camelCase. [`Options::set`] accepts these
    /// and their kebab-case and snake_case spellings.
    pub const NAMES: [&'static str; 10] = [
        "id",
        "mode",
        "loadingMessage",
        "loadingAnimation",
        "buttonText",
        "boundingBox",
        "threshold",
        "height",
        "fadeIn",
        "blockClass",
    ];

    /// Sets an option from its name and string value.
    ///
    /// Names are matched case-insensitively, ignoring `-` and `_`. Returns
    /// `false` for unknown names, which are otherwise ignored. Values that do
    /// not parse leave the option absent (`threshold`) or unchanged
    /// (`fadeIn`).
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let Some(key) = Key::lookup(name) else {
            return false;
        };
        let text = non_empty(value);
        match key {
            Key::Id => self.id = text,
            Key::Mode => self.mode = text,
            Key::LoadingMessage => self.loading_message = text,
            Key::LoadingAnimation => self.loading_animation = text,
            Key::ButtonText => self.button_text = text,
            Key::BoundingBox => self.bounding_box = text,
            Key::Height => self.height = text,
            Key::BlockClass => self.block_class = text,
            Key::Threshold => self.threshold = parse_percent(value),
            Key::FadeIn => {
                if let Some(flag) = parse_flag(value) {
                    self.fade_in = flag;
                }
            }
        }
        true
    }

    /// Sets the element id used in id-addressed mode.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = non_empty(id);
        self
    }

    /// Sets the disclosure mode name.
    #[must_use]
    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = non_empty(mode);
        self
    }

    /// Sets the loading message.
    #[must_use]
    pub fn with_loading_message(mut self, message: &str) -> Self {
        self.loading_message = non_empty(message);
        self
    }

    /// Sets the loading animation name.
    #[must_use]
    pub fn with_loading_animation(mut self, animation: &str) -> Self {
        self.loading_animation = non_empty(animation);
        self
    }

    /// Sets the click-to-reveal button label.
    #[must_use]
    pub fn with_button_text(mut self, text: &str) -> Self {
        self.button_text = non_empty(text);
        self
    }

    /// Sets the root margin.
    #[must_use]
    pub fn with_bounding_box(mut self, margin: &str) -> Self {
        self.bounding_box = non_empty(margin);
        self
    }

    /// Sets the visibility threshold in percent.
    #[must_use]
    pub fn with_threshold(mut self, percent: f64) -> Self {
        self.threshold = Some(percent);
        self
    }

    /// Sets the placeholder height.
    #[must_use]
    pub fn with_height(mut self, height: &str) -> Self {
        self.height = non_empty(height);
        self
    }

    /// Enables or disables the fade-in content frame.
    #[must_use]
    pub fn with_fade_in(mut self, fade_in: bool) -> Self {
        self.fade_in = fade_in;
        self
    }

    /// Sets the styling hook suffix.
    #[must_use]
    pub fn with_block_class(mut self, block_class: &str) -> Self {
        self.block_class = non_empty(block_class);
        self
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| String::from(value))
}

/// Accepts `66`, `66.5` and `66%`.
fn parse_percent(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix('%').unwrap_or(value).trim_end();
    number.parse().ok()
}

/// An empty value counts as `true`, like a bare HTML boolean attribute.
fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        return Some(true);
    }
    ["true", "1", "yes", "on"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
        .then_some(true)
        .or_else(|| {
            ["false", "0", "no", "off"]
                .iter()
                .any(|f| value.eq_ignore_ascii_case(f))
                .then_some(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_in_any_case_style() {
        let mut o = Options::default();
        assert!(o.set("loadingMessage", "Loading"));
        assert!(o.set("button-text", "More"));
        assert!(o.set("BLOCK_CLASS", "hero"));
        assert!(o.set("boundingBox", "100px"));
        assert_eq!(o.loading_message.as_deref(), Some("Loading"));
        assert_eq!(o.button_text.as_deref(), Some("More"));
        assert_eq!(o.block_class.as_deref(), Some("hero"));
        assert_eq!(o.bounding_box.as_deref(), Some("100px"));
    }

    #[test]
    fn every_canonical_name_is_accepted() {
        let mut o = Options::default();
        for name in Options::NAMES {
            assert!(o.set(name, "1"), "{name} rejected");
        }
        assert_eq!(o.threshold, Some(1.0));
        assert!(o.fade_in);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut o = Options::default();
        assert!(!o.set("colour", "red"));
        assert!(!o.set("", "x"));
        assert!(!o.set("thresholds", "5"));
        assert!(!o.set("thresh", "5"));
        assert_eq!(o, Options::default());
    }

    #[test]
    fn empty_strings_are_absent() {
        let mut o = Options::default().with_button_text("More");
        o.set("buttonText", "   ");
        assert_eq!(o.button_text, None);
        assert_eq!(Options::default().with_id(""), Options::default());
    }

    #[test]
    fn threshold_parsing() {
        let mut o = Options::default();
        o.set("threshold", "66");
        assert_eq!(o.threshold, Some(66.0));
        o.set("threshold", " 12.5 % ");
        assert_eq!(o.threshold, Some(12.5));
        o.set("threshold", "lots");
        assert_eq!(o.threshold, None);
    }

    #[test]
    fn fade_in_flag_parsing() {
        let mut o = Options::default();
        o.set("fadeIn", "");
        assert!(o.fade_in);
        o.set("fade-in", "no");
        assert!(!o.fade_in);
        o.set("fade-in", "YES");
        assert!(o.fade_in);
        o.set("fade-in", "maybe");
        assert!(o.fade_in);
    }
}
