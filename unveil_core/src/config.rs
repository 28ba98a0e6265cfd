// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved, immutable configuration.
//!
//! [`Config::from_options`] turns raw [`Options`] into the closed set of
//! behaviors the controller understands. Resolution never fails; every
//! malformed value degrades to a default:
//!
//! | input | fallback |
//! |---|---|
//! | threshold absent, zero, `NaN` or outside `[0, 100]` | ratio `1` |
//! | `boundingBox` absent or unparsable | `0px` |
//! | `loadingAnimation` unknown | no animation |
//! | `mode` unknown | reveal-once |
//!
//! A configured button label selects [`Strategy::Click`] regardless of mode.

use alloc::string::String;

use crate::backend::ObserveOptions;
use crate::margin::RootMargin;
use crate::options::Options;
use crate::threshold;
use crate::view::{Animation, ContentFrame, Placeholder, PlaceholderKind};

/// Whether disclosure may be reversed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Reveal on first visibility, permanently.
    #[default]
    RevealOnce,
    /// Mirror visibility of the element located by id; re-hides.
    ToggleOnVisibility,
}

impl Mode {
    /// Parses a mode name. Unknown names yield [`Mode::RevealOnce`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if ["toggle-on-visibility", "toggle_on_visibility", "toggleOnVisibility", "toggle"]
            .iter()
            .any(|m| name.eq_ignore_ascii_case(m))
        {
            Self::ToggleOnVisibility
        } else {
            Self::RevealOnce
        }
    }
}

/// What the user must do for content to be disclosed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Clicking the placeholder button.
    Click,
    /// Scrolling the placeholder into view.
    Scroll,
}

/// The closed set of controller behaviors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Click-only; no watcher is ever created.
    Click,
    /// Watch the trigger element; reveal on first intersection, then release.
    RevealOnce,
    /// Watch an element and mirror its visibility.
    Toggle {
        /// Element id to re-locate on every mount pass. When absent, the
        /// trigger element handed over by the host is watched instead.
        target_id: Option<String>,
    },
}

/// Immutable configuration of one controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Behavior selected from the trigger and mode options.
    pub strategy: Strategy,
    /// Parameters for every observation this controller creates.
    pub observe: ObserveOptions,
    /// Placeholder shown while hidden.
    pub placeholder: Placeholder,
    /// Frame used once revealed.
    pub content: ContentFrame,
    /// Styling hook suffix.
    pub block_class: Option<String>,
}

impl Config {
    /// Resolves raw options. Never fails.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let mode = options.mode.as_deref().map(Mode::parse).unwrap_or_default();
        let strategy = match (&options.button_text, mode) {
            (Some(_), _) => Strategy::Click,
            (None, Mode::RevealOnce) => Strategy::RevealOnce,
            (None, Mode::ToggleOnVisibility) => Strategy::Toggle {
                target_id: options.id.clone(),
            },
        };

        let animation = options
            .loading_animation
            .as_deref()
            .map(Animation::parse)
            .unwrap_or_default();
        let kind = match (&options.button_text, &options.loading_message) {
            (Some(label), _) => PlaceholderKind::Button {
                label: label.clone(),
            },
            (None, Some(text)) => PlaceholderKind::Message {
                text: Some(text.clone()),
                animation,
            },
            (None, None) if animation != Animation::None => PlaceholderKind::Message {
                text: None,
                animation,
            },
            (None, None) => PlaceholderKind::Empty,
        };

        Self {
            strategy,
            observe: ObserveOptions {
                threshold: threshold::normalize(options.threshold),
                margin: RootMargin::parse_or_zero(options.bounding_box.as_deref()),
            },
            placeholder: Placeholder {
                kind,
                height: options.height.clone(),
            },
            content: if options.fade_in {
                ContentFrame::FadeIn
            } else {
                ContentFrame::Plain
            },
            block_class: options.block_class.clone(),
        }
    }

    /// The effective trigger.
    #[must_use]
    pub fn trigger(&self) -> Trigger {
        match self.strategy {
            Strategy::Click => Trigger::Click,
            Strategy::RevealOnce | Strategy::Toggle { .. } => Trigger::Scroll,
        }
    }

    /// Whether a revealed state may later revert to hidden.
    #[must_use]
    pub fn may_rehide(&self) -> bool {
        matches!(self.strategy, Strategy::Toggle { .. })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::Length;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.strategy, Strategy::RevealOnce);
        assert_eq!(c.trigger(), Trigger::Scroll);
        assert_eq!(c.observe.threshold, 1.0);
        assert_eq!(c.observe.margin, RootMargin::ZERO);
        assert_eq!(c.content, ContentFrame::Plain);
        assert!(!c.may_rehide());
    }

    #[test]
    fn threshold_and_margin_resolution() {
        let c = Config::from_options(
            &Options::default()
                .with_threshold(66.0)
                .with_bounding_box("200px 0px"),
        );
        assert!((c.observe.threshold - 0.66).abs() < 1e-12);
        assert_eq!(c.observe.margin.top, Length::Px(200.0));
        assert_eq!(c.observe.margin.left, Length::Px(0.0));

        let bad = Config::from_options(
            &Options::default()
                .with_threshold(150.0)
                .with_bounding_box("lots"),
        );
        assert_eq!(bad.observe.threshold, 1.0);
        assert_eq!(bad.observe.margin, RootMargin::ZERO);
    }

    #[test]
    fn click_takes_priority_over_toggle() {
        let c = Config::from_options(
            &Options::default()
                .with_mode("toggle-on-visibility")
                .with_id("panel-1")
                .with_button_text("Load More"),
        );
        assert_eq!(c.strategy, Strategy::Click);
        assert_eq!(c.trigger(), Trigger::Click);
    }

    #[test]
    fn toggle_carries_target_id() {
        let c = Config::from_options(&Options::default().with_mode("toggle").with_id("panel-1"));
        assert_eq!(
            c.strategy,
            Strategy::Toggle {
                target_id: Some("panel-1".into())
            }
        );
        assert!(c.may_rehide());
    }

    #[test]
    fn unknown_mode_reveals_once() {
        assert_eq!(Mode::parse("sometimes"), Mode::RevealOnce);
        assert_eq!(Mode::parse(" Toggle-On-Visibility "), Mode::ToggleOnVisibility);
    }
}
