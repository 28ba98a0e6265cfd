// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a host should display for the current disclosure state.
//!
//! Rendering is the host's job. This module only decides *which* variant is
//! on screen: a [`Surface::Trigger`] carrying the placeholder while content
//! is hidden, or a [`Surface::Content`] carrying the content frame once it is
//! revealed. [`compose`] is a pure read of configuration and state.
//!
//! Class names are produced by a [`StyleResolver`]; [`BlockClasses`] is the
//! default, emitting `unveil-<slot>` plus an optional
//! `unveil-<slot>--<blockClass>` modifier.

use alloc::format;
use alloc::string::String;

use crate::config::Config;
use crate::controller::DisclosureState;

/// Placeholder animation. Closed set; unknown names map to [`Animation::None`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Animation {
    /// No animation.
    #[default]
    None,
    /// A spinning loader.
    Spinner,
    /// An arrow bouncing towards the content.
    BouncingArrow,
}

impl Animation {
    /// Parses an animation name, accepting kebab, snake and camel case.
    /// Anything unrecognized yields [`Animation::None`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let mut folded = [0_u8; 16];
        let mut len = 0;
        for b in name.trim().bytes().filter(|b| !matches!(b, b'-' | b'_')) {
            if len == folded.len() {
                return Self::None;
            }
            folded[len] = b.to_ascii_lowercase();
            len += 1;
        }
        match &folded[..len] {
            b"spinner" => Self::Spinner,
            b"bouncingarrow" => Self::BouncingArrow,
            _ => Self::None,
        }
    }

    /// The kebab-case name used in class modifiers, or `None` for no
    /// animation.
    #[must_use]
    pub const fn css_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Spinner => Some("spinner"),
            Self::BouncingArrow => Some("bouncing-arrow"),
        }
    }
}

/// Which placeholder variant is shown while content is hidden.
///
/// Selected by priority: button, then message/animation, then bare box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// A button that reveals the content when clicked.
    Button {
        /// Button label.
        label: String,
    },
    /// A loading message and/or animation.
    Message {
        /// Message text, if configured.
        text: Option<String>,
        /// Animation shown next to the message.
        animation: Animation,
    },
    /// An empty box that only reserves space.
    Empty,
}

/// The placeholder shown while content is hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Variant.
    pub kind: PlaceholderKind,
    /// CSS height of the placeholder box, if configured.
    pub height: Option<String>,
}

/// How revealed content is framed. Presentational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentFrame {
    /// Children rendered verbatim.
    #[default]
    Plain,
    /// Children wrapped in a fade-in container.
    FadeIn,
}

/// What the host should display right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface<'a> {
    /// Content is hidden; show the placeholder.
    Trigger(&'a Placeholder),
    /// Content is revealed; show it in the given frame.
    Content(ContentFrame),
}

impl Surface<'_> {
    /// Returns `true` for [`Surface::Content`].
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Self::Content(_))
    }
}

/// Maps configuration and state to the surface to display.
#[must_use]
pub fn compose(config: &Config, state: DisclosureState) -> Surface<'_> {
    match state {
        DisclosureState::Hidden => Surface::Trigger(&config.placeholder),
        DisclosureState::Revealed => Surface::Content(config.content),
    }
}

/// Styling hook points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Outer element owning both trigger and content.
    Container,
    /// Placeholder root (the observed element).
    Trigger,
    /// Click-to-reveal button.
    Button,
    /// Loading message text.
    Message,
    /// Loading animation element.
    Animation,
    /// Wrapper around revealed content.
    Content,
}

impl Slot {
    /// Base name of the slot.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Trigger => "trigger",
            Self::Button => "button",
            Self::Message => "message",
            Self::Animation => "animation",
            Self::Content => "content",
        }
    }
}

/// Resolves the class list for a styling slot.
pub trait StyleResolver {
    /// Returns the space-separated class list for `slot`.
    fn classes(&self, slot: Slot) -> String;
}

/// Default resolver: `unveil-<slot>` plus `unveil-<slot>--<block>` when a
/// block class is configured.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockClasses {
    block: Option<String>,
}

impl BlockClasses {
    /// Class prefix shared by every slot.
    pub const PREFIX: &'static str = "unveil";

    /// Creates a resolver with an optional block-class modifier.
    #[must_use]
    pub fn new(block: Option<&str>) -> Self {
        Self {
            block: block
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(String::from),
        }
    }
}

impl StyleResolver for BlockClasses {
    fn classes(&self, slot: Slot) -> String {
        let base = format!("{}-{}", Self::PREFIX, slot.name());
        match &self.block {
            Some(block) => format!("{base} {base}--{block}"),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::options::Options;

    #[test]
    fn animation_names() {
        assert_eq!(Animation::parse("spinner"), Animation::Spinner);
        assert_eq!(Animation::parse("bouncing-arrow"), Animation::BouncingArrow);
        assert_eq!(Animation::parse("bouncingArrow"), Animation::BouncingArrow);
        assert_eq!(Animation::parse("BOUNCING_ARROW"), Animation::BouncingArrow);
        assert_eq!(Animation::parse("none"), Animation::None);
        assert_eq!(Animation::parse("confetti"), Animation::None);
        assert_eq!(Animation::parse("a-very-long-unknown-animation"), Animation::None);
        assert_eq!(Animation::parse(""), Animation::None);
    }

    #[test]
    fn button_beats_message() {
        let config = Config::from_options(
            &Options::default()
                .with_button_text("Load More")
                .with_loading_message("Loading...")
                .with_loading_animation("spinner"),
        );
        let Surface::Trigger(p) = compose(&config, DisclosureState::Hidden) else {
            panic!("hidden state must show the trigger");
        };
        assert_eq!(
            p.kind,
            PlaceholderKind::Button {
                label: "Load More".into()
            }
        );
    }

    #[test]
    fn message_with_animation() {
        let config = Config::from_options(
            &Options::default()
                .with_loading_message("Loading...")
                .with_loading_animation("bouncing-arrow")
                .with_height("240px"),
        );
        let Surface::Trigger(p) = compose(&config, DisclosureState::Hidden) else {
            panic!("hidden state must show the trigger");
        };
        assert_eq!(
            p.kind,
            PlaceholderKind::Message {
                text: Some("Loading...".into()),
                animation: Animation::BouncingArrow,
            }
        );
        assert_eq!(p.height.as_deref(), Some("240px"));
    }

    #[test]
    fn animation_alone_still_shows_message_variant() {
        let config = Config::from_options(&Options::default().with_loading_animation("spinner"));
        assert_eq!(
            config.placeholder.kind,
            PlaceholderKind::Message {
                text: None,
                animation: Animation::Spinner,
            }
        );
    }

    #[test]
    fn nothing_configured_is_bare_box() {
        let config = Config::from_options(&Options::default().with_loading_animation("confetti"));
        assert_eq!(config.placeholder.kind, PlaceholderKind::Empty);
    }

    #[test]
    fn revealed_shows_content_frame() {
        let plain = Config::from_options(&Options::default());
        assert_eq!(
            compose(&plain, DisclosureState::Revealed),
            Surface::Content(ContentFrame::Plain)
        );
        let fade = Config::from_options(&Options::default().with_fade_in(true));
        assert!(compose(&fade, DisclosureState::Revealed).is_content());
        assert_eq!(
            compose(&fade, DisclosureState::Revealed),
            Surface::Content(ContentFrame::FadeIn)
        );
    }

    #[test]
    fn block_classes() {
        let plain = BlockClasses::new(None);
        assert_eq!(plain.classes(Slot::Trigger), "unveil-trigger");

        let hero = BlockClasses::new(Some("hero"));
        assert_eq!(hero.classes(Slot::Content), "unveil-content unveil-content--hero");

        assert_eq!(BlockClasses::new(Some("  ")), plain);
    }
}
