// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM rendering of a [`Surface`].
//!
//! The host element's original children are the deferred content. At
//! construction they are moved into a detached `DocumentFragment`, so the
//! browser does not lay them out (or fetch their images) while hidden. A
//! [`Surface::Trigger`] renders a placeholder in their place; a
//! [`Surface::Content`] moves them back, optionally inside a fade-in wrapper.
//! Hiding again in toggle mode moves them back into the fragment.

use alloc::format;
use alloc::string::String;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Function;
use web_sys::{Document, DocumentFragment, Element, HtmlElement, Node};

use unveil_core::view::{
    BlockClasses, ContentFrame, Placeholder, PlaceholderKind, Slot, StyleResolver, Surface,
};

enum Shown {
    Nothing,
    Trigger {
        root: HtmlElement,
        button: Option<(Element, Function)>,
    },
    Content {
        wrapper: Option<Element>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShownKind {
    Nothing,
    Trigger,
    Content,
}

impl Shown {
    fn kind(&self) -> ShownKind {
        match self {
            Self::Nothing => ShownKind::Nothing,
            Self::Trigger { .. } => ShownKind::Trigger,
            Self::Content { .. } => ShownKind::Content,
        }
    }
}

/// Whether `surface` is already on screen. A blank view never is, so a
/// render that failed part way is redone by the next one.
fn is_current(shown: ShownKind, surface: &Surface<'_>) -> bool {
    matches!(
        (shown, surface),
        (ShownKind::Trigger, Surface::Trigger(_)) | (ShownKind::Content, Surface::Content(_))
    )
}

/// Swaps a host element between its placeholder and its deferred content.
pub struct DomView {
    document: Document,
    host: HtmlElement,
    deferred: DocumentFragment,
    shown: Shown,
}

impl core::fmt::Debug for DomView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomView")
            .field("host", &"HtmlElement")
            .field("shown", &self.shown.kind())
            .finish_non_exhaustive()
    }
}

impl DomView {
    /// Takes over `host`: its children become the deferred content and the
    /// container class from `styles` is added to it.
    pub fn new(host: HtmlElement, styles: &dyn StyleResolver) -> Result<Self, JsValue> {
        let document = host
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host element has no owner document"))?;
        let deferred = document.create_document_fragment();
        move_children(&host, &deferred)?;
        host.set_class_name(&join_classes(&host.class_name(), &styles.classes(Slot::Container)));
        Ok(Self {
            document,
            host,
            deferred,
            shown: Shown::Nothing,
        })
    }

    /// The host element.
    #[must_use]
    pub fn host(&self) -> &HtmlElement {
        &self.host
    }

    /// Renders `surface`. A no-op when the same kind of surface is already
    /// shown.
    ///
    /// `on_click` is attached to the placeholder button, if there is one. On
    /// error the view is left blank with the content back in the fragment,
    /// and the next call rebuilds it.
    pub fn present(
        &mut self,
        surface: Surface<'_>,
        styles: &dyn StyleResolver,
        on_click: &Function,
    ) -> Result<(), JsValue> {
        if is_current(self.shown.kind(), &surface) {
            return Ok(());
        }
        self.clear()?;
        self.shown = match surface {
            Surface::Trigger(placeholder) => {
                let (root, button) = self.build_trigger(placeholder, styles, on_click)?;
                if let Err(error) = self.host.append_child(&root) {
                    if let Some((button, listener)) = &button {
                        let _ = button.remove_event_listener_with_callback("click", listener);
                    }
                    return Err(error);
                }
                Shown::Trigger { root, button }
            }
            Surface::Content(ContentFrame::Plain) => {
                self.host.append_child(&self.deferred)?;
                Shown::Content { wrapper: None }
            }
            Surface::Content(ContentFrame::FadeIn) => {
                let wrapper = self.document.create_element("div")?;
                wrapper.set_class_name(&join_classes(
                    &styles.classes(Slot::Content),
                    &format!("{}-{}--fade-in", BlockClasses::PREFIX, Slot::Content.name()),
                ));
                wrapper.append_child(&self.deferred)?;
                if let Err(error) = self.host.append_child(&wrapper) {
                    move_children(&wrapper, &self.deferred)?;
                    return Err(error);
                }
                Shown::Content {
                    wrapper: Some(wrapper),
                }
            }
        };
        Ok(())
    }

    /// Removes whatever is shown, returning content to the fragment.
    fn clear(&mut self) -> Result<(), JsValue> {
        match core::mem::replace(&mut self.shown, Shown::Nothing) {
            Shown::Nothing => {}
            Shown::Trigger { root, button } => {
                if let Some((button, listener)) = button {
                    let _ = button.remove_event_listener_with_callback("click", &listener);
                }
                root.remove();
            }
            Shown::Content { wrapper: None } => move_children(&self.host, &self.deferred)?,
            Shown::Content {
                wrapper: Some(wrapper),
            } => {
                move_children(&wrapper, &self.deferred)?;
                wrapper.remove();
            }
        }
        Ok(())
    }

    fn build_trigger(
        &self,
        placeholder: &Placeholder,
        styles: &dyn StyleResolver,
        on_click: &Function,
    ) -> Result<(HtmlElement, Option<(Element, Function)>), JsValue> {
        let root: HtmlElement = self.document.create_element("div")?.unchecked_into();
        root.set_class_name(&styles.classes(Slot::Trigger));
        if let Some(height) = &placeholder.height {
            let _ = root.style().set_property("height", height);
        }

        let mut button = None;
        match &placeholder.kind {
            PlaceholderKind::Button { label } => {
                let el = self.document.create_element("button")?;
                el.set_attribute("type", "button")?;
                el.set_class_name(&styles.classes(Slot::Button));
                el.set_text_content(Some(label.as_str()));
                el.add_event_listener_with_callback("click", on_click)?;
                root.append_child(&el)?;
                button = Some((el, on_click.clone()));
            }
            PlaceholderKind::Message { text, animation } => {
                if let Some(text) = text {
                    let el = self.document.create_element("span")?;
                    el.set_class_name(&styles.classes(Slot::Message));
                    el.set_text_content(Some(text.as_str()));
                    root.append_child(&el)?;
                }
                if let Some(name) = animation.css_name() {
                    let el = self.document.create_element("div")?;
                    el.set_class_name(&join_classes(
                        &styles.classes(Slot::Animation),
                        &format!("{}-{}--{name}", BlockClasses::PREFIX, Slot::Animation.name()),
                    ));
                    el.set_attribute("aria-hidden", "true")?;
                    root.append_child(&el)?;
                }
            }
            PlaceholderKind::Empty => {}
        }
        Ok((root, button))
    }
}

impl Drop for DomView {
    fn drop(&mut self) {
        if let Shown::Trigger {
            button: Some((button, listener)),
            ..
        } = &self.shown
        {
            let _ = button.remove_event_listener_with_callback("click", listener);
        }
    }
}

fn move_children(from: &Node, to: &Node) -> Result<(), JsValue> {
    while let Some(child) = from.first_child() {
        to.append_child(&child)?;
    }
    Ok(())
}

fn join_classes(a: &str, b: &str) -> String {
    match (a.trim(), b.trim()) {
        ("", b) => b.into(),
        (a, "") => a.into(),
        (a, b) => format!("{a} {b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_view_is_never_current() {
        let placeholder = Placeholder {
            kind: PlaceholderKind::Empty,
            height: None,
        };
        let trigger = Surface::Trigger(&placeholder);
        let content = Surface::Content(ContentFrame::FadeIn);

        assert!(!is_current(ShownKind::Nothing, &trigger));
        assert!(!is_current(ShownKind::Nothing, &content));
        assert!(is_current(ShownKind::Trigger, &trigger));
        assert!(is_current(ShownKind::Content, &content));
        assert!(!is_current(ShownKind::Trigger, &content));
        assert!(!is_current(ShownKind::Content, &trigger));
    }

    #[test]
    fn class_lists_join_without_stray_spaces() {
        assert_eq!(join_classes("", "unveil-container"), "unveil-container");
        assert_eq!(join_classes(" page-block ", ""), "page-block");
        assert_eq!(
            join_classes("page-block", "unveil-container"),
            "page-block unveil-container"
        );
    }
}
