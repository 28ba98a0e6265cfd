// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Product page with lazily disclosed sections.
//!
//! The page below the hero is built from sections that each defer their
//! content: reviews load with a spinner once half visible, recommendations
//! fade in early thanks to a bounding box, the delivery banner follows the
//! viewport in toggle mode, the stock panel does the same through its
//! `store-stock` id and the size guide waits for a click.
//!
//! Build with: `wasm-pack build --target web demos/web_storefront`
//! Then serve `demos/web_storefront/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::vec::Vec;

use unveil_backend_web::LazyMount;
use unveil_core::options::Options;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

/// A section declared through `data-unveil-*` attributes.
struct Declared {
    title: &'static str,
    attributes: &'static [(&'static str, &'static str)],
    items: &'static [&'static str],
}

const DECLARED: &[Declared] = &[
    Declared {
        title: "Reviews",
        attributes: &[
            ("data-unveil-loading-message", "Loading reviews"),
            ("data-unveil-loading-animation", "spinner"),
            ("data-unveil-threshold", "50"),
            ("data-unveil-height", "240px"),
        ],
        items: &[
            "Sturdy and roomy, fits a laptop with space to spare.",
            "The strap stitching held up after a year of daily use.",
            "Colour is lighter than the photos, still love it.",
        ],
    },
    Declared {
        title: "You may also like",
        attributes: &[
            ("data-unveil-loading-animation", "bouncing-arrow"),
            ("data-unveil-bounding-box", "0px 0px 300px"),
            ("data-unveil-fade-in", "true"),
            ("data-unveil-height", "160px"),
        ],
        items: &["Waxed canvas backpack", "Linen market bag", "Leather key fob"],
    },
    Declared {
        title: "Free delivery over 50",
        attributes: &[
            ("data-unveil-mode", "toggle"),
            ("data-unveil-loading-message", "Checking delivery options"),
            ("data-unveil-block-class", "banner"),
        ],
        items: &["Order in the next 3 hours for next-day delivery."],
    },
    Declared {
        title: "In stock nearby",
        attributes: &[
            ("data-unveil-mode", "toggle"),
            ("data-unveil-id", "store-stock"),
            ("data-unveil-loading-message", "Checking nearby stores"),
            ("data-unveil-threshold", "25"),
        ],
        items: &["Canal Street: 4 left", "Harbour Mall: 1 left"],
    },
];

fn section(document: &Document, title: &str, items: &[&str]) -> Result<HtmlElement, JsValue> {
    let section: HtmlElement = document.create_element("section")?.unchecked_into();
    let heading = document.create_element("h2")?;
    heading.set_text_content(Some(title));
    section.append_child(&heading)?;
    let list = document.create_element("ul")?;
    for &item in items {
        let li = document.create_element("li")?;
        li.set_text_content(Some(item));
        list.append_child(&li)?;
    }
    section.append_child(&list)?;
    Ok(section)
}

fn declare(section: &Element, attributes: &[(&str, &str)]) -> Result<(), JsValue> {
    section.set_attribute("data-unveil", "")?;
    for (name, value) in attributes {
        section.set_attribute(name, value)?;
    }
    Ok(())
}

/// Entry point for the storefront demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    for declared in DECLARED {
        let el = section(&document, declared.title, declared.items)?;
        declare(&el, declared.attributes)?;
        body.append_child(&el)?;
    }

    let size_guide = section(
        &document,
        "Size guide",
        &["Width 38 cm", "Height 42 cm", "Gusset 12 cm"],
    )?;
    body.append_child(&size_guide)?;

    let mut mounts: Vec<LazyMount> = LazyMount::mount_all(&document)?;
    mounts.push(LazyMount::new(
        size_guide,
        &Options::default()
            .with_button_text("Show size guide")
            .with_fade_in(true),
    )?);

    // Keep every mount alive for the lifetime of the page.
    core::mem::forget(mounts);
    Ok(())
}
