use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

/// The global `window`, absent outside a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

#[must_use]
pub fn element_by_id(id: &str) -> Option<Element> {
    document().and_then(|doc| doc.get_element_by_id(id))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Current page metrics as `(width, height, scroll_height)`.
#[must_use]
pub fn page_metrics() -> Option<(f64, f64, f64)> {
    let win = window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    let scroll_height = win
        .document()
        .and_then(|doc| doc.document_element())
        .map_or(height, |root| f64::from(root.scroll_height()));
    Some((width, height, scroll_height))
}

#[must_use]
pub fn scroll_y() -> Option<f64> {
    window().and_then(|win| win.scroll_y().ok())
}

/// Jump the page to `top` without animation.
pub fn scroll_page_to(top: f64) {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Instant);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// Scroll the page by `delta` pixels, animated only when `smooth`.
pub fn scroll_page_by(delta: f64, smooth: bool) {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(delta);
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        win.scroll_by_with_scroll_to_options(&options);
    }
}

/// Smooth-scroll an element's own content to `top`; `None` means the bottom.
pub fn scroll_element(id: &str, top: Option<f64>) {
    let Some(el) = element_by_id(id) else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top.unwrap_or_else(|| f64::from(el.scroll_height())));
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_to_with_scroll_to_options(&options);
}
