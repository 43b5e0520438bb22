//! WASM bindings for rewriting emoji in the browser.
//!
//! This module exposes the HTML-level entry points to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::emoji::{EmojiTable, Rewriter};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Rewrite emoji in an HTML fragment using the bundled table.
#[wasm_bindgen]
pub fn replace_html(html: &str) -> Result<String, JsValue> {
    crate::replace_html(html).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rewrite emoji in raw fragment bytes (UTF-8, or Windows-1252 if malformed).
#[wasm_bindgen]
pub fn replace_html_bytes(data: &[u8]) -> Result<String, JsValue> {
    crate::replace_html_bytes(data).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rewrite emoji in an HTML fragment, leaving the given tags untouched.
#[wasm_bindgen]
pub fn replace_html_skipping(html: &str, skip_tags: Vec<String>) -> Result<String, JsValue> {
    skip_tags
        .into_iter()
        .fold(Rewriter::new(EmojiTable::bundled()), |r, tag| r.with_opaque_tag(tag))
        .replace_html(html)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
