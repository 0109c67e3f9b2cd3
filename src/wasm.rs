//! JavaScript bindings. On non-wasm targets these are plain functions, but the error values
//! only work inside a JavaScript host.

use wasm_bindgen::prelude::*;

use crate::parse::parse;
use crate::serialize::{pretty_print, serialize};

/// Parse `xml` and return it in the indented textual form. Comments are dropped.
#[wasm_bindgen(js_name = reformatXml)]
pub fn reformat_xml(xml: &str) -> Result<String, JsValue> {
    parse(xml)
        .map(|root| pretty_print(&root))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Parse `xml` and return it in the canonical single-line textual form.
#[wasm_bindgen(js_name = canonicalizeXml)]
pub fn canonicalize_xml(xml: &str) -> Result<String, JsValue> {
    parse(xml)
        .map(|root| serialize(&root))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
