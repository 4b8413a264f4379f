//! WASM bindings for pulse-core
//!
//! Lets a browser sequencer ask the same hit/rest questions as the native
//! REPL. Arguments are `i32` so JavaScript can pass plain numbers.

#[cfg(feature = "wasm")]
use crate::rhythm::{query, render, Rhythm};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Whether `cursor` is a hit; throws on invalid parameters
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn euclid_query(
    onsets: i32,
    pulses: i32,
    phase: i32,
    length: i32,
    cursor: i32,
) -> Result<bool, JsValue> {
    query(
        onsets.into(),
        pulses.into(),
        phase.into(),
        length.into(),
        cursor.into(),
    )
    .map_err(to_js_error)
}

/// `x`/`.` rendering over `[0, length)`
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn euclid_render(onsets: i32, pulses: i32, phase: i32, length: i32) -> Result<String, JsValue> {
    render(onsets.into(), pulses.into(), phase.into(), length.into()).map_err(to_js_error)
}

/// Parse a rhythm literal such as `euclid(5, 8, 2)` and return its steps as
/// an array of booleans
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn euclid_steps(source: &str) -> Result<JsValue, JsValue> {
    let rhythm: Rhythm = source.parse().map_err(to_js_error)?;
    let steps: Vec<bool> = rhythm.steps().collect();
    serde_wasm_bindgen::to_value(&steps).map_err(to_js_error)
}
