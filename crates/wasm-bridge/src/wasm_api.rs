//! WASM entry points for the web worker.
//!
//! This module is only compiled for the `wasm32` target. It provides the
//! `#[wasm_bindgen]` functions that JavaScript calls from the web worker.

use wasm_bindgen::prelude::*;

use luminaire_types::PhotometricDataset;
use photometry::diagram::{render, DiagramMode};
use photometry::symmetry::active_plane_range;

use crate::dispatch::process_json;

/// Install the panic hook. Call once before any other function.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Process a JSON `UiToEngine` message and return a JSON `EngineToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    process_json(json_input)
}

/// Active C-plane range as `[mc1, mc2]`, 1-based inclusive and unclamped.
#[wasm_bindgen]
pub fn active_planes(symmetry: i32, c_plane_count: usize) -> js_sys::Uint32Array {
    let range = active_plane_range(symmetry, c_plane_count);
    js_sys::Uint32Array::from(&[range.mc1 as u32, range.mc2 as u32][..])
}

/// Primary polar curve of a dataset as `[x0, y0, x1, y1, ...]`.
///
/// Empty when the dataset JSON does not parse or there is nothing to plot.
#[wasm_bindgen]
pub fn polar_curve(dataset_json: &str, width: f64, height: f64) -> js_sys::Float32Array {
    let Ok(dataset) = serde_json::from_str::<PhotometricDataset>(dataset_json) else {
        return js_sys::Float32Array::new_with_length(0);
    };
    let geometry = render(&dataset, DiagramMode::Polar, width, height);
    let flat: Vec<f32> = geometry
        .curves()
        .first()
        .map(|curve| curve.iter().flat_map(|p| [p.x as f32, p.y as f32]).collect())
        .unwrap_or_default();
    js_sys::Float32Array::from(flat.as_slice())
}
