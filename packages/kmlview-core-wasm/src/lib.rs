use kml::Kml;
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

// Console module for logging
pub mod console;
// Shared data structures
mod models;
// The GeoJSON-shaped feature model
pub mod geometry;
// KML tree to feature conversion
mod kml_convert;
// GeometryCollection expansion
mod flatten;
// Counts, records and length computation
mod analyze;
// Bounding box computation
mod bounds;
// Current-document state management
mod module_state;

use module_state::ModuleState;

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

// Use the macro from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => (crate::console::log(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("KML viewer core initialized");
    });
}

/// Upload-boundary check: only filenames ending in ".kml" are accepted.
/// The check looks at the suffix only, not MIME type or content.
#[wasm_bindgen]
pub fn is_kml_filename(name: &str) -> bool {
    name.ends_with(".kml")
}

/// Run the full pipeline on uploaded KML text: parse, convert to features,
/// expand multi-geometry collections, analyze, compute bounds. The result
/// replaces the previously loaded document and is returned to the caller.
///
/// A parse failure leaves the prior document in place and surfaces a single
/// error string to the caller.
#[wasm_bindgen]
pub fn load_kml_document(text: &str) -> Result<JsValue, JsValue> {
    let document: Kml = match text.parse() {
        Ok(document) => document,
        Err(e) => {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "KML parse failed: {}",
                e
            )));
            ModuleState::with_mut(|state| state.record_parse_failure());
            return Err(JsValue::from_str(&format!(
                "Failed to parse KML document: {}",
                e
            )));
        }
    };

    let collection = kml_convert::document_to_features(&document);
    let collection = flatten::flatten_collections(collection);
    let summary = analyze::analyze_features(collection);
    let bounds = bounds::compute_bounds(&summary.geo_json);

    console_log!(
        "Loaded KML document: {} features, {} element types",
        summary.geo_json.features.len(),
        summary.element_counts.len()
    );

    let result = to_value(&summary)?;
    ModuleState::with_mut(|state| {
        state.replace_document(summary, bounds, js_sys::Date::now())
    });
    Ok(result)
}

/// The summary of the currently loaded document, or undefined when none is
/// loaded. Consumers treat the returned object as read-only view state.
#[wasm_bindgen]
pub fn current_summary() -> JsValue {
    ModuleState::with(|state| {
        state
            .current
            .as_ref()
            .and_then(|doc| to_value(&doc.summary).ok())
            .unwrap_or(JsValue::undefined())
    })
}

/// Padded bounding box of the current document for map fitting.
#[wasm_bindgen]
pub fn document_bounds() -> Result<JsValue, JsValue> {
    ModuleState::with(|state| match &state.current {
        Some(doc) => Ok(to_value(&doc.bounds)?),
        None => Err(JsValue::from_str("No KML document loaded")),
    })
}

/// Map center as [lat, lng], the midpoint of the current bounds.
#[wasm_bindgen]
pub fn document_center() -> Result<JsValue, JsValue> {
    ModuleState::with(|state| match &state.current {
        Some(doc) => Ok(to_value(&doc.bounds.center())?),
        None => Err(JsValue::from_str("No KML document loaded")),
    })
}

/// Drop the current document. Lifetime counters are retained.
#[wasm_bindgen]
pub fn clear_document() -> bool {
    ModuleState::with_mut(|state| state.clear());
    true
}

/// Diagnostics for the session: load/failure counters and the size of the
/// current document.
#[wasm_bindgen]
pub fn get_document_stats() -> Result<JsValue, JsValue> {
    let stats = ModuleState::with(|state| state.stats());
    Ok(to_value(&stats)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kml_filename_suffix_check() {
        assert!(is_kml_filename("route.kml"));
        assert!(is_kml_filename("nested/path/track.kml"));
        assert!(!is_kml_filename("route.kmz"));
        assert!(!is_kml_filename("route.kml.txt"));
        assert!(!is_kml_filename("KML"));
        assert!(!is_kml_filename(""));
    }
}
