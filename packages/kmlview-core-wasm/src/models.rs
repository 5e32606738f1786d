// Shared data structures crossing the wasm boundary
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::FeatureCollection;

/// One row of the detail table: a single flattened feature.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ElementRecord {
    pub name: String,
    pub r#type: String,
    /// Arc length in kilometers formatted to two decimals. None for point
    /// kinds and for zero-length paths.
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<serde_json::Value>,
}

/// Analysis result for one loaded document. Immutable once computed; a new
/// upload replaces it wholesale.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Summary {
    #[serde(rename = "elementCounts")]
    pub element_counts: HashMap<String, usize>,
    pub elements: Vec<ElementRecord>,
    /// The flattened collection, retained for map rendering.
    #[serde(rename = "geoJson")]
    pub geo_json: FeatureCollection,
}

/// Geographic bounding box in decimal degrees, north >= south and
/// east >= west away from the date line.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Midpoint as [lat, lng], the order map widgets expect.
    pub fn center(&self) -> [f64; 2] {
        [
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        ]
    }
}

#[derive(Serialize, Deserialize)]
pub struct DocumentStats {
    pub documents_loaded: usize,
    pub parse_failures: usize,
    pub has_document: bool,
    pub feature_count: usize,
    pub element_count: usize,
}
