use std::collections::HashMap;

use crate::geometry::{lon_lat, Feature, FeatureCollection, Geometry, Position};
use crate::models::{ElementRecord, Summary};

/// Mean Earth radius used by the distance kernel. The summary contract is
/// defined against this exact value, so the kernel lives here instead of
/// pulling a geodesy crate with a different constant.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points via the haversine formula.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of haversine distances between consecutive positions. Positions with
/// fewer than two components contribute nothing.
fn path_length_km(coordinates: &[Position]) -> f64 {
    coordinates
        .windows(2)
        .filter_map(|pair| {
            let (lon1, lat1) = lon_lat(&pair[0])?;
            let (lon2, lat2) = lon_lat(&pair[1])?;
            Some(haversine_km(lat1, lon1, lat2, lon2))
        })
        .sum()
}

fn line_length_km(coordinates: &[Position]) -> f64 {
    if coordinates.len() < 2 {
        return 0.0;
    }
    path_length_km(coordinates)
}

// Only the exterior ring is measured, as an open path: consecutive vertex
// distances without an extra closing segment back to the start.
fn exterior_ring_length_km(rings: &[Vec<Position>]) -> f64 {
    let Some(ring) = rings.first() else {
        return 0.0;
    };
    if ring.len() < 3 {
        return 0.0;
    }
    path_length_km(ring)
}

/// Arc length of a geometry in kilometers. Zero for point kinds and for
/// collections, which are flattened before analysis.
pub fn geometry_length_km(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::LineString { coordinates } => line_length_km(coordinates),
        Geometry::MultiLineString { coordinates } => {
            coordinates.iter().map(|line| line_length_km(line)).sum()
        }
        Geometry::Polygon { coordinates } => exterior_ring_length_km(coordinates),
        Geometry::MultiPolygon { coordinates } => coordinates
            .iter()
            .map(|polygon| exterior_ring_length_km(polygon))
            .sum(),
        Geometry::Point { .. }
        | Geometry::MultiPoint { .. }
        | Geometry::GeometryCollection { .. } => 0.0,
    }
}

/// Display name for a feature. Missing, non-string and empty names all fall
/// back to "Unnamed".
fn feature_name(feature: &Feature) -> String {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get("name"))
        .and_then(|name| name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Unnamed")
        .to_string()
}

/// Build the document summary from a flattened collection. Features without
/// geometry are skipped entirely; every feature with a geometry is counted
/// under its type label. The collection is retained inside the summary for
/// map rendering.
pub fn analyze_features(collection: FeatureCollection) -> Summary {
    let mut element_counts: HashMap<String, usize> = HashMap::new();
    let mut elements = Vec::new();

    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };

        let label = geometry.type_label();
        *element_counts.entry(label.to_string()).or_insert(0) += 1;

        let length = geometry_length_km(geometry);
        elements.push(ElementRecord {
            name: feature_name(feature),
            r#type: label.to_string(),
            length: if length > 0.0 {
                Some(format!("{:.2}", length))
            } else {
                None
            },
            coordinates: geometry.coordinates_json(),
        });
    }

    Summary {
        element_counts,
        elements,
        geo_json: collection,
    }
}
