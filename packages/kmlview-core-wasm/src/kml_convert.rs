// Conversion from the kml crate's parsed tree into the feature model.
// Conversion is best-effort: unknown nodes and unsupported geometry elements
// are dropped, never errors, so a partially understood document still renders.
use kml::types::{Coord, Geometry as KmlGeometry, MultiGeometry, Placemark, Polygon};
use kml::Kml;

use crate::geometry::{Feature, FeatureCollection, Geometry, Position};

/// Walk a parsed KML tree and collect every placemark into a feature,
/// preserving document order across folder boundaries.
pub fn document_to_features(document: &Kml) -> FeatureCollection {
    let mut features = Vec::new();
    collect_features(document, &mut features);
    FeatureCollection::new(features)
}

fn collect_features(node: &Kml, out: &mut Vec<Feature>) {
    match node {
        Kml::KmlDocument(document) => {
            for element in &document.elements {
                collect_features(element, out);
            }
        }
        Kml::Document { elements, .. } => {
            for element in elements {
                collect_features(element, out);
            }
        }
        Kml::Folder { elements, .. } => {
            for element in elements {
                collect_features(element, out);
            }
        }
        Kml::Placemark(placemark) => out.push(placemark_to_feature(placemark)),
        // bare geometries outside any placemark still display, without properties
        Kml::Point(point) => out.push(Feature::new(
            Some(Geometry::Point {
                coordinates: coord_position(&point.coord),
            }),
            None,
        )),
        Kml::LineString(line) => out.push(Feature::new(
            Some(Geometry::LineString {
                coordinates: coord_positions(&line.coords),
            }),
            None,
        )),
        Kml::LinearRing(ring) => out.push(Feature::new(
            Some(Geometry::LineString {
                coordinates: coord_positions(&ring.coords),
            }),
            None,
        )),
        Kml::Polygon(polygon) => out.push(Feature::new(
            Some(Geometry::Polygon {
                coordinates: polygon_rings(polygon),
            }),
            None,
        )),
        Kml::MultiGeometry(multi) => {
            out.push(Feature::new(Some(convert_multi_geometry(multi)), None))
        }
        // styles, network links and other non-feature nodes
        _ => {}
    }
}

fn placemark_to_feature(placemark: &Placemark) -> Feature {
    let geometry = placemark.geometry.as_ref().and_then(convert_geometry);
    Feature::new(geometry, placemark_properties(placemark))
}

fn placemark_properties(placemark: &Placemark) -> Option<serde_json::Value> {
    let mut props = serde_json::Map::new();
    if let Some(name) = &placemark.name {
        props.insert("name".to_string(), serde_json::Value::String(name.clone()));
    }
    if let Some(description) = &placemark.description {
        props.insert(
            "description".to_string(),
            serde_json::Value::String(description.clone()),
        );
    }
    if props.is_empty() {
        None
    } else {
        Some(serde_json::Value::Object(props))
    }
}

fn convert_geometry(geometry: &KmlGeometry) -> Option<Geometry> {
    match geometry {
        KmlGeometry::Point(point) => Some(Geometry::Point {
            coordinates: coord_position(&point.coord),
        }),
        KmlGeometry::LineString(line) => Some(Geometry::LineString {
            coordinates: coord_positions(&line.coords),
        }),
        // a bare ring outside a polygon displays as a line
        KmlGeometry::LinearRing(ring) => Some(Geometry::LineString {
            coordinates: coord_positions(&ring.coords),
        }),
        KmlGeometry::Polygon(polygon) => Some(Geometry::Polygon {
            coordinates: polygon_rings(polygon),
        }),
        KmlGeometry::MultiGeometry(multi) => Some(convert_multi_geometry(multi)),
        // unrecognized geometry elements are dropped
        _ => None,
    }
}

/// MultiGeometry of a single kind collapses to the matching multi-geometry;
/// anything mixed, nested or empty stays a GeometryCollection for the
/// flattener to expand.
fn convert_multi_geometry(multi: &MultiGeometry) -> Geometry {
    let geometries: Vec<Geometry> = multi
        .geometries
        .iter()
        .filter_map(convert_geometry)
        .collect();

    if geometries.is_empty() {
        return Geometry::GeometryCollection { geometries };
    }
    if let Some(coordinates) = collect_kind(&geometries, |g| match g {
        Geometry::Point { coordinates } => Some(coordinates.clone()),
        _ => None,
    }) {
        return Geometry::MultiPoint { coordinates };
    }
    if let Some(coordinates) = collect_kind(&geometries, |g| match g {
        Geometry::LineString { coordinates } => Some(coordinates.clone()),
        _ => None,
    }) {
        return Geometry::MultiLineString { coordinates };
    }
    if let Some(coordinates) = collect_kind(&geometries, |g| match g {
        Geometry::Polygon { coordinates } => Some(coordinates.clone()),
        _ => None,
    }) {
        return Geometry::MultiPolygon { coordinates };
    }

    Geometry::GeometryCollection { geometries }
}

fn collect_kind<T>(
    geometries: &[Geometry],
    extract: impl Fn(&Geometry) -> Option<T>,
) -> Option<Vec<T>> {
    geometries.iter().map(extract).collect()
}

fn polygon_rings(polygon: &Polygon) -> Vec<Vec<Position>> {
    std::iter::once(&polygon.outer)
        .chain(polygon.inner.iter())
        .map(|ring| coord_positions(&ring.coords))
        .collect()
}

fn coord_positions(coords: &[Coord]) -> Vec<Position> {
    coords.iter().map(coord_position).collect()
}

fn coord_position(coord: &Coord) -> Position {
    match coord.z {
        Some(z) => vec![coord.x, coord.y, z],
        None => vec![coord.x, coord.y],
    }
}
