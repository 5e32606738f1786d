use serde::{Deserialize, Serialize};

/// A coordinate position: [longitude, latitude] with an optional altitude
/// third component. Only the first two components are ever read.
pub type Position = Vec<f64>;

// Geometry kinds are a closed set; every function matching on this enum is
// exhaustive so a new kind cannot be added without updating all consumers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Type label as it appears in element counts and records.
    pub fn type_label(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Geometry::GeometryCollection { .. })
    }

    /// The raw coordinates payload for element records. Collections carry no
    /// single coordinates array, so they yield None.
    pub fn coordinates_json(&self) -> Option<serde_json::Value> {
        match self {
            Geometry::Point { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::MultiPoint { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::LineString { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::MultiLineString { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::Polygon { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::MultiPolygon { coordinates } => serde_json::to_value(coordinates).ok(),
            Geometry::GeometryCollection { .. } => None,
        }
    }
}

/// Read the [lon, lat] pair from a position, skipping malformed entries.
pub fn lon_lat(position: &[f64]) -> Option<(f64, f64)> {
    if position.len() >= 2 {
        Some((position[0], position[1]))
    } else {
        None
    }
}

// GeoJSON-shaped feature structure
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Feature {
    pub r#type: String,
    pub geometry: Option<Geometry>,
    pub properties: Option<serde_json::Value>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: Option<serde_json::Value>) -> Self {
        Feature {
            r#type: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FeatureCollection {
    pub r#type: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            r#type: "FeatureCollection".to_string(),
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_serializes_with_type_tag() {
        let point = Geometry::Point {
            coordinates: vec![-122.4194, 37.7749],
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], -122.4194);
        assert_eq!(json["coordinates"][1], 37.7749);
    }

    #[test]
    fn test_collection_has_no_coordinates_payload() {
        let collection = Geometry::GeometryCollection {
            geometries: vec![Geometry::Point {
                coordinates: vec![0.0, 0.0],
            }],
        };
        assert!(collection.coordinates_json().is_none());
        assert!(collection.is_collection());
    }

    #[test]
    fn test_lon_lat_skips_short_positions() {
        assert_eq!(lon_lat(&[10.0, 20.0, 30.0]), Some((10.0, 20.0)));
        assert_eq!(lon_lat(&[10.0]), None);
        assert_eq!(lon_lat(&[]), None);
    }

    #[test]
    fn test_feature_roundtrip_keeps_geojson_shape() {
        let feature = Feature::new(
            Some(Geometry::LineString {
                coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            }),
            Some(serde_json::json!({"name": "track"})),
        );
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "LineString");
        assert_eq!(json["properties"]["name"], "track");
    }
}
