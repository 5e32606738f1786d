use crate::geometry::{lon_lat, FeatureCollection, Geometry};
use crate::models::Bounds;

/// Outward padding applied to a computed box, roughly 1 km at the equator.
pub const BOUNDS_BUFFER_DEG: f64 = 0.01;

// Default map location when a document yields no usable coordinates
// (San Francisco).
const FALLBACK_LAT: f64 = 37.7749;
const FALLBACK_LNG: f64 = -122.4194;

// Worst-possible seed so any real coordinate improves every edge.
const EMPTY_SENTINEL: Bounds = Bounds {
    north: -90.0,
    south: 90.0,
    east: -180.0,
    west: 180.0,
};

fn fallback_bounds() -> Bounds {
    Bounds {
        north: FALLBACK_LAT,
        south: FALLBACK_LAT,
        east: FALLBACK_LNG,
        west: FALLBACK_LNG,
    }
}

fn update(bounds: &mut Bounds, position: &[f64]) {
    let Some((lon, lat)) = lon_lat(position) else {
        return;
    };
    if !lon.is_finite() || !lat.is_finite() {
        return;
    }
    bounds.north = bounds.north.max(lat);
    bounds.south = bounds.south.min(lat);
    bounds.east = bounds.east.max(lon);
    bounds.west = bounds.west.min(lon);
}

// Visit coordinates according to each kind's nesting shape. Polygons count
// only their exterior ring; leftover collections were expanded upstream and
// contribute nothing here.
fn visit_geometry(bounds: &mut Bounds, geometry: &Geometry) {
    match geometry {
        Geometry::Point { coordinates } => update(bounds, coordinates),
        Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
            for position in coordinates {
                update(bounds, position);
            }
        }
        Geometry::Polygon { coordinates } => {
            if let Some(ring) = coordinates.first() {
                for position in ring {
                    update(bounds, position);
                }
            }
        }
        Geometry::MultiLineString { coordinates } => {
            for line in coordinates {
                for position in line {
                    update(bounds, position);
                }
            }
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in coordinates {
                if let Some(ring) = polygon.first() {
                    for position in ring {
                        update(bounds, position);
                    }
                }
            }
        }
        Geometry::GeometryCollection { .. } => {}
    }
}

/// Compute the padded bounding box of a collection. A document with no valid
/// coordinate falls back to a fixed degenerate box so map fitting always
/// receives something renderable.
pub fn compute_bounds(collection: &FeatureCollection) -> Bounds {
    let mut bounds = EMPTY_SENTINEL;

    for feature in &collection.features {
        if let Some(geometry) = &feature.geometry {
            visit_geometry(&mut bounds, geometry);
        }
    }

    // Any edge still at its seed means nothing was visited.
    if bounds.north == EMPTY_SENTINEL.north
        || bounds.south == EMPTY_SENTINEL.south
        || bounds.east == EMPTY_SENTINEL.east
        || bounds.west == EMPTY_SENTINEL.west
    {
        return fallback_bounds();
    }

    Bounds {
        north: bounds.north + BOUNDS_BUFFER_DEG,
        south: bounds.south - BOUNDS_BUFFER_DEG,
        east: bounds.east + BOUNDS_BUFFER_DEG,
        west: bounds.west - BOUNDS_BUFFER_DEG,
    }
}
