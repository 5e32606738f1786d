use crate::geometry::{Feature, FeatureCollection, Geometry};

/// Expand features holding a GeometryCollection into one feature per
/// sub-geometry, each inheriting the parent properties unchanged. All other
/// features pass through as-is, source order preserved.
///
/// Expansion is one level deep: a collection nested inside a collection
/// survives as a collection-typed feature. An empty collection contributes
/// no output features.
pub fn flatten_collections(collection: FeatureCollection) -> FeatureCollection {
    let features = collection
        .features
        .into_iter()
        .flat_map(|feature| {
            let Feature {
                geometry,
                properties,
                ..
            } = feature;
            match geometry {
                Some(Geometry::GeometryCollection { geometries }) => geometries
                    .into_iter()
                    .map(|sub| Feature::new(Some(sub), properties.clone()))
                    .collect::<Vec<_>>(),
                other => vec![Feature::new(other, properties)],
            }
        })
        .collect();

    FeatureCollection::new(features)
}
