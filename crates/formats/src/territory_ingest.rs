use territory::{Polygon, Ring, Territory, TerritorySet};

use crate::territory_geojson::{TerritoryCollection, TerritoryDatasetError};

impl TerritoryCollection {
    /// Build the runtime dataset. Order is preserved so first-match lookups
    /// follow the source file.
    pub fn into_territory_set(self) -> TerritorySet {
        let territories = self
            .features
            .into_iter()
            .map(|feature| {
                let polygons = feature
                    .polygons
                    .into_iter()
                    .map(|rings| Polygon::new(rings.into_iter().map(Ring::new).collect()))
                    .collect();
                Territory::new(feature.name, polygons)
            })
            .collect();
        TerritorySet::new(territories)
    }
}

/// Decode a GeoJSON payload into a dataset tagged with its blake3 hash.
pub fn territory_set_from_bytes(payload: &[u8]) -> Result<TerritorySet, TerritoryDatasetError> {
    let content_hash = blake3::hash(payload).to_hex().to_string();
    let collection = TerritoryCollection::from_geojson_slice(payload)?;
    let skipped = collection.skipped;
    Ok(collection
        .into_territory_set()
        .with_source(content_hash, skipped))
}
