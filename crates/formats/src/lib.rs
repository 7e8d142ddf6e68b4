pub mod territory_geojson;
pub mod territory_ingest;

pub use territory_geojson::*;
pub use territory_ingest::*;
