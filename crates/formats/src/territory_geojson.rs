use serde_json::{Map, Value};

/// Property keys tried, in order, for a territory's display name.
pub const NAME_KEYS: &[&str] = &["name", "NAME", "ADMIN", "admin", "name_long"];

/// Ring of `[lon, lat]` vertices as written in the source.
pub type RawRing = Vec<[f64; 2]>;
/// Polygon as a list of rings; the first ring is the outer boundary.
pub type RawPolygon = Vec<RawRing>;

#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryFeature {
    pub name: String,
    pub polygons: Vec<RawPolygon>,
}

/// Area features of a GeoJSON FeatureCollection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerritoryCollection {
    pub features: Vec<TerritoryFeature>,
    /// Features without area geometry or without any usable name.
    pub skipped: usize,
}

#[derive(Debug)]
pub enum TerritoryDatasetError {
    InvalidJson(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for TerritoryDatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerritoryDatasetError::InvalidJson(e) => write!(f, "JSON parse error: {e}"),
            TerritoryDatasetError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            TerritoryDatasetError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for TerritoryDatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerritoryDatasetError::InvalidJson(e) => Some(e),
            _ => None,
        }
    }
}

impl TerritoryCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, TerritoryDatasetError> {
        let value: Value =
            serde_json::from_str(payload).map_err(TerritoryDatasetError::InvalidJson)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_slice(payload: &[u8]) -> Result<Self, TerritoryDatasetError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(TerritoryDatasetError::InvalidJson)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, TerritoryDatasetError> {
        let obj = value
            .as_object()
            .ok_or(TerritoryDatasetError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(TerritoryDatasetError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(TerritoryDatasetError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(TerritoryDatasetError::NotAFeatureCollection)?;

        let mut out = TerritoryCollection::default();
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: String| TerritoryDatasetError::InvalidFeature { index, reason };

            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;

            let feat_type = feat_obj
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| invalid("feature missing type".to_string()))?;
            if feat_type != "Feature" {
                return Err(invalid(format!("unexpected feature type: {feat_type}")));
            }

            // `"geometry": null` is legal GeoJSON for unlocated features.
            let polygons = match feat_obj.get("geometry") {
                None => return Err(invalid("feature missing geometry".to_string())),
                Some(Value::Null) => None,
                Some(geometry) => parse_area_geometry(geometry).map_err(invalid)?,
            };
            let Some(polygons) = polygons else {
                out.skipped += 1;
                continue;
            };

            let properties = feat_obj.get("properties").and_then(|v| v.as_object());
            let Some(name) = feature_name(properties, feat_obj.get("id")) else {
                out.skipped += 1;
                continue;
            };

            out.features.push(TerritoryFeature { name, polygons });
        }

        Ok(out)
    }
}

fn feature_name(properties: Option<&Map<String, Value>>, id: Option<&Value>) -> Option<String> {
    if let Some(props) = properties {
        for key in NAME_KEYS {
            if let Some(Value::String(s)) = props.get(*key)
                && !s.trim().is_empty()
            {
                return Some(s.clone());
            }
        }
    }
    match id {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Area geometry as polygons, `Ok(None)` for well-formed non-area geometry.
fn parse_area_geometry(value: &Value) -> Result<Option<Vec<RawPolygon>>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" => {
            let coords = coordinates(obj)?;
            Ok(Some(vec![parse_polygon(coords)?]))
        }
        "MultiPolygon" => {
            let coords = coordinates(obj)?;
            Ok(Some(parse_multi_polygon(coords)?))
        }
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "GeometryCollection" => {
            Ok(None)
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn coordinates(obj: &Map<String, Value>) -> Result<&Value, String> {
    obj.get("coordinates")
        .ok_or("geometry missing coordinates".to_string())
}

fn parse_position(coords: &Value) -> Result<[f64; 2], String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or("position lon must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok([lon, lat])
}

fn parse_ring(coords: &Value) -> Result<RawRing, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_position(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<RawPolygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<RawPolygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{TerritoryCollection, TerritoryDatasetError};
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = include_str!("../assets/territories.geojson");

    #[test]
    fn parses_fixture_areas_and_counts_skips() {
        let c = TerritoryCollection::from_geojson_str(FIXTURE).expect("parse fixture");
        let names: Vec<&str> = c.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Japan", "South Africa", "Lesotho", "GRL"]);
        // Point feature, null geometry, and the nameless polygon.
        assert_eq!(c.skipped, 3);
    }

    #[test]
    fn keeps_multi_polygon_parts_and_holes() {
        let c = TerritoryCollection::from_geojson_str(FIXTURE).unwrap();
        assert_eq!(c.features[0].polygons.len(), 2);
        assert_eq!(c.features[1].polygons.len(), 1);
        assert_eq!(c.features[1].polygons[0].len(), 2);
    }

    #[test]
    fn numeric_ids_name_features() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":756,"properties":{"iso":"CH"},
             "geometry":{"type":"Polygon","coordinates":[[[6,46],[10,46],[10,47.8],[6,47.8],[6,46]]]}}
        ]}"#;
        let c = TerritoryCollection::from_geojson_str(payload).unwrap();
        assert_eq!(c.features[0].name, "756");
    }

    #[test]
    fn rejects_non_collections() {
        let err = TerritoryCollection::from_geojson_str(r#"{"type":"Feature"}"#).unwrap_err();
        assert!(matches!(err, TerritoryDatasetError::NotAFeatureCollection));

        let err = TerritoryCollection::from_geojson_str("not json").unwrap_err();
        assert!(matches!(err, TerritoryDatasetError::InvalidJson(_)));
    }

    #[test]
    fn reports_index_of_malformed_feature() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"ok"},"geometry":null},
            {"type":"Feature","properties":{"name":"bad"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,"x"],[1,1]]]}}
        ]}"#;
        let err = TerritoryCollection::from_geojson_str(payload).unwrap_err();
        match err {
            TerritoryDatasetError::InvalidFeature { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("lat"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_geometry_types_are_errors() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"x"},
             "geometry":{"type":"Circle","coordinates":[0,0]}}
        ]}"#;
        let err = TerritoryCollection::from_geojson_str(payload).unwrap_err();
        assert!(err.to_string().contains("unsupported geometry type: Circle"));
    }
}
