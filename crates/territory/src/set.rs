use foundation::bounds::Aabb2;
use foundation::math::GeoCoordinate;

use crate::polygon::Polygon;

/// A named region made of one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    name: String,
    polygons: Vec<Polygon>,
    bounds: Option<Aabb2>,
}

impl Territory {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        let bounds = polygons
            .iter()
            .filter_map(|p| p.bounds())
            .reduce(|a, b| a.union(&b));
        Self {
            name: name.into(),
            polygons,
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn bounds(&self) -> Option<Aabb2> {
        self.bounds
    }

    /// Inside any constituent polygon.
    ///
    /// Longitude 180 is also tried as -180, since coordinates normalize the
    /// antimeridian to +180 while datasets draw edges on either side.
    pub fn contains(&self, coord: GeoCoordinate) -> bool {
        let p = coord.lon_lat();
        if self.contains_lon_lat(p) {
            return true;
        }
        p[0] == 180.0 && self.contains_lon_lat([-180.0, p[1]])
    }

    fn contains_lon_lat(&self, p: [f64; 2]) -> bool {
        match self.bounds {
            Some(b) if b.contains(p) => self.polygons.iter().any(|poly| poly.contains(p)),
            _ => false,
        }
    }
}

/// Outcome of classifying a coordinate.
///
/// `Unavailable` means the dataset could not be consulted; it is never folded
/// into `Ocean`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Territory { index: usize, name: String },
    Ocean,
    Unavailable,
}

impl Classification {
    pub fn label(&self) -> &str {
        match self {
            Classification::Territory { name, .. } => name.as_str(),
            Classification::Ocean => "ocean",
            Classification::Unavailable => "unavailable",
        }
    }
}

/// An immutable, ordered territory dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerritorySet {
    territories: Vec<Territory>,
    content_hash: Option<String>,
    skipped_features: usize,
}

impl TerritorySet {
    pub fn new(territories: Vec<Territory>) -> Self {
        Self {
            territories,
            content_hash: None,
            skipped_features: 0,
        }
    }

    /// Attach the source payload hash and the number of features the codec
    /// could not turn into territories.
    pub fn with_source(mut self, content_hash: impl Into<String>, skipped_features: usize) -> Self {
        self.content_hash = Some(content_hash.into());
        self.skipped_features = skipped_features;
        self
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }

    pub fn skipped_features(&self) -> usize {
        self.skipped_features
    }

    /// First territory in dataset order that contains the coordinate.
    pub fn locate(&self, coord: GeoCoordinate) -> Option<(usize, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .find(|(_, t)| t.contains(coord))
    }

    pub fn classify(&self, coord: GeoCoordinate) -> Classification {
        match self.locate(coord) {
            Some((index, t)) => Classification::Territory {
                index,
                name: t.name().to_string(),
            },
            None => Classification::Ocean,
        }
    }
}
