use foundation::bounds::Aabb2;

/// Closed ring of `[lon, lat]` vertices in degrees.
///
/// The last vertex connects back to the first. A repeated closing vertex (as
/// GeoJSON writes it) is dropped on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    vertices: Vec<[f64; 2]>,
}

impl Ring {
    pub fn new(mut vertices: Vec<[f64; 2]>) -> Self {
        drop_closing_duplicate(&mut vertices);
        Self { vertices }
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    /// Rings with fewer than three distinct vertices enclose nothing.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Even-odd crossing test of a horizontal ray from `p` towards `+x`.
    pub fn crosses(&self, p: [f64; 2]) -> bool {
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = v[i];
            let pj = v[j];
            if (pi[1] > p[1]) != (pj[1] > p[1])
                && p[0] < (pj[0] - pi[0]) * (p[1] - pi[1]) / (pj[1] - pi[1]) + pi[0]
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// One polygon: ring 0 is the outer boundary, later rings are holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
    bounds: Option<Aabb2>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        // A degenerate outer ring empties the polygon; its holes mean nothing.
        let outer_ok = rings.first().is_some_and(|outer| !outer.is_degenerate());
        let rings: Vec<Ring> = if outer_ok {
            rings.into_iter().filter(|r| !r.is_degenerate()).collect()
        } else {
            Vec::new()
        };
        let bounds = rings
            .first()
            .and_then(|outer| Aabb2::from_points(outer.vertices()));
        Self { rings, bounds }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn bounds(&self) -> Option<Aabb2> {
        self.bounds
    }

    /// Point-in-polygon over all rings with even-odd parity, so a point inside
    /// a hole is outside the polygon.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if !bounds.contains(p) {
            return false;
        }
        self.rings
            .iter()
            .fold(false, |inside, ring| inside ^ ring.crosses(p))
    }
}

fn drop_closing_duplicate(points: &mut Vec<[f64; 2]>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9 {
            points.pop();
        }
    }
}
