/// Axis-aligned bounding box in a 2D plane.
///
/// Territory polygons use `[lon, lat]` degrees for both corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Smallest box holding every point, or `None` when there are no points.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64; 2]>,
    {
        let mut it = points.into_iter();
        let first = *it.next()?;
        let mut out = Aabb2::new(first, first);
        for p in it {
            out.min[0] = out.min[0].min(p[0]);
            out.min[1] = out.min[1].min(p[1]);
            out.max[0] = out.max[0].max(p[0]);
            out.max[1] = out.max[1].max(p[1]);
        }
        Some(out)
    }

    /// Inclusive containment.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }

    pub fn union(&self, other: &Aabb2) -> Aabb2 {
        Aabb2::new(
            [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        )
    }
}
