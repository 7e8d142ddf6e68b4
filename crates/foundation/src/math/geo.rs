use super::canonical_f64;

/// Geographic coordinate in degrees.
///
/// Latitude lies in `[-90, 90]`, longitude in `(-180, 180]`. Values built
/// through [`GeoCoordinate::new`] are normalized to those ranges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoordinate {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl GeoCoordinate {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self {
            lat_deg: canonical_f64(lat_deg.clamp(-90.0, 90.0)),
            lng_deg: wrap_longitude_deg(lng_deg),
        }
    }

    /// Planar `(x, y)` used by polygon tests: longitude first, like GeoJSON.
    pub fn lon_lat(self) -> [f64; 2] {
        [self.lng_deg, self.lat_deg]
    }
}

/// Wrap a longitude into `(-180, 180]`.
///
/// `185` becomes `-175`, `-185` becomes `175`, and `-180` becomes `180`.
pub fn wrap_longitude_deg(lng_deg: f64) -> f64 {
    if !lng_deg.is_finite() {
        return lng_deg;
    }
    let mut lng = lng_deg;
    if lng > 180.0 || lng <= -180.0 {
        lng = (lng + 180.0).rem_euclid(360.0) - 180.0;
        if lng <= -180.0 {
            lng += 360.0;
        }
    }
    canonical_f64(lng)
}

#[cfg(test)]
mod tests {
    use super::{GeoCoordinate, wrap_longitude_deg};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn wraps_just_past_the_antimeridian() {
        assert_close(wrap_longitude_deg(185.0), -175.0, 1e-12);
        assert_close(wrap_longitude_deg(-185.0), 175.0, 1e-12);
    }

    #[test]
    fn keeps_in_range_values_and_maps_minus_180() {
        assert_eq!(wrap_longitude_deg(0.0), 0.0);
        assert_eq!(wrap_longitude_deg(179.5), 179.5);
        assert_eq!(wrap_longitude_deg(180.0), 180.0);
        assert_eq!(wrap_longitude_deg(-180.0), 180.0);
        assert_eq!(wrap_longitude_deg(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn wraps_multiple_turns() {
        assert_close(wrap_longitude_deg(725.0), 5.0, 1e-9);
        assert_close(wrap_longitude_deg(-900.0), 180.0, 1e-9);
        for i in -20..=20 {
            let v = wrap_longitude_deg(i as f64 * 97.3);
            assert!(v > -180.0 && v <= 180.0, "{v} out of range");
        }
    }

    #[test]
    fn constructor_normalizes() {
        let c = GeoCoordinate::new(91.0, 190.0);
        assert_eq!(c.lat_deg, 90.0);
        assert_close(c.lng_deg, -170.0, 1e-12);
        assert_eq!(c.lon_lat(), [c.lng_deg, c.lat_deg]);
    }
}
