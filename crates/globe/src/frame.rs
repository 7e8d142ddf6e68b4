//! Axis convention of the globe's object space.
//!
//! This is the only place that maps between 3D points and geography:
//!
//! - `+y` is the north pole (latitude `+90`).
//! - `+z` is latitude `0`, longitude `0` (Gulf of Guinea).
//! - `+x` is latitude `0`, longitude `+90` (east, Indian Ocean).
//!
//! So `longitude = atan2(x, z)` and `latitude = asin(y / R)`. A rotation of the
//! mesh by `θ` about `+y` moves every surface feature `θ` eastwards, which is
//! what [`crate::rotation::compensate`] undoes.
//!
//! Imagery must be wrapped with [`texture_uv`] so that drawn features sit
//! where the resolver reports them.

use foundation::math::{GeoCoordinate, Vec3, canonical_f64};

/// Radius of the rendered globe in scene units.
pub const DEFAULT_GLOBE_RADIUS: f64 = 2.0;

/// Convert an object-space point on (or near) the sphere into geography.
///
/// The point is first rescaled to length `radius`, so intersection results
/// that drifted slightly off the surface still resolve. Returns `None` when
/// the point has zero length or is not finite, or when `radius` is not a
/// positive finite number. At the poles the longitude is reported as `0`.
pub fn surface_to_geo(point: Vec3, radius: f64) -> Option<GeoCoordinate> {
    if !(radius.is_finite() && radius > 0.0) {
        return None;
    }
    let p = point.with_length(radius)?;

    let lat = (p.y / radius).clamp(-1.0, 1.0).asin().to_degrees();
    let lng = p.x.atan2(p.z).to_degrees();
    Some(GeoCoordinate::new(lat, lng))
}

/// Object-space point on a sphere of `radius` for a coordinate.
pub fn geo_to_surface(coord: GeoCoordinate, radius: f64) -> Vec3 {
    let (sin_lat, cos_lat) = coord.lat_deg.to_radians().sin_cos();
    let (sin_lng, cos_lng) = coord.lng_deg.to_radians().sin_cos();
    Vec3::new(
        radius * cos_lat * sin_lng,
        radius * sin_lat,
        radius * cos_lat * cos_lng,
    )
}

/// Equirectangular texture coordinates `[u, v]` for a coordinate.
///
/// `u` runs west to east from the antimeridian, `v` runs north to south.
pub fn texture_uv(coord: GeoCoordinate) -> [f64; 2] {
    [
        canonical_f64((coord.lng_deg + 180.0) / 360.0),
        canonical_f64((90.0 - coord.lat_deg) / 180.0),
    ]
}
