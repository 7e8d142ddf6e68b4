use foundation::math::{GeoCoordinate, Vec3};

use crate::frame::{DEFAULT_GLOBE_RADIUS, surface_to_geo};
use crate::picking::{PickOptions, Ray, Sphere, SurfaceHit, pick_sphere};
use crate::rotation::{RotationState, compensate};

#[derive(Debug, Clone, PartialEq)]
pub enum GlobeError {
    InvalidRadius(f64),
}

impl std::fmt::Display for GlobeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlobeError::InvalidRadius(r) => {
                write!(f, "globe radius must be positive and finite, got {r}")
            }
        }
    }
}

impl std::error::Error for GlobeError {}

/// A resolved click: where the ray met the globe and what is there.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedClick {
    pub hit: SurfaceHit,
    pub object_point: Vec3,
    pub coord: GeoCoordinate,
}

/// Turns clicks on the spinning globe into stable geography.
///
/// The globe is centered at the world origin. Rendering state is passed in
/// per call; the resolver holds nothing but the radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeResolver {
    radius: f64,
}

impl GlobeResolver {
    pub fn new(radius: f64) -> Result<Self, GlobeError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GlobeError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Resolve a world-space intersection point under the given rotation.
    ///
    /// Returns `None` only for degenerate points (zero length, not finite).
    pub fn resolve_click(&self, click: Vec3, rotation: RotationState) -> Option<GeoCoordinate> {
        surface_to_geo(compensate(click, rotation), self.radius)
    }

    /// Pick the globe with a pointer ray, then resolve the hit.
    pub fn resolve_ray(&self, ray: Ray, rotation: RotationState) -> Option<ResolvedClick> {
        let sphere = Sphere::new(Vec3::ZERO, self.radius);
        let hit = pick_sphere(ray, sphere, PickOptions::default())?;
        let object_point = compensate(hit.point, rotation);
        let coord = surface_to_geo(object_point, self.radius)?;
        Some(ResolvedClick {
            hit,
            object_point,
            coord,
        })
    }
}

impl Default for GlobeResolver {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GLOBE_RADIUS,
        }
    }
}
