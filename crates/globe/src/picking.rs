use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Where a pointer ray meets the globe, in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub distance: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
        }
    }
}

/// Ray/sphere picking.
///
/// Returns the first intersection in front of the ray origin, measured along
/// the normalized direction. A ray starting inside the sphere returns its exit
/// point. Zero or non-finite directions never hit.
pub fn pick_sphere(ray: Ray, sphere: Sphere, opts: PickOptions) -> Option<SurfaceHit> {
    let dir = ray.dir.normalized()?;
    if !ray.origin.is_finite() || !(sphere.radius.is_finite() && sphere.radius > 0.0) {
        return None;
    }

    let oc = ray.origin - sphere.center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sq = disc.sqrt();
    let near = -b - sq;
    let far = -b + sq;
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };
    if t > opts.max_distance {
        return None;
    }

    Some(SurfaceHit {
        point: ray.origin + dir.scale(t),
        distance: t,
    })
}
