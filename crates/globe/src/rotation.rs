use foundation::math::Vec3;

/// Rotation of the globe mesh about its vertical (`+y`) axis at one instant.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RotationState {
    pub angle_rad: f64,
}

impl RotationState {
    pub fn new(angle_rad: f64) -> Self {
        Self { angle_rad }
    }
}

/// Rotate a point about `+y` by `angle_rad` (right-handed, same sense as the
/// mesh's `rotation.y`).
pub fn rotate_about_y(point: Vec3, angle_rad: f64) -> Vec3 {
    let (s, c) = angle_rad.sin_cos();
    Vec3::new(
        c * point.x + s * point.z,
        point.y,
        -s * point.x + c * point.z,
    )
}

/// Map a world-space click back into the globe's unrotated object space.
///
/// A zero rotation goes through the same arithmetic and returns the input.
pub fn compensate(click: Vec3, rotation: RotationState) -> Vec3 {
    rotate_about_y(click, -rotation.angle_rad)
}
