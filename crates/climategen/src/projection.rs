// Geographic to world-space projection.
//
// Every overlay (markers and heat surfaces) must go through `to_cartesian`
// so a region's marker and its surface patch land on the same point.

use glam::{Quat, Vec3};

/// Map latitude/longitude (degrees) and a radius to a point on or above the sphere.
///
/// Polar angle `φ = 90° − lat`, azimuth `θ = lon + 180°`, then
/// `x = −r·sinφ·cosθ`, `y = r·cosφ`, `z = r·sinφ·sinθ`.
/// Out-of-range coordinates are not rejected; they wrap through the trigonometry.
pub fn to_cartesian(lat: f32, lon: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();

    Vec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Unit vector from the sphere's center to `point`.
/// The center itself has no direction; it maps to +Y.
pub fn surface_normal(point: Vec3) -> Vec3 {
    point.try_normalize().unwrap_or(Vec3::Y)
}

/// Rotation taking a patch's local +Z ("out of plane") onto `normal`,
/// so a patch built in the XY plane lies tangent to the sphere.
pub fn tangent_rotation(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Z, normal)
}
