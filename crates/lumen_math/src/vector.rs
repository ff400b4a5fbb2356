//! Free vector operations used by the light transport code.

use crate::Vec3;

/// Vectors shorter than this are treated as having no direction.
pub const NORMALIZE_EPSILON: f32 = 1e-8;

/// Normalize `v`, or `None` when it is too short to carry a direction.
#[inline]
pub fn safe_normalize(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    if !(length > NORMALIZE_EPSILON) {
        return None;
    }
    let unit = v / length;
    unit.is_finite().then_some(unit)
}

/// Mirror `incident` about the surface normal `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Bend `incident` through a surface with Snell's law.
///
/// `normal` is the outward normal, `eta_t` the index on the far side of the
/// surface and `eta_i` the index the ray travels in. A ray arriving from inside
/// (facing along the normal) is handled by flipping the normal and swapping the
/// indices. Total internal reflection yields the mirror direction.
pub fn refract(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> Vec3 {
    let cosi = -incident.dot(normal).clamp(-1.0, 1.0);
    if cosi < 0.0 {
        return refract(incident, -normal, eta_i, eta_t);
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return reflect(incident, normal);
    }
    incident * eta + normal * (eta * cosi - k.sqrt())
}
