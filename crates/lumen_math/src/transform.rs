// Direction transforms used by camera ray generation and secondary rays.

use crate::Vec3;

/// Rotate `v` about the unit axis `k` by `angle` radians (Rodrigues' formula).
///
/// `v·cosθ + (k×v)·sinθ + k·(k·v)·(1 - cosθ)`
#[inline]
pub fn rotate_about_axis(v: Vec3, k: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + k.cross(v) * sin + k * k.dot(v) * (1.0 - cos)
}

/// Reflect the incident direction `i` about the normal `n`.
#[inline]
pub fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * i.dot(n) * n
}

/// Refract the incident direction `i` through a surface with normal `n`
/// separating vacuum from a medium of index `ior`.
///
/// The normal may face either side; when `i` leaves the medium the indices
/// are swapped and the normal flipped. Returns `None` on total internal
/// reflection.
pub fn refract(i: Vec3, n: Vec3, ior: f64) -> Option<Vec3> {
    let mut cosi = i.dot(n).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    let mut normal = n;

    if cosi < 0.0 {
        cosi = -cosi;
    } else {
        std::mem::swap(&mut etai, &mut etat);
        normal = -n;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        return None;
    }

    Some(eta * i + (eta * cosi - k.sqrt()) * normal)
}
