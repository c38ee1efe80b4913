use super::{Point3, Vector3};

/// Computes the spherical exit angles of a rod leaving `origin` towards
/// `target`, as an integer `(vertical, horizontal)` pair in degrees.
///
/// The vertical angle is the colatitude: 0° points straight up, 90° is
/// horizontal, 180° points straight down. The horizontal angle is the
/// azimuth in the XY plane, normalized into `[0, 360)`.
///
/// The two endpoints of the same physical edge get two different angle
/// pairs; the direction is asymmetric by design of the corner sockets.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rod_angles(origin: &Point3, target: &Point3) -> (i32, i32) {
    let delta = target - origin;
    let hypot = delta.x.hypot(delta.y);

    let vertical = if hypot == 0.0 {
        // Connection is exactly vertical.
        if delta.z > 0.0 {
            0.0
        } else {
            180.0
        }
    } else {
        90.0 - (delta.z / hypot).atan().to_degrees()
    };

    let mut horizontal = if delta.x == 0.0 {
        if delta.y >= 0.0 {
            90.0
        } else {
            -90.0
        }
    } else if delta.y == 0.0 {
        if delta.x >= 0.0 {
            0.0
        } else {
            180.0
        }
    } else {
        let mut angle = (delta.x / delta.y).atan().to_degrees();
        if delta.x < 0.0 && delta.y < 0.0 {
            // atan alone is quadrant-blind; fold the third quadrant back.
            angle -= 180.0;
        }
        angle
    };

    if horizontal < 0.0 {
        horizontal += 360.0;
    }

    (vertical.round() as i32, horizontal.round() as i32)
}

/// Computes the axis rotation triple, in degrees, that orients a +Z-aligned
/// rod primitive so it spans from `start` to `end`.
///
/// The X rotation is always zero: tilting away from +Z (around Y) and then
/// spinning around Z is sufficient to reach any direction. Derived from the
/// endpoint positions alone, so the result is reproducible.
#[must_use]
pub fn rod_rotation(start: &Point3, end: &Point3) -> Vector3 {
    let delta = end - start;
    let length = delta.norm();

    let tilt = (delta.z / length).clamp(-1.0, 1.0).acos().to_degrees();
    let spin = delta.y.atan2(delta.x).to_degrees();

    Vector3::new(0.0, tilt, spin)
}
