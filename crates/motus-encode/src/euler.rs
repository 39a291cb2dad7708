//! Quaternion to Euler decomposition, ZXY order, degrees
//!
//! The artifact's rotation channels are declared Zrotation Xrotation
//! Yrotation, so decomposition order is load-bearing: R = Rz * Rx * Ry.

use motus_core::{Mat3, Quat, Vec3};

/// Euler angles in degrees, ZXY application order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerZxy {
    pub z: f32,
    pub x: f32,
    pub y: f32,
}

/// Decompose a unit quaternion into ZXY Euler angles (degrees).
///
/// At gimbal lock (sin X near ±1) Y is fixed at zero and Z absorbs the
/// remaining rotation.
pub fn quat_to_euler_zxy(q: &Quat) -> EulerZxy {
    let Mat3 { m } = q.to_mat3();

    let sx = m[2][1].clamp(-1.0, 1.0);
    let x = sx.asin();
    let (z, y) = if sx.abs() < 0.9999 {
        (
            (-m[0][1]).atan2(m[1][1]),
            (-m[2][0]).atan2(m[2][2]),
        )
    } else {
        (m[1][0].atan2(m[0][0]), 0.0)
    };

    EulerZxy {
        z: z.to_degrees(),
        x: x.to_degrees(),
        y: y.to_degrees(),
    }
}

/// Compose a quaternion from ZXY Euler angles (degrees)
pub fn quat_from_euler_zxy(z_deg: f32, x_deg: f32, y_deg: f32) -> Quat {
    let qz = Quat::from_axis_angle(&Vec3::new(0.0, 0.0, 1.0), z_deg.to_radians());
    let qx = Quat::from_axis_angle(&Vec3::new(1.0, 0.0, 0.0), x_deg.to_radians());
    let qy = Quat::from_axis_angle(&Vec3::new(0.0, 1.0, 0.0), y_deg.to_radians());
    qz.mul(&qx).mul(&qy)
}
