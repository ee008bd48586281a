//! Attitude math helpers
//!
//! Euler/quaternion conversions and frame rotations shared by the transition
//! core. The Euler convention is Z-Y-X intrinsic (yaw, then pitch, then
//! roll), matching the attitude controllers this core sits between.

use nalgebra::{UnitQuaternion, Vector3};

/// Build an attitude quaternion from a body-frame Euler triple (radians).
pub fn quat_from_euler(roll: f32, pitch: f32, yaw: f32) -> UnitQuaternion<f32> {
    UnitQuaternion::from_euler_angles(roll, pitch, yaw)
}

/// Extract the (roll, pitch, yaw) Euler triple from a quaternion (radians).
pub fn euler_from_quat(q: &UnitQuaternion<f32>) -> (f32, f32, f32) {
    q.euler_angles()
}

/// Rotate a NED-frame velocity into the body frame.
///
/// `q` is the vehicle attitude (body to NED); the inverse rotation maps the
/// inertial velocity onto the body axes, so `.x` is the along-fuselage speed.
pub fn body_frame_velocity(q: &UnitQuaternion<f32>, vx: f32, vy: f32, vz: f32) -> Vector3<f32> {
    q.inverse_transform_vector(&Vector3::new(vx, vy, vz))
}
