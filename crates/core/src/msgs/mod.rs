//! Message record types exchanged with the rest of the flight stack.
//!
//! These structs mirror the bus topics the transition core subscribes to and
//! publishes. Inputs are read-only snapshots taken by the external scheduler
//! before the tick; outputs are written once at the end of the tick. All
//! timestamps are monotonic microseconds since system start.
//!
//! # Coordinate conventions
//!
//! - Attitude as unit quaternion (w, x, y, z) or Euler (roll, pitch, yaw) in
//!   radians, Z-Y-X intrinsic.
//! - Velocities and thrust in the NED/body frames, SI units.
//! - Normalized actuator commands; throttle in [0, 1].

use nalgebra::{UnitQuaternion, Vector3};

/// Vehicle attitude estimate from sensor fusion.
#[derive(Debug, Clone, Copy)]
pub struct VehicleAttitude {
    pub timestamp: u64,
    /// Rotation from body frame to the local NED frame.
    pub q: UnitQuaternion<f32>,
}

impl Default for VehicleAttitude {
    fn default() -> Self {
        Self {
            timestamp: 0,
            q: UnitQuaternion::identity(),
        }
    }
}

/// Local position / velocity estimate.
///
/// Only the velocity portion is consumed here; `v_xy_valid` gates the
/// body-frame speed check during the back transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleLocalPosition {
    pub timestamp: u64,
    /// True if the horizontal velocity estimate is usable.
    pub v_xy_valid: bool,
    /// North velocity (m/s).
    pub vx: f32,
    /// East velocity (m/s).
    pub vy: f32,
    /// Down velocity (m/s).
    pub vz: f32,
}

/// Validated airspeed. `calibrated_airspeed_m_s` is NaN when no airspeed
/// source is available.
#[derive(Debug, Clone, Copy)]
pub struct AirspeedValidated {
    pub timestamp: u64,
    pub calibrated_airspeed_m_s: f32,
}

impl Default for AirspeedValidated {
    fn default() -> Self {
        Self {
            timestamp: 0,
            calibrated_airspeed_m_s: f32::NAN,
        }
    }
}

/// Subset of the vehicle control-mode flags consumed by the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleControlMode {
    pub timestamp: u64,
    /// True when a climb-rate-controlling flight task is active (the
    /// multirotor controller owns the attitude setpoint during transitions).
    pub flag_control_climb_rate_enabled: bool,
}

/// Attitude setpoint, both as Euler angles and as quaternion.
///
/// The two virtual setpoints (multirotor and fixed-wing) arrive as inputs;
/// the blended output setpoint is mutated in place by the core during
/// transitions.
#[derive(Debug, Clone, Copy)]
pub struct VehicleAttitudeSetpoint {
    pub timestamp: u64,
    pub roll_body: f32,
    pub pitch_body: f32,
    pub yaw_body: f32,
    /// Desired attitude quaternion, kept consistent with the Euler triple.
    pub q_d: UnitQuaternion<f32>,
    /// Body-frame thrust demand. X is forward (pusher), Z is up-negative
    /// (lift rotors).
    pub thrust_body: Vector3<f32>,
}

impl Default for VehicleAttitudeSetpoint {
    fn default() -> Self {
        Self {
            timestamp: 0,
            roll_body: 0.0,
            pitch_body: 0.0,
            yaw_body: 0.0,
            q_d: UnitQuaternion::identity(),
            thrust_body: Vector3::zeros(),
        }
    }
}

/// Landing gear commands carried on the gear actuator channel.
pub mod landing_gear {
    pub const GEAR_UP: f32 = 1.0;
    pub const GEAR_DOWN: f32 = -1.0;
}

/// One group of normalized actuator controls.
///
/// `timestamp_sample` is the acquisition time of the data the controls were
/// computed from; `timestamp` is the publication time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorControls {
    pub timestamp: u64,
    pub timestamp_sample: u64,
    pub control: [f32; 8],
}

impl ActuatorControls {
    pub const INDEX_ROLL: usize = 0;
    pub const INDEX_PITCH: usize = 1;
    pub const INDEX_YAW: usize = 2;
    pub const INDEX_THROTTLE: usize = 3;
    pub const INDEX_FLAPS: usize = 4;
    pub const INDEX_SPOILERS: usize = 5;
    pub const INDEX_AIRBRAKES: usize = 6;
    pub const INDEX_LANDING_GEAR: usize = 7;

    /// Snapshot with a given sample timestamp and all channels zero.
    pub fn with_sample_time(timestamp_sample: u64) -> Self {
        Self {
            timestamp: timestamp_sample,
            timestamp_sample,
            control: [0.0; 8],
        }
    }
}

/// Torque setpoint for one actuator group (body x, y, z).
#[derive(Debug, Clone, Copy)]
pub struct VehicleTorqueSetpoint {
    pub timestamp: u64,
    pub timestamp_sample: u64,
    pub xyz: Vector3<f32>,
}

impl Default for VehicleTorqueSetpoint {
    fn default() -> Self {
        Self {
            timestamp: 0,
            timestamp_sample: 0,
            xyz: Vector3::zeros(),
        }
    }
}

/// Thrust setpoint for one actuator group (body x, y, z).
#[derive(Debug, Clone, Copy)]
pub struct VehicleThrustSetpoint {
    pub timestamp: u64,
    pub timestamp_sample: u64,
    pub xyz: Vector3<f32>,
}

impl Default for VehicleThrustSetpoint {
    fn default() -> Self {
        Self {
            timestamp: 0,
            timestamp_sample: 0,
            xyz: Vector3::zeros(),
        }
    }
}

/// Shared VTOL status record.
///
/// The transition failsafe flag is asserted by the external safety
/// supervisor; the core clears it once the pilot no longer requests
/// fixed-wing flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtolVehicleStatus {
    pub timestamp: u64,
    pub vtol_transition_failsafe: bool,
}
