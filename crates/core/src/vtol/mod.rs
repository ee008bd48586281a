//! Standard VTOL transition core
//!
//! Sequences a standard-configuration VTOL (independent lift rotors plus a
//! pusher propeller) between hover and cruise flight. The core runs four
//! stages per control tick, in order:
//!
//! 1. Flight-mode state machine ([`scheduler`]) - entry/exit decisions
//!    between the four flight modes, including the failsafe override.
//! 2. Transition schedules ([`transition`]) - rotor/wing weight blending,
//!    pusher throttle ramps, and the commanded attitude setpoint. Only runs
//!    while a transition is active.
//! 3. Hover/cruise pass-through - pusher assist while hovering, shared
//!    cruise state otherwise.
//! 4. Actuator mixer ([`mixer`]) - maps both controller input streams onto
//!    the two actuator groups and the torque/thrust setpoints.
//!
//! The core owns the schedule, the blend weights and the pusher state across
//! ticks; everything else is borrowed for the duration of one tick.

pub mod mixer;
pub mod scheduler;
pub mod supervisor;
pub mod transition;

pub use supervisor::{MockSupervisor, QuadchuteReason, VtolSupervisor};

use crate::msgs::{
    ActuatorControls, AirspeedValidated, VehicleAttitude, VehicleAttitudeSetpoint,
    VehicleControlMode, VehicleLocalPosition, VehicleThrustSetpoint, VehicleTorqueSetpoint,
};
use crate::parameters::VtolParams;
use crate::slew_rate::SlewRateLimiter;
use crate::traits::TimeSource;

/// Virtual attitude setpoints older than this are ignored and the previous
/// output setpoint stays active.
const SETPOINT_TIMEOUT_US: u64 = 1_000_000;

/// Flaps and spoilers move at most this fast (full range in 2 s).
const SURFACE_SLEW_RATE: f32 = 0.5;

/// Internal flight-mode schedule of the transition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    /// Hover on lift rotors.
    McMode,
    /// Accelerating on the pusher, rotors handing over to the wing.
    TransitionToFw,
    /// Cruise on the wing and pusher.
    FwMode,
    /// Decelerating, rotors taking authority back.
    TransitionToMc,
}

/// Coarse public flight mode consumed by outer systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtolMode {
    RotaryWing,
    FixedWing,
    TransitionToFw,
    TransitionToMc,
}

/// Flight-mode schedule: the current mode plus the timestamp of the last
/// transition entry (undefined meaning outside transitions).
#[derive(Debug, Clone, Copy)]
struct VtolSchedule {
    flight_mode: FlightMode,
    /// Monotonic microsecond timestamp of the last transition entry.
    transition_start: u64,
}

/// Read-only input snapshot for one control tick.
///
/// All records are captured by the external scheduler before the tick and
/// outlive it; the core never stores these references.
pub struct TickInputs<'a> {
    pub attitude: &'a VehicleAttitude,
    pub local_position: &'a VehicleLocalPosition,
    pub airspeed: &'a AirspeedValidated,
    pub control_mode: &'a VehicleControlMode,
    /// Attitude setpoint from the multirotor attitude controller.
    pub mc_virtual_att_sp: &'a VehicleAttitudeSetpoint,
    /// Attitude setpoint from the fixed-wing attitude controller.
    pub fw_virtual_att_sp: &'a VehicleAttitudeSetpoint,
    /// Control vector from the multirotor attitude controller.
    pub actuators_mc_in: &'a ActuatorControls,
    /// Control vector from the fixed-wing attitude controller.
    pub actuators_fw_in: &'a ActuatorControls,
    /// Pilot (or commander) requests fixed-wing flight.
    pub fixed_wing_requested: bool,
}

/// Actuator-side outputs of one control tick.
///
/// Group 0 drives the lift rotors, group 1 the fixed-wing surfaces and the
/// pusher. The records persist across ticks and are overwritten in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorOutputs {
    pub actuator_controls_0: ActuatorControls,
    pub actuator_controls_1: ActuatorControls,
    pub torque_setpoint_0: VehicleTorqueSetpoint,
    pub torque_setpoint_1: VehicleTorqueSetpoint,
    pub thrust_setpoint_0: VehicleThrustSetpoint,
    pub thrust_setpoint_1: VehicleThrustSetpoint,
}

/// Transition control core for a standard-configuration VTOL.
///
/// Generic over the platform clock and the outer-controller capability
/// interface so the identical control path runs on target and in host tests.
pub struct StandardVtol<T: TimeSource, S: VtolSupervisor> {
    time: T,
    supervisor: S,
    params: VtolParams,

    schedule: VtolSchedule,
    vtol_mode: VtolMode,

    // The four weights always carry the same value; they stay separate
    // fields to keep the door open for per-axis blending.
    mc_roll_weight: f32,
    mc_pitch_weight: f32,
    mc_yaw_weight: f32,
    mc_throttle_weight: f32,

    pusher_throttle: f32,
    reverse_output: f32,

    /// Timestamp of the last completed front transition.
    trans_finished_ts: u64,

    flaps_setpoint: SlewRateLimiter,
    spoilers_setpoint: SlewRateLimiter,
}

impl<T: TimeSource, S: VtolSupervisor> StandardVtol<T, S> {
    /// Create the core in hover with full rotor authority.
    pub fn new(time: T, supervisor: S, mut params: VtolParams) -> Self {
        params.sanitize();

        Self {
            time,
            supervisor,
            params,
            schedule: VtolSchedule {
                flight_mode: FlightMode::McMode,
                transition_start: 0,
            },
            vtol_mode: VtolMode::RotaryWing,
            mc_roll_weight: 1.0,
            mc_pitch_weight: 1.0,
            mc_yaw_weight: 1.0,
            mc_throttle_weight: 1.0,
            pusher_throttle: 0.0,
            reverse_output: 0.0,
            trans_finished_ts: 0,
            flaps_setpoint: SlewRateLimiter::new(SURFACE_SLEW_RATE),
            spoilers_setpoint: SlewRateLimiter::new(SURFACE_SLEW_RATE),
        }
    }

    /// Run one control tick.
    ///
    /// `dt` is the scheduler tick interval in seconds. The attitude setpoint
    /// is mutated in place during transitions and left untouched otherwise;
    /// the status record's failsafe flag is cleared once the pilot releases
    /// the fixed-wing request.
    pub fn tick(
        &mut self,
        dt: f32,
        inputs: &TickInputs<'_>,
        status: &mut crate::msgs::VtolVehicleStatus,
        att_sp: &mut VehicleAttitudeSetpoint,
        outputs: &mut ActuatorOutputs,
    ) {
        let now = self.time.now_us();

        self.update_flight_mode(now, inputs, status);

        match self.schedule.flight_mode {
            FlightMode::TransitionToFw | FlightMode::TransitionToMc => {
                self.update_transition_state(now, dt, inputs, att_sp);
            }
            FlightMode::McMode => self.update_mc_state(),
            FlightMode::FwMode => self.update_fw_state(),
        }

        self.fill_actuator_outputs(now, inputs.actuators_mc_in, inputs.actuators_fw_in, outputs);
    }

    /// Hover pass-through: shared hover state, then the pusher-assist bias.
    fn update_mc_state(&mut self) {
        self.supervisor.on_mc_update();
        self.pusher_throttle = self.supervisor.pusher_assist();
    }

    /// Cruise pass-through: shared cruise state only.
    fn update_fw_state(&mut self) {
        self.supervisor.on_fw_update();
    }

    /// Hold the transition pusher throttle in the thrust setpoint while the
    /// cruise speed/altitude controller is not yet authoritative.
    pub fn waiting_on_tecs(&self, att_sp: &mut VehicleAttitudeSetpoint) {
        att_sp.thrust_body.x = self.pusher_throttle;
    }

    /// Hand throttle authority over to the cruise controller after a
    /// completed front transition. `scale` in [0, 1]: 0 keeps the
    /// transition pusher throttle, 1 uses the cruise controller demand.
    pub fn blend_throttle_after_front_transition(
        &self,
        att_sp: &mut VehicleAttitudeSetpoint,
        scale: f32,
    ) {
        let tecs_throttle = att_sp.thrust_body.x;
        att_sp.thrust_body.x = scale * tecs_throttle + (1.0 - scale) * self.pusher_throttle;
    }

    /// Replace the parameter block (hot reload); cross-parameter
    /// constraints are re-applied.
    pub fn update_parameters(&mut self, mut params: VtolParams) {
        params.sanitize();
        self.params = params;
    }

    /// Current parameter block.
    pub fn params(&self) -> &VtolParams {
        &self.params
    }

    /// Platform clock handle.
    pub fn time(&self) -> &T {
        &self.time
    }

    /// Outer-controller interface (tests inspect recorded calls here).
    pub fn supervisor(&self) -> &S {
        &self.supervisor
    }

    /// Mutable outer-controller interface.
    pub fn supervisor_mut(&mut self) -> &mut S {
        &mut self.supervisor
    }

    /// Internal flight mode.
    pub fn flight_mode(&self) -> FlightMode {
        self.schedule.flight_mode
    }

    /// Coarse public flight mode.
    pub fn mode(&self) -> VtolMode {
        self.vtol_mode
    }

    /// Current rotor-authority weight, identical across all four axes.
    pub fn mc_weight(&self) -> f32 {
        self.mc_roll_weight
    }

    /// All four axis weights (roll, pitch, yaw, throttle).
    pub fn weights(&self) -> [f32; 4] {
        [
            self.mc_roll_weight,
            self.mc_pitch_weight,
            self.mc_yaw_weight,
            self.mc_throttle_weight,
        ]
    }

    /// Current pusher throttle command.
    pub fn pusher_throttle(&self) -> f32 {
        self.pusher_throttle
    }

    /// Current airbrake reverse-output level.
    pub fn reverse_output(&self) -> f32 {
        self.reverse_output
    }

    /// Timestamp of the last completed front transition (0 if none yet).
    pub fn trans_finished_ts(&self) -> u64 {
        self.trans_finished_ts
    }

    fn set_weights(&mut self, mc_weight: f32) {
        self.mc_roll_weight = mc_weight;
        self.mc_pitch_weight = mc_weight;
        self.mc_yaw_weight = mc_weight;
        self.mc_throttle_weight = mc_weight;
    }

    fn time_since_transition_start(&self, now: u64) -> f32 {
        now.saturating_sub(self.schedule.transition_start) as f32 * 1e-6
    }

    fn setpoint_fresh(sp: &VehicleAttitudeSetpoint, now: u64) -> bool {
        now.saturating_sub(sp.timestamp) <= SETPOINT_TIMEOUT_US
    }
}
