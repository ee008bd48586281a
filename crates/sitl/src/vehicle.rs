//! Lockstep vehicle harness
//!
//! Owns one transition core plus the environment records it consumes, and
//! steps everything in 250 Hz lockstep. Tests mutate the public input
//! records (or install scripted [`Profile`]s) between steps and assert on
//! the outputs and the recorded trace.

use standard_vtol_core::msgs::{
    ActuatorControls, AirspeedValidated, VehicleAttitude, VehicleAttitudeSetpoint,
    VehicleControlMode, VehicleLocalPosition, VtolVehicleStatus,
};
use standard_vtol_core::parameters::VtolParams;
use standard_vtol_core::traits::{MockTime, TimeSource};
use standard_vtol_core::vtol::{
    ActuatorOutputs, FlightMode, MockSupervisor, StandardVtol, TickInputs,
};

/// Tick interval in seconds (250 Hz).
pub const TICK_S: f32 = 0.004;

/// Tick interval in microseconds.
pub const TICK_US: u64 = 4_000;

/// Clock value at harness start; keeps zero-initialized input timestamps
/// comfortably stale, as on a vehicle that has been powered for a while.
const START_TIME_US: u64 = 60_000_000;

/// One recorded tick of core state.
#[derive(Debug, Clone, Copy)]
pub struct TraceRecord {
    /// Seconds since harness start.
    pub t: f32,
    pub flight_mode: FlightMode,
    pub mc_weight: f32,
    pub pusher_throttle: f32,
    pub reverse_output: f32,
}

/// A simulated vehicle: the transition core plus its environment.
pub struct SitlVehicle {
    vtol: StandardVtol<MockTime, MockSupervisor>,

    pub status: VtolVehicleStatus,
    pub att_sp: VehicleAttitudeSetpoint,
    pub outputs: ActuatorOutputs,

    pub attitude: VehicleAttitude,
    pub local_position: VehicleLocalPosition,
    pub airspeed: AirspeedValidated,
    pub control_mode: VehicleControlMode,
    pub mc_virtual: VehicleAttitudeSetpoint,
    pub fw_virtual: VehicleAttitudeSetpoint,
    pub mc_in: ActuatorControls,
    pub fw_in: ActuatorControls,

    /// Pilot fixed-wing request fed to the core each tick.
    pub fixed_wing_requested: bool,
    /// When false, the multirotor virtual setpoint timestamp is frozen.
    pub refresh_mc_setpoint: bool,
    /// When false, the fixed-wing virtual setpoint timestamp is frozen.
    pub refresh_fw_setpoint: bool,

    airspeed_profile: Option<(f32, crate::Profile)>,
    ground_speed_profile: Option<(f32, crate::Profile)>,

    ticks: u64,
    trace: Vec<TraceRecord>,
}

impl SitlVehicle {
    /// Create a vehicle in hover with the given parameters. The supervisor
    /// surfaces the block's minimum front transition time, as the outer
    /// controller would.
    pub fn new(params: VtolParams) -> Self {
        let supervisor = MockSupervisor {
            min_front_transition_time: params.trans_min_tm,
            ..Default::default()
        };
        Self::with_supervisor(params, supervisor)
    }

    /// Create a vehicle with a preconfigured supervisor.
    pub fn with_supervisor(params: VtolParams, supervisor: MockSupervisor) -> Self {
        let time = MockTime::with_initial(START_TIME_US);
        Self {
            vtol: StandardVtol::new(time, supervisor, params),
            status: VtolVehicleStatus::default(),
            att_sp: VehicleAttitudeSetpoint::default(),
            outputs: ActuatorOutputs::default(),
            attitude: VehicleAttitude::default(),
            local_position: VehicleLocalPosition::default(),
            airspeed: AirspeedValidated::default(),
            control_mode: VehicleControlMode {
                flag_control_climb_rate_enabled: true,
                ..Default::default()
            },
            mc_virtual: VehicleAttitudeSetpoint::default(),
            fw_virtual: VehicleAttitudeSetpoint::default(),
            mc_in: ActuatorControls::default(),
            fw_in: ActuatorControls::default(),
            fixed_wing_requested: false,
            refresh_mc_setpoint: true,
            refresh_fw_setpoint: true,
            airspeed_profile: None,
            ground_speed_profile: None,
            ticks: 0,
            trace: Vec::new(),
        }
    }

    /// Seconds since harness start.
    pub fn time_s(&self) -> f32 {
        self.ticks as f32 * TICK_S
    }

    /// The core under test.
    pub fn vtol(&self) -> &StandardVtol<MockTime, MockSupervisor> {
        &self.vtol
    }

    /// Mutable access to the core (parameter reloads, supervisor scripting).
    pub fn vtol_mut(&mut self) -> &mut StandardVtol<MockTime, MockSupervisor> {
        &mut self.vtol
    }

    /// Recorded per-tick trace since harness start.
    pub fn trace(&self) -> &[TraceRecord] {
        &self.trace
    }

    /// Script the calibrated airspeed from now on; the profile's t=0 is the
    /// current harness time.
    pub fn set_airspeed_profile(&mut self, profile: crate::Profile) {
        self.airspeed_profile = Some((self.time_s(), profile));
    }

    /// Script the ground speed (NED north velocity with a level attitude)
    /// from now on; also marks the velocity estimate valid.
    pub fn set_ground_speed_profile(&mut self, profile: crate::Profile) {
        self.local_position.v_xy_valid = true;
        self.ground_speed_profile = Some((self.time_s(), profile));
    }

    /// Advance one tick: sample profiles, refresh input timestamps, run the
    /// core, record the trace.
    pub fn step(&mut self) {
        self.ticks += 1;
        let t = self.time_s();

        if let Some((epoch, profile)) = &self.airspeed_profile {
            self.airspeed.calibrated_airspeed_m_s = profile.sample(t - epoch);
        }
        if let Some((epoch, profile)) = &self.ground_speed_profile {
            self.local_position.vx = profile.sample(t - epoch);
        }

        self.vtol.time().advance(TICK_US);
        let now = self.vtol.time().now_us();
        self.airspeed.timestamp = now;
        self.local_position.timestamp = now;
        self.attitude.timestamp = now;
        if self.refresh_mc_setpoint {
            self.mc_virtual.timestamp = now;
        }
        if self.refresh_fw_setpoint {
            self.fw_virtual.timestamp = now;
        }
        self.mc_in.timestamp_sample = now;
        self.fw_in.timestamp_sample = now;

        let inputs = TickInputs {
            attitude: &self.attitude,
            local_position: &self.local_position,
            airspeed: &self.airspeed,
            control_mode: &self.control_mode,
            mc_virtual_att_sp: &self.mc_virtual,
            fw_virtual_att_sp: &self.fw_virtual,
            actuators_mc_in: &self.mc_in,
            actuators_fw_in: &self.fw_in,
            fixed_wing_requested: self.fixed_wing_requested,
        };
        self.vtol.tick(
            TICK_S,
            &inputs,
            &mut self.status,
            &mut self.att_sp,
            &mut self.outputs,
        );

        self.trace.push(TraceRecord {
            t,
            flight_mode: self.vtol.flight_mode(),
            mc_weight: self.vtol.mc_weight(),
            pusher_throttle: self.vtol.pusher_throttle(),
            reverse_output: self.vtol.reverse_output(),
        });
    }

    /// Run `seconds` worth of ticks.
    pub fn run_for(&mut self, seconds: f32) {
        let ticks = (seconds / TICK_S).round() as u64;
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Step until the predicate holds, bounded by `max_seconds`. Returns the
    /// harness time at which the predicate first held, or `None` if it never
    /// did.
    pub fn run_until(
        &mut self,
        max_seconds: f32,
        mut predicate: impl FnMut(&SitlVehicle) -> bool,
    ) -> Option<f32> {
        let ticks = (max_seconds / TICK_S).round() as u64;
        for _ in 0..ticks {
            self.step();
            if predicate(self) {
                return Some(self.time_s());
            }
        }
        None
    }

    /// Fly a nominal front transition and leave the vehicle in cruise.
    ///
    /// Uses a generous airspeed so the transition completes as soon as the
    /// minimum transition time elapses.
    pub fn fly_to_cruise(&mut self) {
        self.fixed_wing_requested = true;
        self.airspeed.calibrated_airspeed_m_s = 2.0 * self.vtol.params().arsp_trans;
        let min_time = self.vtol.supervisor().min_front_transition_time;
        let reached = self.run_until(min_time + 5.0, |v| {
            v.vtol().flight_mode() == FlightMode::FwMode
        });
        assert!(reached.is_some(), "front transition did not complete");
    }
}
