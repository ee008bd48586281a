//! Actuator-group mixer
//!
//! Maps the two attitude-controller input streams onto the two actuator
//! groups (group 0 lift rotors, group 1 fixed-wing surfaces plus pusher)
//! according to the current flight mode and rotor-authority weights, and
//! publishes the torque and thrust setpoints derived from the mixed
//! controls.

use nalgebra::Vector3;

use super::supervisor::VtolSupervisor;
use super::{ActuatorOutputs, FlightMode, StandardVtol};
use crate::msgs::{landing_gear, ActuatorControls};
use crate::traits::TimeSource;

impl<T: TimeSource, S: VtolSupervisor> StandardVtol<T, S> {
    /// Fill both actuator-group records and the torque/thrust setpoints
    /// from this tick's controller inputs.
    pub(super) fn fill_actuator_outputs(
        &self,
        now: u64,
        actuators_mc_in: &ActuatorControls,
        actuators_fw_in: &ActuatorControls,
        outputs: &mut ActuatorOutputs,
    ) {
        let mc_in = &actuators_mc_in.control;
        let fw_in = &actuators_fw_in.control;

        let mc_out = &mut outputs.actuator_controls_0.control;
        let fw_out = &mut outputs.actuator_controls_1.control;

        match self.schedule.flight_mode {
            FlightMode::McMode => {
                // rotor group passes through unscaled
                mc_out[ActuatorControls::INDEX_ROLL] = mc_in[ActuatorControls::INDEX_ROLL];
                mc_out[ActuatorControls::INDEX_PITCH] = mc_in[ActuatorControls::INDEX_PITCH];
                mc_out[ActuatorControls::INDEX_YAW] = mc_in[ActuatorControls::INDEX_YAW];
                mc_out[ActuatorControls::INDEX_THROTTLE] = mc_in[ActuatorControls::INDEX_THROTTLE];
                mc_out[ActuatorControls::INDEX_LANDING_GEAR] = landing_gear::GEAR_DOWN;

                // wing group idle, apart from the optional elevon passthrough
                // and the pusher-assist throttle
                fw_out[ActuatorControls::INDEX_ROLL] = if self.params.elev_mc_lock {
                    0.0
                } else {
                    fw_in[ActuatorControls::INDEX_ROLL]
                };
                fw_out[ActuatorControls::INDEX_PITCH] = if self.params.elev_mc_lock {
                    0.0
                } else {
                    fw_in[ActuatorControls::INDEX_PITCH]
                };
                fw_out[ActuatorControls::INDEX_YAW] = 0.0;
                fw_out[ActuatorControls::INDEX_THROTTLE] = self.pusher_throttle;
                fw_out[ActuatorControls::INDEX_FLAPS] = self.flaps_setpoint.state();
                fw_out[ActuatorControls::INDEX_SPOILERS] = self.spoilers_setpoint.state();
                fw_out[ActuatorControls::INDEX_AIRBRAKES] = 0.0;
            }

            FlightMode::TransitionToFw | FlightMode::TransitionToMc => {
                // rotor group scaled by the per-axis authority weights
                mc_out[ActuatorControls::INDEX_ROLL] =
                    mc_in[ActuatorControls::INDEX_ROLL] * self.mc_roll_weight;
                mc_out[ActuatorControls::INDEX_PITCH] =
                    mc_in[ActuatorControls::INDEX_PITCH] * self.mc_pitch_weight;
                mc_out[ActuatorControls::INDEX_YAW] =
                    mc_in[ActuatorControls::INDEX_YAW] * self.mc_yaw_weight;
                mc_out[ActuatorControls::INDEX_THROTTLE] =
                    mc_in[ActuatorControls::INDEX_THROTTLE] * self.mc_throttle_weight;
                mc_out[ActuatorControls::INDEX_LANDING_GEAR] = landing_gear::GEAR_UP;

                // wing group live, with the transition owning throttle and
                // airbrakes
                fw_out[ActuatorControls::INDEX_ROLL] = fw_in[ActuatorControls::INDEX_ROLL];
                fw_out[ActuatorControls::INDEX_PITCH] = fw_in[ActuatorControls::INDEX_PITCH];
                fw_out[ActuatorControls::INDEX_YAW] = fw_in[ActuatorControls::INDEX_YAW];
                fw_out[ActuatorControls::INDEX_THROTTLE] = self.pusher_throttle;
                fw_out[ActuatorControls::INDEX_FLAPS] = self.flaps_setpoint.state();
                fw_out[ActuatorControls::INDEX_SPOILERS] = self.spoilers_setpoint.state();
                fw_out[ActuatorControls::INDEX_AIRBRAKES] = self.reverse_output;
            }

            FlightMode::FwMode => {
                // rotor group off
                mc_out[ActuatorControls::INDEX_ROLL] = 0.0;
                mc_out[ActuatorControls::INDEX_PITCH] = 0.0;
                mc_out[ActuatorControls::INDEX_YAW] = 0.0;
                mc_out[ActuatorControls::INDEX_THROTTLE] = 0.0;
                mc_out[ActuatorControls::INDEX_LANDING_GEAR] = landing_gear::GEAR_UP;

                // wing group owns everything including the pusher
                fw_out[ActuatorControls::INDEX_ROLL] = fw_in[ActuatorControls::INDEX_ROLL];
                fw_out[ActuatorControls::INDEX_PITCH] = fw_in[ActuatorControls::INDEX_PITCH];
                fw_out[ActuatorControls::INDEX_YAW] = fw_in[ActuatorControls::INDEX_YAW];
                fw_out[ActuatorControls::INDEX_THROTTLE] = fw_in[ActuatorControls::INDEX_THROTTLE];
                fw_out[ActuatorControls::INDEX_FLAPS] = self.flaps_setpoint.state();
                fw_out[ActuatorControls::INDEX_SPOILERS] = self.spoilers_setpoint.state();
                fw_out[ActuatorControls::INDEX_AIRBRAKES] = 0.0;
            }
        }

        outputs.torque_setpoint_0.timestamp = now;
        outputs.torque_setpoint_0.timestamp_sample = actuators_mc_in.timestamp_sample;
        outputs.torque_setpoint_0.xyz = Vector3::new(
            outputs.actuator_controls_0.control[ActuatorControls::INDEX_ROLL],
            outputs.actuator_controls_0.control[ActuatorControls::INDEX_PITCH],
            outputs.actuator_controls_0.control[ActuatorControls::INDEX_YAW],
        );

        outputs.torque_setpoint_1.timestamp = now;
        outputs.torque_setpoint_1.timestamp_sample = actuators_fw_in.timestamp_sample;
        outputs.torque_setpoint_1.xyz = Vector3::new(
            outputs.actuator_controls_1.control[ActuatorControls::INDEX_ROLL],
            outputs.actuator_controls_1.control[ActuatorControls::INDEX_PITCH],
            outputs.actuator_controls_1.control[ActuatorControls::INDEX_YAW],
        );

        // pusher thrust on body x, lift on body -z
        outputs.thrust_setpoint_0.timestamp = now;
        outputs.thrust_setpoint_0.timestamp_sample = actuators_mc_in.timestamp_sample;
        outputs.thrust_setpoint_0.xyz = Vector3::new(
            outputs.actuator_controls_1.control[ActuatorControls::INDEX_THROTTLE],
            0.0,
            -outputs.actuator_controls_0.control[ActuatorControls::INDEX_THROTTLE],
        );

        // reserved
        outputs.thrust_setpoint_1.timestamp = now;
        outputs.thrust_setpoint_1.timestamp_sample = actuators_fw_in.timestamp_sample;
        outputs.thrust_setpoint_1.xyz = Vector3::zeros();

        outputs.actuator_controls_0.timestamp = now;
        outputs.actuator_controls_0.timestamp_sample = actuators_mc_in.timestamp_sample;
        outputs.actuator_controls_1.timestamp = now;
        outputs.actuator_controls_1.timestamp_sample = actuators_fw_in.timestamp_sample;
    }
}
