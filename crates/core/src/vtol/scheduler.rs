//! Flight-mode state machine
//!
//! Runs first in every tick and is the sole writer of the flight-mode
//! schedule. After flipping the transition switch the vehicle spools up the
//! pusher and picks up forward speed; once fast enough the lift rotors shut
//! down. For the back transition the pusher is stopped immediately and the
//! rotors reactivate, with optional reverse thrust for braking.

use super::supervisor::VtolSupervisor;
use super::{FlightMode, StandardVtol, TickInputs, VtolMode};
use crate::attitude::body_frame_velocity;
use crate::msgs::VtolVehicleStatus;
use crate::traits::TimeSource;

impl<T: TimeSource, S: VtolSupervisor> StandardVtol<T, S> {
    /// Update the flight-mode schedule from this tick's inputs.
    pub(super) fn update_flight_mode(
        &mut self,
        now: u64,
        inputs: &TickInputs<'_>,
        status: &mut VtolVehicleStatus,
    ) {
        let mut mc_weight = self.mc_roll_weight;
        let time_since_trans_start = self.time_since_transition_start(now);

        if status.vtol_transition_failsafe {
            // Failsafe event, engage the lift rotors immediately
            if self.schedule.flight_mode != FlightMode::McMode {
                crate::log_warn!("transition failsafe, engaging lift rotors");
            }

            self.schedule.flight_mode = FlightMode::McMode;
            self.pusher_throttle = 0.0;
            self.reverse_output = 0.0;

            // reset the failsafe once fixed-wing flight is no longer requested
            if !inputs.fixed_wing_requested {
                status.vtol_transition_failsafe = false;
            }
        } else if !inputs.fixed_wing_requested {
            match self.schedule.flight_mode {
                FlightMode::McMode => {
                    mc_weight = 1.0;
                    self.reverse_output = 0.0;
                }

                FlightMode::FwMode => {
                    // Regular back transition
                    self.schedule.flight_mode = FlightMode::TransitionToMc;
                    self.schedule.transition_start = now;
                    self.reverse_output = self.params.b_rev_out;
                    crate::log_info!("back transition started");
                }

                FlightMode::TransitionToFw => {
                    // aborted front transition, fall back to hover
                    self.schedule.flight_mode = FlightMode::McMode;
                    mc_weight = 1.0;
                    self.pusher_throttle = 0.0;
                    self.reverse_output = 0.0;
                    crate::log_info!("front transition aborted");
                }

                FlightMode::TransitionToMc => {
                    // speed exit condition: use ground speed if valid, otherwise airspeed
                    let mut exit_backtransition_speed_condition = false;

                    if inputs.local_position.v_xy_valid {
                        let vel = body_frame_velocity(
                            &inputs.attitude.q,
                            inputs.local_position.vx,
                            inputs.local_position.vy,
                            inputs.local_position.vz,
                        );
                        exit_backtransition_speed_condition = vel.x < self.params.mpc_xy_cruise;
                    } else if inputs.airspeed.calibrated_airspeed_m_s.is_finite() {
                        exit_backtransition_speed_condition =
                            inputs.airspeed.calibrated_airspeed_m_s < self.params.mpc_xy_cruise;
                    }

                    let exit_backtransition_time_condition =
                        time_since_trans_start > self.params.b_trans_dur;

                    if self.supervisor.can_transition_on_ground()
                        || exit_backtransition_speed_condition
                        || exit_backtransition_time_condition
                    {
                        self.schedule.flight_mode = FlightMode::McMode;
                        crate::log_info!("back transition complete");
                    }
                }
            }
        } else {
            match self.schedule.flight_mode {
                FlightMode::McMode | FlightMode::TransitionToMc => {
                    // Start the front transition. There is deliberately no
                    // failsafe shortcut straight into cruise: flying the wing
                    // at zero airspeed is an unsafe state.
                    self.schedule.flight_mode = FlightMode::TransitionToFw;
                    self.schedule.transition_start = now;
                    crate::log_info!("front transition started");
                }

                FlightMode::FwMode => {
                    mc_weight = 0.0;
                }

                FlightMode::TransitionToFw => {
                    // monitor airspeed for the final switch into cruise
                    let airspeed_triggers_transition =
                        inputs.airspeed.calibrated_airspeed_m_s.is_finite()
                            && self.params.fw_arsp_mode == 0;
                    let minimum_trans_time_elapsed =
                        time_since_trans_start > self.supervisor.minimum_front_transition_time();

                    let mut transition_to_fw = false;

                    if minimum_trans_time_elapsed {
                        transition_to_fw = if airspeed_triggers_transition {
                            inputs.airspeed.calibrated_airspeed_m_s >= self.params.arsp_trans
                        } else {
                            true
                        };
                    }

                    transition_to_fw |= self.supervisor.can_transition_on_ground();

                    if transition_to_fw {
                        self.schedule.flight_mode = FlightMode::FwMode;

                        // the pusher throttle keeps its ramped value here
                        self.trans_finished_ts = now;
                        crate::log_info!("front transition complete");
                    }
                }
            }
        }

        self.set_weights(mc_weight);

        // project the schedule onto the coarse public mode
        self.vtol_mode = match self.schedule.flight_mode {
            FlightMode::McMode => VtolMode::RotaryWing,
            FlightMode::FwMode => VtolMode::FixedWing,
            FlightMode::TransitionToFw => VtolMode::TransitionToFw,
            FlightMode::TransitionToMc => VtolMode::TransitionToMc,
        };
    }
}
