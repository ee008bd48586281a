//! Transition schedules
//!
//! Active only while one of the two transitions is in progress. Computes the
//! rotor/wing authority weight, the pusher throttle ramp and the commanded
//! attitude setpoint, and arms the front-transition watchdog.

use libm::fabsf;

use super::supervisor::{QuadchuteReason, VtolSupervisor};
use super::{FlightMode, StandardVtol, TickInputs};
use crate::attitude::quat_from_euler;
use crate::msgs::VehicleAttitudeSetpoint;
use crate::traits::TimeSource;

impl<T: TimeSource, S: VtolSupervisor> StandardVtol<T, S> {
    /// Update weights, pusher throttle and the attitude setpoint for the
    /// active transition.
    pub(super) fn update_transition_state(
        &mut self,
        now: u64,
        dt: f32,
        inputs: &TickInputs<'_>,
        att_sp: &mut VehicleAttitudeSetpoint,
    ) {
        let time_since_trans_start = self.time_since_transition_start(now);
        let mut mc_weight = 1.0_f32;

        self.supervisor.on_transition_update(dt);

        // The attitude setpoint comes from the multirotor flight task when
        // climb rate is controlled; otherwise the fixed-wing controller
        // publishes it from manual stick input. Either way the sources must
        // be recent. A stale source keeps the previous output setpoint
        // active while the weight and throttle schedules keep running.
        let climb_rate_controlled = inputs.control_mode.flag_control_climb_rate_enabled;
        let setpoint_fresh = if climb_rate_controlled {
            Self::setpoint_fresh(inputs.mc_virtual_att_sp, now)
                && Self::setpoint_fresh(inputs.fw_virtual_att_sp, now)
        } else {
            Self::setpoint_fresh(inputs.fw_virtual_att_sp, now)
        };

        if setpoint_fresh {
            if climb_rate_controlled {
                *att_sp = *inputs.mc_virtual_att_sp;
                att_sp.roll_body = inputs.fw_virtual_att_sp.roll_body;
            } else {
                *att_sp = *inputs.fw_virtual_att_sp;
                att_sp.thrust_body.z = -inputs.fw_virtual_att_sp.thrust_body.x;
            }
        }

        let airspeed = inputs.airspeed.calibrated_airspeed_m_s;

        if self.schedule.flight_mode == FlightMode::TransitionToFw {
            if self.params.psher_rmp_dt <= 0.0 {
                // no ramp configured, apply the target immediately
                self.pusher_throttle = self.params.f_trans_thr;
            } else if self.pusher_throttle <= self.params.f_trans_thr {
                // ramp up throttle to the target value; once past the
                // target the last computed value is kept, so lowering the
                // target mid-transition does not pull the throttle back
                self.pusher_throttle =
                    self.params.f_trans_thr * time_since_trans_start / self.params.psher_rmp_dt;
            }

            let blend_margin = self.params.arsp_trans - self.params.arsp_blend;
            let minimum_trans_time = self.supervisor.minimum_front_transition_time();

            if blend_margin > 0.0
                && airspeed.is_finite()
                && airspeed > 0.0
                && airspeed >= self.params.arsp_blend
                && time_since_trans_start > minimum_trans_time
            {
                // blend rotor and wing authority over the airspeed band
                mc_weight = 1.0 - fabsf(airspeed - self.params.arsp_blend) / blend_margin;
            } else if self.params.fw_arsp_mode != 0 || !airspeed.is_finite() {
                // time-based blending when no airspeed source is usable:
                // full rotor authority for the first half of the minimum
                // transition time, then a linear handover
                mc_weight = 1.0 - time_since_trans_start / minimum_trans_time;
                mc_weight = (2.0 * mc_weight).clamp(0.0, 1.0);
            }

            if setpoint_fresh {
                // ramp in the cruise pitch offset as the wing takes over
                att_sp.pitch_body =
                    self.params.fw_psp_off_deg.to_radians() * (1.0 - mc_weight);
                att_sp.q_d =
                    quat_from_euler(att_sp.roll_body, att_sp.pitch_body, att_sp.yaw_body);
            }

            // front transition watchdog; the advisory repeats every tick,
            // the log fires once on the expiry edge
            if self.params.trans_timeout > f32::EPSILON
                && time_since_trans_start > self.params.trans_timeout
            {
                if time_since_trans_start - dt <= self.params.trans_timeout {
                    crate::log_error!("front transition timed out, requesting abort to hover");
                }
                self.supervisor.quadchute(QuadchuteReason::TransitionTimeout);
            }

            // stow flaps and spoilers for cruise
            self.flaps_setpoint.update(0.0, dt);
            self.spoilers_setpoint.update(0.0, dt);
        } else if self.schedule.flight_mode == FlightMode::TransitionToMc {
            if setpoint_fresh {
                if climb_rate_controlled {
                    // shape the deceleration with pitch
                    att_sp.pitch_body = self.supervisor.backtransition_pitch_sp(dt);
                }

                att_sp.q_d =
                    quat_from_euler(att_sp.roll_body, att_sp.pitch_body, att_sp.yaw_body);
            }

            self.pusher_throttle = 0.0;

            if time_since_trans_start >= self.params.b_rev_del {
                // throttle reversal for active braking
                let thrscale = ((time_since_trans_start - self.params.b_rev_del)
                    / self.params.psher_rmp_dt)
                    .clamp(0.0, 1.0);
                self.pusher_throttle = thrscale * self.params.b_trans_thr;
            }

            // continually increase rotor authority on the way back to hover
            if self.params.b_trans_ramp > f32::EPSILON {
                mc_weight = time_since_trans_start / self.params.b_trans_ramp;
            }
        }

        self.set_weights(mc_weight.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Bench;
    use super::*;
    use crate::parameters::VtolParams;
    use approx::assert_relative_eq;

    fn params() -> VtolParams {
        VtolParams {
            f_trans_thr: 0.75,
            psher_rmp_dt: 2.0,
            arsp_blend: 10.0,
            arsp_trans: 20.0,
            trans_timeout: 10.0,
            b_trans_dur: 8.0,
            b_trans_ramp: 3.0,
            b_trans_thr: 0.4,
            b_rev_del: 0.5,
            ..Default::default()
        }
    }

    fn bench_in_front_transition() -> Bench {
        let mut bench = Bench::new(params());
        bench.vtol.supervisor_mut().min_front_transition_time = 3.0;
        bench.airspeed.calibrated_airspeed_m_s = 5.0;
        bench.fixed_wing_requested = true;
        bench.step();
        assert_eq!(bench.vtol.flight_mode(), FlightMode::TransitionToFw);
        bench
    }

    fn bench_in_back_transition(airspeed: f32) -> Bench {
        let mut bench = Bench::new(params());
        bench.vtol.supervisor_mut().min_front_transition_time = 3.0;
        bench.airspeed.calibrated_airspeed_m_s = 25.0;
        bench.fixed_wing_requested = true;
        bench.run_for(3.5);
        assert_eq!(bench.vtol.flight_mode(), FlightMode::FwMode);

        bench.airspeed.calibrated_airspeed_m_s = airspeed;
        bench.fixed_wing_requested = false;
        bench.step();
        assert_eq!(bench.vtol.flight_mode(), FlightMode::TransitionToMc);
        bench
    }

    #[test]
    fn test_pusher_ramp_reaches_target() {
        let mut bench = bench_in_front_transition();

        bench.run_for(1.0);
        assert_relative_eq!(bench.vtol.pusher_throttle(), 0.375, epsilon = 0.01);
        assert!(bench.vtol.pusher_throttle() < 0.75);

        bench.run_for(1.1);
        assert!(bench.vtol.pusher_throttle() >= 0.75);
        // froze just past the target, still close to it
        assert_relative_eq!(bench.vtol.pusher_throttle(), 0.75, epsilon = 0.01);
    }

    #[test]
    fn test_pusher_ramp_is_monotonic() {
        let mut bench = bench_in_front_transition();
        let mut last = bench.vtol.pusher_throttle();
        for _ in 0..750 {
            bench.step();
            let current = bench.vtol.pusher_throttle();
            assert!(current >= last);
            last = current;
        }
    }

    #[test]
    fn test_pusher_snaps_without_ramp() {
        let mut bench = Bench::new(VtolParams {
            psher_rmp_dt: 0.0,
            ..params()
        });
        bench.airspeed.calibrated_airspeed_m_s = 5.0;
        bench.fixed_wing_requested = true;
        bench.step();
        assert_relative_eq!(bench.vtol.pusher_throttle(), 0.75);
    }

    #[test]
    fn test_full_rotor_authority_before_minimum_time() {
        let mut bench = bench_in_front_transition();
        bench.airspeed.calibrated_airspeed_m_s = 15.0; // already in the blend band

        bench.run_for(2.9);
        assert_eq!(bench.vtol.weights(), [1.0; 4]);
    }

    #[test]
    fn test_airspeed_blend_after_minimum_time() {
        let mut bench = bench_in_front_transition();
        bench.run_for(3.1);

        bench.airspeed.calibrated_airspeed_m_s = 15.0;
        bench.step();
        // halfway through the blend band
        assert_relative_eq!(bench.vtol.mc_weight(), 0.5, epsilon = 1e-5);

        bench.airspeed.calibrated_airspeed_m_s = 18.0;
        bench.step();
        assert_relative_eq!(bench.vtol.mc_weight(), 0.2, epsilon = 1e-5);

        // reaching the completion airspeed hands the vehicle to cruise,
        // which zeroes the rotor weight on the following tick
        bench.airspeed.calibrated_airspeed_m_s = 20.0;
        bench.step();
        assert_eq!(bench.vtol.flight_mode(), FlightMode::FwMode);
        bench.step();
        assert_relative_eq!(bench.vtol.mc_weight(), 0.0);
    }

    #[test]
    fn test_time_blend_without_airspeed() {
        let mut bench = Bench::new(params());
        bench.vtol.supervisor_mut().min_front_transition_time = 4.0;
        bench.airspeed.calibrated_airspeed_m_s = f32::NAN;
        bench.fixed_wing_requested = true;

        // first half of the minimum transition time: full rotor authority
        bench.run_for(1.9);
        assert_relative_eq!(bench.vtol.mc_weight(), 1.0, epsilon = 0.01);

        // then a linear handover to zero at the minimum transition time
        bench.run_for(1.1);
        assert_relative_eq!(bench.vtol.mc_weight(), 0.5, epsilon = 0.01);
        bench.run_for(0.9);
        assert_relative_eq!(bench.vtol.mc_weight(), 0.05, epsilon = 0.01);
    }

    #[test]
    fn test_pitch_offset_ramps_with_weight() {
        let mut bench = Bench::new(VtolParams {
            fw_psp_off_deg: 4.0,
            ..params()
        });
        bench.vtol.supervisor_mut().min_front_transition_time = 3.0;
        bench.airspeed.calibrated_airspeed_m_s = 5.0;
        bench.fixed_wing_requested = true;

        bench.run_for(2.0);
        // weight still 1, no offset yet
        assert_relative_eq!(bench.att_sp.pitch_body, 0.0, epsilon = 1e-6);

        bench.run_for(1.1);
        bench.airspeed.calibrated_airspeed_m_s = 15.0;
        bench.step();
        // half the offset at half weight
        assert_relative_eq!(
            bench.att_sp.pitch_body,
            4.0_f32.to_radians() * 0.5,
            epsilon = 1e-4
        );

        bench.airspeed.calibrated_airspeed_m_s = 19.5;
        bench.step();
        // nearly the full offset as the rotors fade out; the quaternion
        // tracks the Euler setpoint
        assert_relative_eq!(
            bench.att_sp.pitch_body,
            4.0_f32.to_radians() * 0.95,
            epsilon = 1e-4
        );
        let (_, pitch, _) = crate::attitude::euler_from_quat(&bench.att_sp.q_d);
        assert_relative_eq!(pitch, 4.0_f32.to_radians() * 0.95, epsilon = 1e-4);
    }

    #[test]
    fn test_watchdog_fires_after_timeout() {
        let mut bench = bench_in_front_transition();
        bench.run_for(9.8);
        assert_eq!(bench.vtol.supervisor().quadchute_count, 0);

        bench.run_for(0.4);
        let fired = bench.vtol.supervisor().quadchute_count;
        assert!(fired > 0);
        assert_eq!(
            bench.vtol.supervisor().last_quadchute,
            Some(QuadchuteReason::TransitionTimeout)
        );

        // advisory keeps firing every tick while the state persists
        bench.step();
        assert_eq!(bench.vtol.supervisor().quadchute_count, fired + 1);
        assert_eq!(bench.vtol.flight_mode(), FlightMode::TransitionToFw);
    }

    #[test]
    fn test_watchdog_disabled_at_zero() {
        let mut bench = Bench::new(VtolParams {
            trans_timeout: 0.0,
            ..params()
        });
        bench.airspeed.calibrated_airspeed_m_s = 5.0;
        bench.fixed_wing_requested = true;
        bench.run_for(20.0);
        assert_eq!(bench.vtol.supervisor().quadchute_count, 0);
    }

    #[test]
    fn test_setpoint_synthesis_climb_rate_controlled() {
        let mut bench = bench_in_front_transition();
        bench.mc_virtual.roll_body = 0.1;
        bench.mc_virtual.pitch_body = 0.0;
        bench.mc_virtual.yaw_body = 0.3;
        bench.mc_virtual.thrust_body.z = -0.6;
        bench.fw_virtual.roll_body = 0.25;

        bench.step();
        // multirotor setpoint with the fixed-wing roll grafted in
        assert_relative_eq!(bench.att_sp.roll_body, 0.25);
        assert_relative_eq!(bench.att_sp.yaw_body, 0.3);
        assert_relative_eq!(bench.att_sp.thrust_body.z, -0.6);
    }

    #[test]
    fn test_setpoint_synthesis_manual_stick() {
        let mut bench = bench_in_front_transition();
        bench.control_mode.flag_control_climb_rate_enabled = false;
        bench.fw_virtual.roll_body = 0.2;
        bench.fw_virtual.thrust_body.x = 0.9;

        bench.step();
        // fixed-wing setpoint with pusher thrust mapped onto the z slot
        assert_relative_eq!(bench.att_sp.roll_body, 0.2);
        assert_relative_eq!(bench.att_sp.thrust_body.z, -0.9);
    }

    #[test]
    fn test_stale_setpoint_freezes_attitude_but_not_schedules() {
        let mut bench = bench_in_front_transition();
        bench.mc_virtual.yaw_body = 0.3;
        bench.run_for(0.5);
        assert_relative_eq!(bench.att_sp.yaw_body, 0.3);

        // sources stop updating and age past the staleness window
        bench.refresh_setpoints = false;
        bench.run_for(1.1);

        // the setpoint freezes while the pusher keeps ramping
        bench.mc_virtual.yaw_body = 0.9;
        let throttle_before = bench.vtol.pusher_throttle();
        bench.run_for(0.5);
        assert_relative_eq!(bench.att_sp.yaw_body, 0.3);
        assert!(bench.vtol.pusher_throttle() > throttle_before);

        // freshness returns, setpoint updates resume
        bench.refresh_setpoints = true;
        bench.step();
        assert_relative_eq!(bench.att_sp.yaw_body, 0.9);
    }

    #[test]
    fn test_reverse_thrust_engages_after_delay() {
        let mut bench = bench_in_back_transition(25.0);
        bench.local_position.v_xy_valid = true;
        bench.local_position.vx = 25.0;

        // before the delay: no reverse thrust
        bench.run_for(0.4);
        assert_relative_eq!(bench.vtol.pusher_throttle(), 0.0);

        // ramping up between VT_B_REV_DEL and VT_B_REV_DEL + VT_PSHER_RMP_DT
        bench.run_for(0.6);
        let mid = bench.vtol.pusher_throttle();
        assert!(mid > 0.0 && mid < 0.4);

        // fully engaged
        bench.run_for(2.0);
        assert_relative_eq!(bench.vtol.pusher_throttle(), 0.4, epsilon = 1e-4);
    }

    #[test]
    fn test_rotor_authority_ramps_back_up() {
        let mut bench = bench_in_back_transition(25.0);
        bench.local_position.v_xy_valid = true;
        bench.local_position.vx = 25.0;

        bench.run_for(1.5);
        assert_relative_eq!(bench.vtol.mc_weight(), 1.5 / 3.0, epsilon = 0.01);

        bench.run_for(1.5);
        assert_relative_eq!(bench.vtol.mc_weight(), 1.0, epsilon = 0.01);

        bench.run_for(1.0);
        assert_relative_eq!(bench.vtol.mc_weight(), 1.0);
    }

    #[test]
    fn test_backtransition_pitch_shaping_applied() {
        let mut bench = bench_in_back_transition(25.0);
        bench.local_position.v_xy_valid = true;
        bench.local_position.vx = 25.0;
        bench.vtol.supervisor_mut().backtransition_pitch = 0.15;

        bench.step();
        assert_relative_eq!(bench.att_sp.pitch_body, 0.15);
        let (_, pitch, _) = crate::attitude::euler_from_quat(&bench.att_sp.q_d);
        assert_relative_eq!(pitch, 0.15, epsilon = 1e-5);
    }

    #[test]
    fn test_weights_replicated_across_axes() {
        let mut bench = bench_in_front_transition();
        bench.run_for(3.5);
        bench.airspeed.calibrated_airspeed_m_s = 14.0;
        bench.step();
        let weights = bench.vtol.weights();
        let first = weights[0];
        assert!(first > 0.0 && first < 1.0);
        assert!(weights.iter().all(|w| *w == first));
    }
}
