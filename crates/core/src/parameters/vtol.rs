//! VTOL transition parameter block
//!
//! Typed snapshot of the parameters the transition core consumes each tick.
//! Names, defaults and ranges follow the established VTOL conventions so a
//! ground station can address them directly.
//!
//! # Parameters
//!
//! - `VT_F_TRANS_THR` - Target pusher throttle during front transition
//! - `VT_PSHER_RMP_DT` - Pusher throttle ramp duration (s); <= 0 disables the ramp
//! - `VT_ARSP_TRANS` - Calibrated airspeed completing the front transition (m/s)
//! - `VT_ARSP_BLEND` - Airspeed at which rotor-to-wing blending begins (m/s)
//! - `VT_TRANS_TIMEOUT` - Front transition watchdog (s); 0 disables
//! - `VT_TRANS_MIN_TM` - Minimum front transition time (s)
//! - `VT_B_TRANS_DUR` - Maximum back transition time (s)
//! - `VT_B_TRANS_RAMP` - Rotor weight ramp-up time in back transition (s)
//! - `VT_B_TRANS_THR` - Reverse pusher throttle magnitude
//! - `VT_B_REV_DEL` - Delay before engaging reverse thrust (s)
//! - `VT_B_REV_OUT` - Airbrake reverse-output level during back transition
//! - `VT_ELEV_MC_LOCK` - Lock elevons to neutral while hovering
//! - `FW_ARSP_MODE` - 0 = trust the airspeed sensor, otherwise ignore it
//! - `FW_PSP_OFF` - Cruise pitch offset (deg), ramped in during front transition
//! - `MPC_XY_CRUISE` - Hover cruise speed, back transition exit threshold (m/s)

use super::registry::{ParamMetadata, ParameterRegistry, RegistryError};

/// VTOL parameters loaded from the registry
#[derive(Debug, Clone, Copy)]
pub struct VtolParams {
    /// Target pusher throttle during front transition (0..1)
    pub f_trans_thr: f32,
    /// Pusher throttle ramp duration (s); <= 0 snaps to the target
    pub psher_rmp_dt: f32,
    /// Calibrated airspeed completing the front transition (m/s)
    pub arsp_trans: f32,
    /// Airspeed at which rotor-to-wing blending begins (m/s)
    pub arsp_blend: f32,
    /// Front transition watchdog (s); 0 disables
    pub trans_timeout: f32,
    /// Minimum front transition time (s), surfaced to the outer controller
    pub trans_min_tm: f32,
    /// Maximum back transition time (s)
    pub b_trans_dur: f32,
    /// Rotor weight ramp-up time in back transition (s)
    pub b_trans_ramp: f32,
    /// Reverse pusher throttle magnitude (0..1)
    pub b_trans_thr: f32,
    /// Delay before engaging reverse thrust (s)
    pub b_rev_del: f32,
    /// Airbrake reverse-output level during back transition (0..1)
    pub b_rev_out: f32,
    /// Lock elevons to neutral while hovering
    pub elev_mc_lock: bool,
    /// 0 = trust the airspeed sensor, otherwise ignore it
    pub fw_arsp_mode: u32,
    /// Cruise pitch offset (deg)
    pub fw_psp_off_deg: f32,
    /// Hover cruise speed, back transition exit threshold (m/s)
    pub mpc_xy_cruise: f32,
}

impl Default for VtolParams {
    fn default() -> Self {
        Self {
            f_trans_thr: 1.0,
            psher_rmp_dt: 3.0,
            arsp_trans: 10.0,
            arsp_blend: 8.0,
            trans_timeout: 15.0,
            trans_min_tm: 2.0,
            b_trans_dur: 4.0,
            b_trans_ramp: 3.0,
            b_trans_thr: 0.0,
            b_rev_del: 0.0,
            b_rev_out: 0.0,
            elev_mc_lock: true,
            fw_arsp_mode: 0,
            fw_psp_off_deg: 0.0,
            mpc_xy_cruise: 5.0,
        }
    }
}

impl VtolParams {
    /// Register all transition parameters with their defaults and ranges.
    pub fn register_defaults(registry: &mut ParameterRegistry) -> Result<(), RegistryError> {
        registry.register(ParamMetadata::new_float("VT_F_TRANS_THR", 1.0, 0.0, 1.0))?;
        registry.register(ParamMetadata::new_float("VT_PSHER_RMP_DT", 3.0, 0.0, 20.0))?;
        registry.register(ParamMetadata::new_float("VT_ARSP_TRANS", 10.0, 0.0, 30.0))?;
        registry.register(ParamMetadata::new_float("VT_ARSP_BLEND", 8.0, 0.0, 30.0))?;
        registry.register(ParamMetadata::new_float("VT_TRANS_TIMEOUT", 15.0, 0.0, 60.0))?;
        registry.register(ParamMetadata::new_float("VT_TRANS_MIN_TM", 2.0, 0.0, 20.0))?;
        registry.register(ParamMetadata::new_float("VT_B_TRANS_DUR", 4.0, 0.5, 20.0))?;
        registry.register(ParamMetadata::new_float("VT_B_TRANS_RAMP", 3.0, 0.0, 20.0))?;
        registry.register(ParamMetadata::new_float("VT_B_TRANS_THR", 0.0, 0.0, 1.0))?;
        registry.register(ParamMetadata::new_float("VT_B_REV_DEL", 0.0, 0.0, 10.0))?;
        registry.register(ParamMetadata::new_float("VT_B_REV_OUT", 0.0, 0.0, 1.0))?;
        registry.register(ParamMetadata::new_uint32("VT_ELEV_MC_LOCK", 1, 0, 1))?;
        registry.register(ParamMetadata::new_uint32("FW_ARSP_MODE", 0, 0, 1))?;
        registry.register(ParamMetadata::new_float("FW_PSP_OFF", 0.0, -45.0, 45.0))?;
        registry.register(ParamMetadata::new_float("MPC_XY_CRUISE", 5.0, 0.0, 20.0))?;
        Ok(())
    }

    /// Load the parameter block from the registry.
    ///
    /// Missing entries fall back to their defaults. The returned block is
    /// already sanitized.
    pub fn from_registry(registry: &ParameterRegistry) -> Self {
        let defaults = Self::default();

        let mut params = Self {
            f_trans_thr: float_param(registry, "VT_F_TRANS_THR", defaults.f_trans_thr),
            psher_rmp_dt: float_param(registry, "VT_PSHER_RMP_DT", defaults.psher_rmp_dt),
            arsp_trans: float_param(registry, "VT_ARSP_TRANS", defaults.arsp_trans),
            arsp_blend: float_param(registry, "VT_ARSP_BLEND", defaults.arsp_blend),
            trans_timeout: float_param(registry, "VT_TRANS_TIMEOUT", defaults.trans_timeout),
            trans_min_tm: float_param(registry, "VT_TRANS_MIN_TM", defaults.trans_min_tm),
            b_trans_dur: float_param(registry, "VT_B_TRANS_DUR", defaults.b_trans_dur),
            b_trans_ramp: float_param(registry, "VT_B_TRANS_RAMP", defaults.b_trans_ramp),
            b_trans_thr: float_param(registry, "VT_B_TRANS_THR", defaults.b_trans_thr),
            b_rev_del: float_param(registry, "VT_B_REV_DEL", defaults.b_rev_del),
            b_rev_out: float_param(registry, "VT_B_REV_OUT", defaults.b_rev_out),
            elev_mc_lock: uint_param(registry, "VT_ELEV_MC_LOCK", 1) != 0,
            fw_arsp_mode: uint_param(registry, "FW_ARSP_MODE", defaults.fw_arsp_mode),
            fw_psp_off_deg: float_param(registry, "FW_PSP_OFF", defaults.fw_psp_off_deg),
            mpc_xy_cruise: float_param(registry, "MPC_XY_CRUISE", defaults.mpc_xy_cruise),
        };
        params.sanitize();
        params
    }

    /// Enforce cross-parameter constraints.
    ///
    /// The pusher ramp-up in the back transition must not outlast the
    /// back transition itself.
    pub fn sanitize(&mut self) {
        self.b_trans_ramp = self.b_trans_ramp.min(self.b_trans_dur);
    }
}

fn float_param(registry: &ParameterRegistry, name: &str, default: f32) -> f32 {
    registry
        .get_by_name(name)
        .map(|p| p.value.as_f32())
        .unwrap_or(default)
}

fn uint_param(registry: &ParameterRegistry, name: &str, default: u32) -> u32 {
    registry
        .get_by_name(name)
        .map(|p| p.value.as_u32())
        .unwrap_or(default)
}
