//! standard_vtol_sitl - Host-side lockstep harness for the transition core
//!
//! Drives [`standard_vtol_core`] through deterministic 250 Hz flights on the
//! host: a scripted longitudinal plant supplies airspeed and ground-speed
//! profiles, the harness advances the mock clock tick by tick, refreshes the
//! virtual attitude setpoints, and records a trace of the core's mode,
//! weights and throttle commands for assertions.
//!
//! The core is synchronous and does no I/O, so the whole harness is
//! synchronous too; there is no simulator network protocol here.

pub mod error;
pub mod profile;
pub mod vehicle;

pub use error::ProfileError;
pub use profile::Profile;
pub use vehicle::{SitlVehicle, TraceRecord, TICK_S, TICK_US};
