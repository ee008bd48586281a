//! standard_vtol_core - Transition control core for standard-configuration VTOL aircraft
//!
//! A standard-configuration VTOL has independent lift rotors for hover and a
//! dedicated pusher (or tractor) propeller for cruise. This crate contains the
//! platform-agnostic control core that sequences the vehicle between hover and
//! cruise flight: the flight-mode state machine, the transition weight and
//! throttle schedules, and the actuator-group mixer.
//!
//! The core is invoked once per control tick (nominally 250 Hz) by an external
//! scheduler. It performs no I/O, never blocks, and never allocates on the
//! tick path. Platform services (clock, outer attitude controller utilities)
//! are injected via traits so the whole crate runs on host without feature
//! flags.
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`msgs`]: Input/output record types mirroring the vehicle message bus
//! - [`parameters`]: In-memory parameter registry and the VTOL parameter block
//! - [`attitude`]: Euler/quaternion conversions and body-frame velocity
//! - [`slew_rate`]: First-order slew-rate limiter for control surfaces
//! - [`vtol`]: The transition core (`StandardVtol`)

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod attitude;
pub mod logging;
pub mod msgs;
pub mod parameters;
pub mod slew_rate;
pub mod traits;
pub mod vtol;
