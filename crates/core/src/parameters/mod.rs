//! Parameter management for the transition core.
//!
//! Parameters live in an in-memory registry with per-entry bounds and flags;
//! a ground station or configuration layer owns persistence. The typed
//! [`VtolParams`] block is re-read from the registry whenever configuration
//! changes, which gives hot-reload semantics without any locking: reads of
//! individual values are tear-free because the whole block is copied.

pub mod registry;
pub mod vtol;

pub use registry::{ParamFlags, ParamMetadata, ParamType, ParamValue, ParameterRegistry, RegistryError};
pub use vtol::VtolParams;
