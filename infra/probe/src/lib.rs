//! # Probe
//!
//! Hardware probing for capability flags.
//!
//! Asking a driver for its limits is slow and its answers do not change while the context lives,
//! so answers are kept in a [`ProbeCache`] that is independent of the flag registry: resetting
//! flags re-runs evaluators but never re-queries the hardware. Entries go away only when a caller
//! invalidates them explicitly (for example after the backend recreated its context).
//!
//! The backend exposes its context through [`HardwareHandle`]; [`NoHardware`] stands in for hosts
//! that cannot create one.

mod cache;
mod error;
mod hardware;

pub use cache::{ProbeCache, ProbeStats, ProbeValue};
pub use error::{ProbeError, ProbeErrorExt};
pub use hardware::{Capability, DISJOINT_TIMER_QUERY, HardwareHandle, Limit, NoHardware};
