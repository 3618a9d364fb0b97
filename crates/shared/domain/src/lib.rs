//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, no locking, no evaluation. Flag values, device traits and the
//! configuration model live here so that every other crate agrees on them.

pub mod config;
pub mod constants;
pub mod device;
pub mod flag;

pub use device::{DeviceFacts, DeviceTraits};
pub use flag::{FlagKind, FlagValue};
