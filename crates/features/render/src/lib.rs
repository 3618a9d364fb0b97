//! # Render
//!
//! Capability flags of the GPU rendering backend.
//!
//! [`init`] registers the evaluators for every flag in [`flags`] on a registry. Evaluators read
//! the device through [`capflags_domain::DeviceFacts`] and the hardware through a
//! [`RenderBackend`], whose answers are cached in a [`capflags_probe::ProbeCache`] that outlives
//! registry resets.
//!
//! * Flags derived from hardware limits are clamped into safe ranges
//!   (`GPU_MAX_TEXTURES_IN_SHADER <= 16`).
//! * Without a rendering context (`GPU_CONTEXT_VERSION == 0`) every hardware-backed flag is
//!   `0`/`false` and the hardware is not asked.
//! * [`force_half_float`] and [`restore_full_precision`] switch float32 rendering off and on.

mod backend;
mod error;
mod evaluators;
pub mod flags;
mod precision;

pub use crate::backend::RenderBackend;
pub use crate::error::{RenderError, RenderErrorExt};
pub use crate::precision::{force_half_float, restore_full_precision};

use capflags_registry::Registry;
use tracing::info;

/// Initialize the render feature on `registry`.
///
/// # Errors
/// Returns [`RenderError::Flag`] if any rendering flag is already registered.
pub fn init(registry: &Registry, backend: &RenderBackend) -> Result<(), RenderError> {
    evaluators::register_all(registry, backend).context("Failed to register render flags")?;
    info!(flags = registry.len(), "Render slice initialized");
    Ok(())
}
