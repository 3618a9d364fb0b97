use crate::error::RenderError;
use crate::flags::{GPU_FORCE_F16_TEXTURES, GPU_RENDER_FLOAT32_ENABLED};
use capflags_registry::Registry;
use tracing::debug;

/// Forces 16-bit float textures.
///
/// Sets [`GPU_FORCE_F16_TEXTURES`] and drops a memoized [`GPU_RENDER_FLOAT32_ENABLED`], so the
/// very next read of the latter is `false`. An explicit override of
/// [`GPU_RENDER_FLOAT32_ENABLED`] is kept. Other flags already computed from it (such as the
/// uniform upload size) keep their values until the registry is reset.
///
/// # Errors
/// Returns [`RenderError::Flag`] if the rendering flags are not registered.
pub fn force_half_float(registry: &Registry) -> Result<(), RenderError> {
    registry.set(GPU_FORCE_F16_TEXTURES, true)?;
    let evicted = registry.evict(GPU_RENDER_FLOAT32_ENABLED);
    debug!(evicted, "Half float forced");
    Ok(())
}

/// Undoes [`force_half_float`]: the force flag goes back to its evaluator and float32 rendering
/// follows the hardware again on the next read.
///
/// # Errors
/// Returns [`RenderError::Flag`] if the rendering flags are not registered.
pub fn restore_full_precision(registry: &Registry) -> Result<(), RenderError> {
    registry.unset(GPU_FORCE_F16_TEXTURES)?;
    let evicted = registry.evict(GPU_RENDER_FLOAT32_ENABLED);
    debug!(evicted, "Full precision restored");
    Ok(())
}
