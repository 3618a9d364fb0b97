use crate::backend::RenderBackend;
use crate::flags::*;
use capflags_domain::{FlagKind, FlagValue};
use capflags_probe::{Capability, DISJOINT_TIMER_QUERY, Limit};
use capflags_registry::combinators::{at_most, constant, follows, select};
use capflags_registry::{FlagDefinition, FlagError, Registry, Resolver};
use tracing::info;

/// Registers every rendering flag on `registry`.
///
/// # Errors
/// Returns [`FlagError::DuplicateFlag`] if any of the names is already taken.
pub(crate) fn register_all(registry: &Registry, backend: &RenderBackend) -> Result<(), FlagError> {
    let hw = backend.clone();
    registry.register_flag(GPU_CONTEXT_VERSION, FlagKind::Number, move |_: &Resolver<'_>| {
        Ok(hw.context_version()?.into())
    })?;
    registry.register_flag(HAS_GPU, FlagKind::Bool, |r: &Resolver<'_>| {
        Ok(has_context(r)?.into())
    })?;

    registry.register_flag(GPU_PACK, FlagKind::Bool, follows(HAS_GPU))?;
    for kernel in PACKED_KERNELS {
        registry.register_flag(kernel, FlagKind::Bool, follows(GPU_PACK))?;
    }

    let hw = backend.clone();
    registry.register_flag(GPU_MAX_TEXTURE_SIZE, FlagKind::Number, move |r: &Resolver<'_>| {
        if !has_context(r)? {
            return Ok(FlagValue::Number(0.0));
        }
        Ok(hw.limit(Limit::MaxTextureSize)?.into())
    })?;

    let hw = backend.clone();
    registry.register_flag(
        GPU_MAX_TEXTURES_IN_SHADER,
        FlagKind::Number,
        at_most(MAX_TEXTURES_IN_SHADER_CEILING, move |r: &Resolver<'_>| {
            if !has_context(r)? {
                return Ok(0.0);
            }
            #[allow(clippy::cast_precision_loss)]
            let units = hw.limit(Limit::MaxTextureImageUnits)? as f64;
            Ok(units)
        }),
    )?;

    let hw = backend.clone();
    registry.register_flag(
        GPU_DISJOINT_QUERY_TIMER_EXTENSION_VERSION,
        FlagKind::Number,
        move |r: &Resolver<'_>| {
            if !has_context(r)? {
                return Ok(FlagValue::Number(0.0));
            }
            Ok(hw.extension_version(DISJOINT_TIMER_QUERY)?.into())
        },
    )?;

    let hw = backend.clone();
    registry.register_flag(
        GPU_DISJOINT_QUERY_TIMER_EXTENSION_RELIABLE,
        FlagKind::Bool,
        move |r: &Resolver<'_>| {
            let available = r.get_number(GPU_DISJOINT_QUERY_TIMER_EXTENSION_VERSION)? > 0.0;
            Ok((available && !hw.device().is_constrained()).into())
        },
    )?;

    registry.register_flag(
        GPU_RENDER_FLOAT32_CAPABLE,
        FlagKind::Bool,
        capability(backend, Capability::RenderFloat32),
    )?;
    registry.register(
        FlagDefinition::new(GPU_FORCE_F16_TEXTURES, FlagKind::Bool, constant(false)).on_set(
            |value| {
                if value.as_bool() == Some(true) {
                    info!("Half precision float textures forced");
                }
            },
        ),
    )?;
    registry.register_flag(GPU_RENDER_FLOAT32_ENABLED, FlagKind::Bool, |r: &Resolver<'_>| {
        if r.get_bool(GPU_FORCE_F16_TEXTURES)? {
            return Ok(FlagValue::Bool(false));
        }
        Ok(r.get_bool(GPU_RENDER_FLOAT32_CAPABLE)?.into())
    })?;
    registry.register_flag(
        GPU_DOWNLOAD_FLOAT_ENABLED,
        FlagKind::Bool,
        capability(backend, Capability::DownloadFloat),
    )?;
    registry.register_flag(
        GPU_FENCE_API_ENABLED,
        FlagKind::Bool,
        capability(backend, Capability::FenceSync),
    )?;

    registry.register_flag(
        GPU_SIZE_UPLOAD_UNIFORM,
        FlagKind::Number,
        select(GPU_RENDER_FLOAT32_ENABLED, UNIFORM_UPLOAD_SIZE, 0),
    )?;

    let hw = backend.clone();
    registry.register_flag(GPU_FLUSH_THRESHOLD, FlagKind::Number, move |_: &Resolver<'_>| {
        Ok(FlagValue::Number(if hw.device().is_constrained() { 1.0 } else { -1.0 }))
    })?;
    registry.register_flag(GPU_DELETE_TEXTURE_THRESHOLD, FlagKind::Number, constant(-1))?;

    Ok(())
}

fn has_context(resolver: &Resolver<'_>) -> Result<bool, FlagError> {
    Ok(resolver.get_number(GPU_CONTEXT_VERSION)? > 0.0)
}

/// A hardware capability, `false` without a context and then never queried.
fn capability(
    backend: &RenderBackend,
    capability: Capability,
) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
    let hw = backend.clone();
    move |r: &Resolver<'_>| Ok((has_context(r)? && hw.supports(capability)?).into())
}
