use crate::error::{EngineError, EngineErrorExt};
use capflags_domain::config::EngineConfig;
use capflags_domain::{DeviceFacts, FlagValue};
use capflags_kernel::overrides;
use capflags_kernel::providers::{StaticDevice, StaticHardware};
use capflags_probe::{HardwareHandle, ProbeCache};
use capflags_registry::Registry;
use capflags_render::RenderBackend;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct EngineInner {
    pub config: EngineConfig,
    pub registry: Registry,
    pub backend: RenderBackend,
}

/// A registry with every feature slice installed, plus the providers its evaluators read.
///
/// Cheap to clone; clones share flags and probe answers.
#[derive(Debug, Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn probes(&self) -> &ProbeCache {
        self.inner.backend.probes()
    }

    /// Every flag, resolved.
    ///
    /// # Errors
    /// Returns the first flag that fails to resolve.
    pub fn snapshot(&self) -> Result<BTreeMap<String, FlagValue>, EngineError> {
        Ok(self.inner.registry.get_all()?)
    }

    /// # Errors
    /// See [`capflags_render::force_half_float`].
    pub fn force_half_float(&self) -> Result<(), EngineError> {
        Ok(capflags_render::force_half_float(&self.inner.registry)?)
    }

    /// # Errors
    /// See [`capflags_render::restore_full_precision`].
    pub fn restore_full_precision(&self) -> Result<(), EngineError> {
        Ok(capflags_render::restore_full_precision(&self.inner.registry)?)
    }

    /// Resets the registry and applies the configured overrides again.
    ///
    /// Hardware answers stay cached.
    ///
    /// # Errors
    /// Returns [`EngineError::Flag`] if a configured override is rejected.
    pub fn reset_to_config(&self) -> Result<(), EngineError> {
        self.inner.registry.reset();
        overrides::apply(&self.inner.registry, &self.inner.config.flags)
            .context("Failed to re-apply configured overrides")?;
        Ok(())
    }
}

impl Deref for Engine {
    type Target = EngineInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Builder for [`Engine`].
///
/// Anything not provided is derived from the configuration: [`StaticHardware`] from
/// `hardware`, [`StaticDevice`] from `device`, a fresh registry and probe cache.
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: Option<EngineConfig>,
    hardware: Option<Arc<dyn HardwareHandle>>,
    device: Option<Arc<dyn DeviceFacts>>,
    probes: Option<ProbeCache>,
    registry: Option<Registry>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Live hardware handle, replacing the configured static answers.
    pub fn hardware(mut self, hardware: Arc<dyn HardwareHandle>) -> Self {
        self.hardware = Some(hardware);
        self
    }

    pub fn device(mut self, device: Arc<dyn DeviceFacts>) -> Self {
        self.device = Some(device);
        self
    }

    /// Shares an existing probe cache, for example across engines on the same context.
    pub fn probes(mut self, probes: ProbeCache) -> Self {
        self.probes = Some(probes);
        self
    }

    /// Installs the flags on an existing registry instead of a fresh one.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Consumes the builder, registers every feature slice and applies configured overrides.
    ///
    /// # Errors
    /// * [`EngineError::Render`] if the rendering flags are already registered.
    /// * [`EngineError::Flag`] if a configured override does not parse or is rejected.
    pub fn build(self) -> Result<Engine, EngineError> {
        let config = self.config.unwrap_or_default();
        let hardware =
            self.hardware.unwrap_or_else(|| Arc::new(StaticHardware::from(&config.hardware)));
        let device = self.device.unwrap_or_else(|| Arc::new(StaticDevice::from(&config.device)));
        let backend = RenderBackend::new(hardware, device, self.probes.unwrap_or_default());
        let registry = self.registry.unwrap_or_default();

        capflags_render::init(&registry, &backend)?;

        let applied = overrides::apply(&registry, &config.flags)
            .context("Failed to apply configured overrides")?;

        info!(flags = registry.len(), overrides = applied, "Engine initialized");

        Ok(Engine { inner: Arc::new(EngineInner { config, registry, backend }) })
    }
}
