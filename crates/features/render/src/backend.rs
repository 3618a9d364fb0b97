use capflags_domain::DeviceFacts;
use capflags_probe::{Capability, HardwareHandle, Limit, ProbeCache, ProbeError};
use std::sync::Arc;

const CONTEXT_VERSION_PROBE: &str = "context_version";

/// What the rendering evaluators read from the outside world.
///
/// Hardware answers always go through the [`ProbeCache`], so resetting the flag registry never
/// reaches the driver again.
#[derive(Debug, Clone)]
pub struct RenderBackend {
    hardware: Arc<dyn HardwareHandle>,
    device: Arc<dyn DeviceFacts>,
    probes: ProbeCache,
}

impl RenderBackend {
    pub fn new(
        hardware: Arc<dyn HardwareHandle>,
        device: Arc<dyn DeviceFacts>,
        probes: ProbeCache,
    ) -> Self {
        Self { hardware, device, probes }
    }

    #[must_use]
    pub fn device(&self) -> &dyn DeviceFacts {
        self.device.as_ref()
    }

    #[must_use]
    pub const fn probes(&self) -> &ProbeCache {
        &self.probes
    }

    /// # Errors
    /// Propagates the hardware error; it is not cached.
    pub fn context_version(&self) -> Result<u32, ProbeError> {
        self.probes.query_version(CONTEXT_VERSION_PROBE, || self.hardware.context_version())
    }

    /// # Errors
    /// Propagates the hardware error; it is not cached.
    pub fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        self.probes.query_limit(limit.key(), || self.hardware.limit(limit))
    }

    /// # Errors
    /// Propagates the hardware error; it is not cached.
    pub fn extension_version(&self, extension: &'static str) -> Result<u32, ProbeError> {
        self.probes.query_version(extension, || self.hardware.extension_version(extension))
    }

    /// # Errors
    /// Propagates the hardware error; it is not cached.
    pub fn supports(&self, capability: Capability) -> Result<bool, ProbeError> {
        self.probes.query_flag(capability.key(), || self.hardware.supports(capability))
    }

    /// Forgets every hardware answer, for example after the context was lost and recreated.
    ///
    /// Flags already memoized keep their values until the registry is reset.
    pub fn context_lost(&self) -> usize {
        self.probes.clear()
    }
}
