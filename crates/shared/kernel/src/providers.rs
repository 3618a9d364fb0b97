//! Providers backed by configuration instead of a live device.

use capflags_domain::config::{DeviceConfig, HardwareConfig};
use capflags_domain::{DeviceFacts, DeviceTraits};
use capflags_probe::{Capability, DISJOINT_TIMER_QUERY, HardwareHandle, Limit, ProbeError};

/// Device facts fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticDevice {
    traits: DeviceTraits,
}

impl StaticDevice {
    #[must_use]
    pub const fn new(traits: DeviceTraits) -> Self {
        Self { traits }
    }
}

impl From<&DeviceConfig> for StaticDevice {
    fn from(config: &DeviceConfig) -> Self {
        Self::new(config.traits)
    }
}

impl DeviceFacts for StaticDevice {
    fn traits(&self) -> DeviceTraits {
        self.traits
    }
}

/// Hardware answers taken from [`HardwareConfig`].
///
/// With `context_version = 0` the handle behaves like a host without a rendering context:
/// limits are unavailable, capabilities and extensions are absent.
#[derive(Debug, Clone)]
pub struct StaticHardware {
    config: HardwareConfig,
}

impl StaticHardware {
    #[must_use]
    pub const fn new(config: HardwareConfig) -> Self {
        Self { config }
    }

    const fn has_context(&self) -> bool {
        self.config.context_version > 0
    }
}

impl From<&HardwareConfig> for StaticHardware {
    fn from(config: &HardwareConfig) -> Self {
        Self::new(config.clone())
    }
}

impl HardwareHandle for StaticHardware {
    fn context_version(&self) -> Result<u32, ProbeError> {
        Ok(self.config.context_version)
    }

    fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        if !self.has_context() {
            return Err(ProbeError::Unavailable {
                message: "configured without a rendering context".into(),
                context: Some(limit.key().into()),
            });
        }

        Ok(match limit {
            Limit::MaxTextureSize => self.config.max_texture_size,
            Limit::MaxTextureImageUnits => self.config.max_texture_image_units,
        })
    }

    fn extension_version(&self, extension: &str) -> Result<u32, ProbeError> {
        Ok(match extension {
            DISJOINT_TIMER_QUERY if self.has_context() => self.config.disjoint_timer_query_version,
            _ => 0,
        })
    }

    fn supports(&self, capability: Capability) -> Result<bool, ProbeError> {
        Ok(self.has_context()
            && match capability {
                Capability::RenderFloat32 => self.config.render_float32,
                Capability::DownloadFloat => self.config.download_float,
                Capability::FenceSync => self.config.fence_sync,
            })
    }
}
