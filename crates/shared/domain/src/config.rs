use crate::device::DeviceTraits;
use crate::flag::FlagValue;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level engine configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfigInner {
    pub device: DeviceConfig,
    pub hardware: HardwareConfig,
    pub flags: FlagsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(flatten, default)]
    inner: Arc<EngineConfigInner>,
}

impl Deref for EngineConfig {
    type Target = EngineConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for EngineConfig {
    fn deref_mut(&mut self) -> &mut EngineConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Static description of the host device.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub traits: DeviceTraits,
}

/// Static answers for hosts without a live rendering context (CI, headless tools, tests).
///
/// `context_version = 0` means no context can be created; every other field is then ignored by
/// the evaluators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub context_version: u32,
    pub max_texture_size: u64,
    pub max_texture_image_units: u64,
    pub disjoint_timer_query_version: u32,
    pub render_float32: bool,
    pub download_float: bool,
    pub fence_sync: bool,
}

/// Explicit flag values applied when the engine starts.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlagsConfig {
    /// Name to value map.
    pub overrides: BTreeMap<String, FlagValue>,
    /// Compact `NAME:value,NAME:value` list, applied after `overrides`.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            context_version: 0,
            max_texture_size: 0,
            max_texture_image_units: 0,
            disjoint_timer_query_version: 0,
            render_float32: false,
            download_float: false,
            fence_sync: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}
