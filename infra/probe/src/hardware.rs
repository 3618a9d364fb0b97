use crate::error::ProbeError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Extension that exposes GPU timer queries.
pub const DISJOINT_TIMER_QUERY: &str = "EXT_disjoint_timer_query";

/// Numeric limits a rendering context reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    MaxTextureSize,
    MaxTextureImageUnits,
}

impl Limit {
    /// Key under which the limit is cached.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MaxTextureSize => "max_texture_size",
            Self::MaxTextureImageUnits => "max_texture_image_units",
        }
    }
}

/// Yes/no capabilities a rendering context can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Render targets can hold 32-bit floats.
    RenderFloat32,
    /// Float textures can be read back to the host.
    DownloadFloat,
    /// Fence sync objects are available.
    FenceSync,
}

impl Capability {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::RenderFloat32 => "render_float32",
            Self::DownloadFloat => "download_float",
            Self::FenceSync => "fence_sync",
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Access to the rendering context owned by the backend.
///
/// Every call may be slow (driver round trip) and may fail; callers are expected to go through a
/// [`ProbeCache`](crate::ProbeCache) instead of calling a handle repeatedly.
pub trait HardwareHandle: Send + Sync + fmt::Debug {
    /// Highest context version the host can create, `0` when none can be created.
    ///
    /// # Errors
    /// Returns [`ProbeError`] when the host cannot be asked at all.
    fn context_version(&self) -> Result<u32, ProbeError>;

    /// Reads a numeric limit from the current context.
    ///
    /// # Errors
    /// Returns [`ProbeError`] when the context is missing or the driver rejects the query.
    fn limit(&self, limit: Limit) -> Result<u64, ProbeError>;

    /// Version of a named extension, `0` when the extension is absent.
    ///
    /// # Errors
    /// Returns [`ProbeError`] when the context is missing or the driver rejects the query.
    fn extension_version(&self, extension: &str) -> Result<u32, ProbeError>;

    /// Whether the context supports `capability`.
    ///
    /// # Errors
    /// Returns [`ProbeError`] when the context is missing or the driver rejects the query.
    fn supports(&self, capability: Capability) -> Result<bool, ProbeError>;
}

impl<T: HardwareHandle + ?Sized> HardwareHandle for Arc<T> {
    fn context_version(&self) -> Result<u32, ProbeError> {
        (**self).context_version()
    }

    fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        (**self).limit(limit)
    }

    fn extension_version(&self, extension: &str) -> Result<u32, ProbeError> {
        (**self).extension_version(extension)
    }

    fn supports(&self, capability: Capability) -> Result<bool, ProbeError> {
        (**self).supports(capability)
    }
}

/// A host without any rendering context.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHardware;

impl HardwareHandle for NoHardware {
    fn context_version(&self) -> Result<u32, ProbeError> {
        Ok(0)
    }

    fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        Err(ProbeError::Unavailable {
            message: "no rendering context".into(),
            context: Some(limit.key().into()),
        })
    }

    fn extension_version(&self, _extension: &str) -> Result<u32, ProbeError> {
        Ok(0)
    }

    fn supports(&self, _capability: Capability) -> Result<bool, ProbeError> {
        Ok(false)
    }
}
