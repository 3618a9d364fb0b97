use capflags_probe::{Capability, HardwareHandle, Limit, ProbeError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hardware double that counts every call that reaches it.
#[derive(Debug, Default)]
pub struct CountingHardware {
    pub calls: AtomicUsize,
    pub max_texture_size: u64,
}

impl CountingHardware {
    pub fn with_texture_size(max_texture_size: u64) -> Self {
        Self { calls: AtomicUsize::new(0), max_texture_size }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl HardwareHandle for CountingHardware {
    fn context_version(&self) -> Result<u32, ProbeError> {
        self.hit();
        Ok(2)
    }

    fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        self.hit();
        match limit {
            Limit::MaxTextureSize => Ok(self.max_texture_size),
            Limit::MaxTextureImageUnits => Ok(16),
        }
    }

    fn extension_version(&self, _extension: &str) -> Result<u32, ProbeError> {
        self.hit();
        Ok(1)
    }

    fn supports(&self, _capability: Capability) -> Result<bool, ProbeError> {
        self.hit();
        Ok(true)
    }
}
