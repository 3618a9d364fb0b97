use capflags_domain::DeviceTraits;
use capflags_probe::{
    Capability, DISJOINT_TIMER_QUERY, HardwareHandle, Limit, ProbeCache, ProbeError,
};
use capflags_registry::Registry;
use capflags_render::RenderBackend;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scriptable GPU that counts the queries reaching it.
#[derive(Debug, Default)]
pub struct FakeGpu {
    pub version: u32,
    pub max_texture_size: u64,
    pub texture_units: u64,
    pub timer_version: u32,
    pub float32: bool,
    pub download_float: bool,
    pub fence: bool,
    pub fail_limits: bool,
    pub calls: AtomicUsize,
}

impl FakeGpu {
    pub fn desktop() -> Self {
        Self {
            version: 2,
            max_texture_size: 16384,
            texture_units: 16,
            timer_version: 2,
            float32: true,
            download_float: true,
            fence: true,
            ..Self::default()
        }
    }

    pub fn without_context() -> Self {
        Self { version: 0, ..Self::desktop() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl HardwareHandle for FakeGpu {
    fn context_version(&self) -> Result<u32, ProbeError> {
        self.hit();
        Ok(self.version)
    }

    fn limit(&self, limit: Limit) -> Result<u64, ProbeError> {
        self.hit();
        if self.fail_limits {
            return Err(ProbeError::QueryFailed {
                probe: limit.key().into(),
                message: "context lost".into(),
                context: None,
            });
        }
        Ok(match limit {
            Limit::MaxTextureSize => self.max_texture_size,
            Limit::MaxTextureImageUnits => self.texture_units,
        })
    }

    fn extension_version(&self, extension: &str) -> Result<u32, ProbeError> {
        self.hit();
        Ok(if extension == DISJOINT_TIMER_QUERY { self.timer_version } else { 0 })
    }

    fn supports(&self, capability: Capability) -> Result<bool, ProbeError> {
        self.hit();
        Ok(match capability {
            Capability::RenderFloat32 => self.float32,
            Capability::DownloadFloat => self.download_float,
            Capability::FenceSync => self.fence,
        })
    }
}

/// Registry with the render flags installed over `gpu` on a device with `traits`.
pub fn setup(gpu: FakeGpu, traits: DeviceTraits) -> (Registry, Arc<FakeGpu>, RenderBackend) {
    let gpu = Arc::new(gpu);
    let backend = RenderBackend::new(gpu.clone(), Arc::new(traits), ProbeCache::new());
    let registry = Registry::new();
    capflags_render::init(&registry, &backend).unwrap();
    (registry, gpu, backend)
}

pub fn desktop() -> (Registry, Arc<FakeGpu>, RenderBackend) {
    setup(FakeGpu::desktop(), DeviceTraits::empty())
}
