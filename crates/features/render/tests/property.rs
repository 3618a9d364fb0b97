pub mod fixtures;

use capflags_domain::DeviceTraits;
use capflags_render::flags::{GPU_MAX_TEXTURES_IN_SHADER, GPU_PACK, GPU_PACK_CLIP, HAS_GPU};
use fixtures::{FakeGpu, setup};
use proptest::prelude::*;

proptest! {
    #[test]
    fn textures_in_shader_never_exceed_ceiling(units in 0_u64..256) {
        let gpu = FakeGpu { texture_units: units, ..FakeGpu::desktop() };
        let (registry, _, _) = setup(gpu, DeviceTraits::empty());

        let value = registry.get_number(GPU_MAX_TEXTURES_IN_SHADER).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let raw = units as f64;
        prop_assert!((value - raw.min(16.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn packed_kernel_is_conjunction(
        has_gpu in any::<bool>(),
        pack in proptest::option::of(any::<bool>()),
    ) {
        let (registry, _, _) = setup(FakeGpu::desktop(), DeviceTraits::empty());
        registry.set(HAS_GPU, has_gpu).unwrap();
        if let Some(pack) = pack {
            registry.set(GPU_PACK, pack).unwrap();
        }

        let expected = pack.unwrap_or(has_gpu);
        prop_assert_eq!(registry.get_bool(GPU_PACK_CLIP).unwrap(), expected);
    }
}
