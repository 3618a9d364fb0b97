//! Names of the flags registered by [`init`](crate::init).

/// Highest rendering context version the host can create; `0` means none.
pub const GPU_CONTEXT_VERSION: &str = "GPU_CONTEXT_VERSION";
pub const HAS_GPU: &str = "HAS_GPU";

/// Packed (four values per texel) kernels.
pub const GPU_PACK: &str = "GPU_PACK";
pub const GPU_PACK_NORMALIZATION: &str = "GPU_PACK_NORMALIZATION";
pub const GPU_PACK_CLIP: &str = "GPU_PACK_CLIP";
pub const GPU_PACK_DEPTHWISECONV: &str = "GPU_PACK_DEPTHWISECONV";
pub const GPU_PACK_BINARY_OPERATIONS: &str = "GPU_PACK_BINARY_OPERATIONS";
pub const GPU_PACK_ARRAY_OPERATIONS: &str = "GPU_PACK_ARRAY_OPERATIONS";
pub const GPU_PACK_IMAGE_OPERATIONS: &str = "GPU_PACK_IMAGE_OPERATIONS";
pub const GPU_PACK_REDUCE: &str = "GPU_PACK_REDUCE";
pub const GPU_LAZILY_UNPACK: &str = "GPU_LAZILY_UNPACK";
pub const GPU_CONV_IM2COL: &str = "GPU_CONV_IM2COL";

pub const GPU_MAX_TEXTURE_SIZE: &str = "GPU_MAX_TEXTURE_SIZE";
pub const GPU_MAX_TEXTURES_IN_SHADER: &str = "GPU_MAX_TEXTURES_IN_SHADER";

pub const GPU_DISJOINT_QUERY_TIMER_EXTENSION_VERSION: &str =
    "GPU_DISJOINT_QUERY_TIMER_EXTENSION_VERSION";
/// Timer queries exist and the device is not a phone or tablet.
pub const GPU_DISJOINT_QUERY_TIMER_EXTENSION_RELIABLE: &str =
    "GPU_DISJOINT_QUERY_TIMER_EXTENSION_RELIABLE";

pub const GPU_RENDER_FLOAT32_CAPABLE: &str = "GPU_RENDER_FLOAT32_CAPABLE";
/// Forces 16-bit float textures regardless of hardware support.
pub const GPU_FORCE_F16_TEXTURES: &str = "GPU_FORCE_F16_TEXTURES";
pub const GPU_RENDER_FLOAT32_ENABLED: &str = "GPU_RENDER_FLOAT32_ENABLED";
pub const GPU_DOWNLOAD_FLOAT_ENABLED: &str = "GPU_DOWNLOAD_FLOAT_ENABLED";
pub const GPU_FENCE_API_ENABLED: &str = "GPU_FENCE_API_ENABLED";

/// Largest tensor size uploaded as a shader uniform instead of a texture.
pub const GPU_SIZE_UPLOAD_UNIFORM: &str = "GPU_SIZE_UPLOAD_UNIFORM";
/// Queued commands before a forced flush; `-1` disables flushing.
pub const GPU_FLUSH_THRESHOLD: &str = "GPU_FLUSH_THRESHOLD";
/// Texture memory (MB) before textures are deleted eagerly; `-1` never deletes.
pub const GPU_DELETE_TEXTURE_THRESHOLD: &str = "GPU_DELETE_TEXTURE_THRESHOLD";

/// Flags that are on exactly when [`GPU_PACK`] is.
pub const PACKED_KERNELS: [&str; 9] = [
    GPU_PACK_NORMALIZATION,
    GPU_PACK_CLIP,
    GPU_PACK_DEPTHWISECONV,
    GPU_PACK_BINARY_OPERATIONS,
    GPU_PACK_ARRAY_OPERATIONS,
    GPU_PACK_IMAGE_OPERATIONS,
    GPU_PACK_REDUCE,
    GPU_LAZILY_UNPACK,
    GPU_CONV_IM2COL,
];

/// Ceiling of [`GPU_MAX_TEXTURES_IN_SHADER`], whatever the driver reports.
pub const MAX_TEXTURES_IN_SHADER_CEILING: f64 = 16.0;

/// [`GPU_SIZE_UPLOAD_UNIFORM`] when float32 rendering is enabled.
pub const UNIFORM_UPLOAD_SIZE: u32 = 4;
