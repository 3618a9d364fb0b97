//! Facade crate for the capability flag engine.
//! Re-exports the shared crates and assembles feature slices into an [`Engine`].
//! Keep this crate thin: it should compose other crates, not implement flag logic.
//!
//! ## Usage
//! ```rust
//! use capflags::Engine;
//! use capflags::domain::config::EngineConfig;
//! use capflags::render::flags::HAS_GPU;
//!
//! # fn main() -> Result<(), capflags::EngineError> {
//! let mut config = EngineConfig::default();
//! config.hardware.context_version = 2;
//!
//! let engine = Engine::builder().config(config).build()?;
//! assert!(engine.registry.get_bool(HAS_GPU).unwrap());
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;

pub use capflags_domain as domain;
pub use capflags_kernel as kernel;
pub use capflags_probe as probe;
pub use capflags_registry as registry;
pub use capflags_render as render;
pub use engine::{Engine, EngineBuilder, EngineInner};
pub use error::{EngineError, EngineErrorExt};

/// Feature slices compiled into the engine.
pub mod features {
    pub const ENABLED: &[&str] = &["render"];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
