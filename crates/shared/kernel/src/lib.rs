//! Kernel utilities shared by the facade and the binaries.
//! Keep this crate lightweight: it turns configuration into the providers and overrides the
//! registry needs, and nothing else.
//!
//! ## Config loading
//! ```rust,no_run
//! use capflags_kernel::config::load_config;
//! use capflags_kernel::domain::config::EngineConfig;
//!
//! let cfg: EngineConfig = load_config(Some("capflags.toml")).unwrap_or_default();
//! ```
//!
//! ## Override strings
//! ```rust
//! # use capflags_kernel::overrides::parse_overrides;
//! let pairs = parse_overrides("GPU_PACK:false,GPU_FLUSH_THRESHOLD:2").unwrap();
//! assert_eq!(pairs.len(), 2);
//! ```
pub mod config;
pub mod overrides;
pub mod providers;

pub use capflags_domain as domain;
