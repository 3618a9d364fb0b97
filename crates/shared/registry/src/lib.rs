//! # Registry
//!
//! The flag registry: named boolean and numeric flags whose values are either pinned by a caller
//! or computed on demand by an evaluator and memoized until the next reset.
//!
//! * Evaluators receive a [`Resolver`] and may read other flags through it. Resolution is
//!   depth-first; a flag that reaches itself fails with [`FlagError::CyclicDependency`] naming
//!   the whole chain.
//! * [`Registry::set`] pins a value; [`Registry::unset`] releases it; [`Registry::reset`] drops
//!   every pinned and memoized value but keeps registrations.
//! * Pinning a flag never invalidates flags already computed from it.
//! * Hardware answers are not cached here. Evaluators that probe hardware go through a
//!   [`capflags_probe::ProbeCache`], which survives resets.
//!
//! [`combinators`] holds small evaluator builders (`requires`, `at_most`, `select`).

pub mod combinators;
mod definition;
mod error;
mod registry;
mod resolver;

pub use capflags_domain::{FlagKind, FlagValue};
pub use definition::{Evaluator, FlagDefinition, SetHook};
pub use error::{FlagError, FlagErrorExt};
pub use registry::{Registry, Resolution};
pub use resolver::Resolver;
