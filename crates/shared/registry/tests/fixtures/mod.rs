use capflags_registry::{FlagError, FlagKind, FlagValue, Registry, Resolver};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how often an evaluator ran.
#[derive(Debug, Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Evaluator returning `value` and counting each run.
    pub fn constant(
        &self,
        value: impl Into<FlagValue>,
    ) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
        let counter = Arc::clone(&self.0);
        let value = value.into();
        move |_: &Resolver<'_>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        }
    }

    /// Evaluator returning the negation of boolean flag `source`, counting each run.
    pub fn negate(
        &self,
        source: &'static str,
    ) -> impl Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static {
        let counter = Arc::clone(&self.0);
        move |resolver: &Resolver<'_>| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(FlagValue::Bool(!resolver.get_bool(source)?))
        }
    }
}

/// `BASE` (true) and `DERIVED` (= !BASE), with counters for both.
pub fn base_and_derived() -> (Registry, Calls, Calls) {
    let registry = Registry::new();
    let base = Calls::default();
    let derived = Calls::default();

    registry.register_flag("BASE", FlagKind::Bool, base.constant(true)).unwrap();
    registry.register_flag("DERIVED", FlagKind::Bool, derived.negate("BASE")).unwrap();

    (registry, base, derived)
}
