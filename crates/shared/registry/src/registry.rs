use crate::definition::FlagDefinition;
use crate::error::FlagError;
use crate::resolver::{Frame, Resolver};
use capflags_domain::{FlagKind, FlagValue};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, instrument, trace};

/// Where a flag's current value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// Nothing cached; the next read runs the evaluator.
    Unresolved,
    /// The evaluator ran since the last reset and produced this value.
    Memoized(FlagValue),
    /// Explicitly set; the evaluator is bypassed until `unset` or `reset`.
    Overridden(FlagValue),
}

impl Resolution {
    #[must_use]
    pub const fn value(&self) -> Option<FlagValue> {
        match self {
            Self::Unresolved => None,
            Self::Memoized(v) | Self::Overridden(v) => Some(*v),
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    resolutions: FxHashMap<String, Resolution>,
    /// Bumped by `reset`; evaluations that started in an older epoch are not memoized.
    epoch: u64,
}

/// Flags being evaluated on each thread, outermost first.
type ActiveFlags = Mutex<FxHashMap<ThreadId, Vec<String>>>;

#[derive(Debug, Default)]
struct RegistryInner {
    definitions: RwLock<FxHashMap<String, Arc<FlagDefinition>>>,
    state: Mutex<RegistryState>,
    active: ActiveFlags,
}

/// Pops the current thread's innermost active flag when the evaluation ends.
struct ActiveGuard<'a> {
    active: &'a ActiveFlags,
    thread: ThreadId,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        let mut active = self.active.lock();
        if let Some(stack) = active.get_mut(&self.thread) {
            stack.pop();
            if stack.is_empty() {
                active.remove(&self.thread);
            }
        }
    }
}

/// The flag registry.
///
/// A cheap handle (`Arc` inside): clones see the same flags, memoized values and overrides.
/// Reads follow a fixed precedence: override, then memoized value, then the evaluator, whose
/// result is memoized until the next [`Registry::reset`].
///
/// Overriding a flag does not touch flags that were already computed from it. They keep their
/// memoized value until they are unset, evicted or the registry is reset.
///
/// No lock is held while an evaluator runs, so evaluators may read other flags freely and
/// independent threads may resolve flags concurrently.
///
/// # Example
///
/// ```rust
/// use capflags_registry::{FlagError, FlagKind, Registry, combinators::requires};
///
/// # fn main() -> Result<(), FlagError> {
/// let registry = Registry::new();
/// registry.register_flag("HAS_GPU", FlagKind::Bool, |_| Ok(true.into()))?;
/// registry.register_flag("GPU_PACK", FlagKind::Bool, requires("HAS_GPU", |_| Ok(true)))?;
///
/// assert!(registry.get_bool("GPU_PACK")?);
///
/// registry.set("HAS_GPU", false)?;
/// assert!(registry.get_bool("GPU_PACK")?, "dependents keep their memoized value");
///
/// registry.reset();
/// registry.set("HAS_GPU", false)?;
/// assert!(!registry.get_bool("GPU_PACK")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flag computed by `evaluator`.
    ///
    /// # Errors
    /// Returns [`FlagError::DuplicateFlag`] if `name` is taken.
    pub fn register_flag<F>(
        &self,
        name: impl Into<String>,
        kind: FlagKind,
        evaluator: F,
    ) -> Result<(), FlagError>
    where
        F: Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static,
    {
        self.register(FlagDefinition::new(name, kind, evaluator))
    }

    /// Registers a prepared definition.
    ///
    /// # Errors
    /// Returns [`FlagError::DuplicateFlag`] if the name is taken.
    pub fn register(&self, definition: FlagDefinition) -> Result<(), FlagError> {
        let mut definitions = self.inner.definitions.write();
        if definitions.contains_key(definition.name()) {
            return Err(FlagError::DuplicateFlag {
                name: Cow::Owned(definition.name().to_owned()),
                context: None,
            });
        }

        let name = definition.name().to_owned();
        trace!(flag = %name, kind = %definition.kind(), "Flag registered");
        self.inner.state.lock().resolutions.insert(name.clone(), Resolution::Unresolved);
        definitions.insert(name, Arc::new(definition));
        Ok(())
    }

    /// Current value of `name`.
    ///
    /// # Errors
    /// * [`FlagError::UnknownFlag`] if `name` (or a flag it reads) is not registered.
    /// * [`FlagError::CyclicDependency`] if its evaluation reads itself.
    /// * [`FlagError::TypeMismatch`] if an evaluator produced a value of the wrong kind.
    /// * [`FlagError::Evaluation`] wrapping any other evaluator failure.
    pub fn get(&self, name: &str) -> Result<FlagValue, FlagError> {
        self.resolve(name, None)
    }

    /// # Errors
    /// As [`Registry::get`], plus [`FlagError::TypeMismatch`] for numeric flags.
    pub fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        expect_bool(name, self.get(name)?)
    }

    /// # Errors
    /// As [`Registry::get`], plus [`FlagError::TypeMismatch`] for boolean flags.
    pub fn get_number(&self, name: &str) -> Result<f64, FlagError> {
        expect_number(name, self.get(name)?)
    }

    /// Overrides `name` with `value`, replacing any override or memoized value.
    ///
    /// Flags already memoized from the old value are left alone. The flag's set hook, if any,
    /// runs after the override is visible.
    ///
    /// # Errors
    /// [`FlagError::UnknownFlag`], or [`FlagError::TypeMismatch`] when `value` has another kind
    /// than the flag.
    #[instrument(level = "debug", skip(self, value))]
    pub fn set(&self, name: &str, value: impl Into<FlagValue>) -> Result<(), FlagError> {
        let value = value.into();

        let definition = self.definition(name)?;
        if definition.kind() != value.kind() {
            return Err(FlagError::mismatch(name, definition.kind(), value.kind()));
        }

        self.inner.state.lock().resolutions.insert(name.to_owned(), Resolution::Overridden(value));
        debug!(flag = name, %value, "Flag overridden");

        definition.notify_set(&value);
        Ok(())
    }

    /// Clears the override and memoized value of `name`; the next read runs its evaluator.
    ///
    /// # Errors
    /// Returns [`FlagError::UnknownFlag`] if `name` is not registered.
    pub fn unset(&self, name: &str) -> Result<(), FlagError> {
        self.definition(name)?;
        let previous =
            self.inner.state.lock().resolutions.insert(name.to_owned(), Resolution::Unresolved);
        debug!(flag = name, ?previous, "Flag unset");
        Ok(())
    }

    /// Drops a memoized value of `name`, keeping an override. Returns whether anything was dropped.
    pub fn evict(&self, name: &str) -> bool {
        let mut state = self.inner.state.lock();
        match state.resolutions.get_mut(name) {
            Some(slot @ Resolution::Memoized(_)) => {
                *slot = Resolution::Unresolved;
                trace!(flag = name, "Memoized value evicted");
                true
            },
            _ => false,
        }
    }

    /// Forgets every memoized value and override. Registrations stay.
    pub fn reset(&self) {
        let mut state = self.inner.state.lock();
        state.resolutions.values_mut().for_each(|slot| *slot = Resolution::Unresolved);
        state.epoch += 1;
        debug!(epoch = state.epoch, flags = state.resolutions.len(), "Registry reset");
    }

    /// Resolves every registered flag, ordered by name.
    ///
    /// # Errors
    /// Stops at the first flag that fails to resolve.
    pub fn get_all(&self) -> Result<BTreeMap<String, FlagValue>, FlagError> {
        self.names().into_iter().map(|name| self.get(&name).map(|value| (name, value))).collect()
    }

    /// Overridden and memoized values, without evaluating anything.
    #[must_use]
    pub fn resolved(&self) -> BTreeMap<String, FlagValue> {
        self.inner
            .state
            .lock()
            .resolutions
            .iter()
            .filter_map(|(name, slot)| slot.value().map(|value| (name.clone(), value)))
            .collect()
    }

    /// Applies `set` to each pair in order. Returns how many were applied.
    ///
    /// # Errors
    /// Stops at the first pair that `set` rejects; earlier pairs stay applied.
    pub fn apply_overrides<I, N, V>(&self, overrides: I) -> Result<usize, FlagError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<FlagValue>,
    {
        overrides.into_iter().try_fold(0, |applied, (name, value)| {
            self.set(name.as_ref(), value).map(|()| applied + 1)
        })
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<Resolution> {
        self.inner.state.lock().resolutions.get(name).copied()
    }

    #[must_use]
    pub fn kind(&self, name: &str) -> Option<FlagKind> {
        self.inner.definitions.read().get(name).map(|definition| definition.kind())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.definitions.read().contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.inner.definitions.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.definitions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.definitions.read().is_empty()
    }

    /// Number of resets since creation.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner.state.lock().epoch
    }

    /// Marks `name` as being evaluated on this thread.
    ///
    /// Catches re-entry that bypasses the resolver, such as an evaluator reading its own flag
    /// through a cloned registry handle.
    fn enter(&self, name: &str) -> Result<ActiveGuard<'_>, FlagError> {
        let thread = thread::current().id();
        let mut active = self.inner.active.lock();
        let stack = active.entry(thread).or_default();

        if stack.iter().any(|flag| flag == name) {
            let mut chain: Vec<&str> = stack.iter().map(String::as_str).collect();
            chain.push(name);
            return Err(cyclic(name, &chain));
        }

        stack.push(name.to_owned());
        Ok(ActiveGuard { active: &self.inner.active, thread })
    }

    fn definition(&self, name: &str) -> Result<Arc<FlagDefinition>, FlagError> {
        self.inner.definitions.read().get(name).cloned().ok_or_else(|| FlagError::unknown(name))
    }

    pub(crate) fn resolve(
        &self,
        name: &str,
        parent: Option<&Frame<'_>>,
    ) -> Result<FlagValue, FlagError> {
        if let Some(parent) = parent.filter(|frame| frame.contains(name)) {
            let mut chain = parent.path();
            chain.push(name);
            return Err(cyclic(name, &chain));
        }

        let definition = self.definition(name)?;

        let epoch = {
            let state = self.inner.state.lock();
            match state.resolutions.get(name) {
                Some(Resolution::Overridden(value) | Resolution::Memoized(value)) => {
                    trace!(flag = name, %value, "Flag cache hit");
                    return Ok(*value);
                },
                Some(Resolution::Unresolved) | None => state.epoch,
            }
        };

        let _active = self.enter(name)?;
        let frame = Frame::new(name, parent);
        let value = definition.evaluate(&Resolver::new(self, &frame)).map_err(|err| {
            if err.is_flag_tagged() {
                err
            } else {
                FlagError::Evaluation {
                    flag: Cow::Owned(name.to_owned()),
                    source: Box::new(err),
                    context: None,
                }
            }
        })?;

        if value.kind() != definition.kind() {
            return Err(FlagError::mismatch(name, definition.kind(), value.kind()));
        }

        let mut state = self.inner.state.lock();
        let stale = state.epoch != epoch;
        match state.resolutions.get_mut(name) {
            Some(slot @ Resolution::Unresolved) if !stale => {
                *slot = Resolution::Memoized(value);
                debug!(flag = name, %value, "Flag evaluated");
                Ok(value)
            },
            // Someone else memoized or overrode the flag while the evaluator ran.
            Some(Resolution::Memoized(current) | Resolution::Overridden(current)) => Ok(*current),
            _ => {
                debug!(flag = name, %value, "Flag evaluated across a reset, not memoized");
                Ok(value)
            },
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("flags", &self.len())
            .field("epoch", &self.epoch())
            .finish_non_exhaustive()
    }
}

fn cyclic(name: &str, chain: &[&str]) -> FlagError {
    FlagError::CyclicDependency {
        name: Cow::Owned(name.to_owned()),
        chain: chain.join(" -> "),
        context: None,
    }
}

pub(crate) fn expect_bool(name: &str, value: FlagValue) -> Result<bool, FlagError> {
    value.as_bool().ok_or_else(|| FlagError::mismatch(name, FlagKind::Bool, value.kind()))
}

pub(crate) fn expect_number(name: &str, value: FlagValue) -> Result<f64, FlagError> {
    value.as_number().ok_or_else(|| FlagError::mismatch(name, FlagKind::Number, value.kind()))
}
