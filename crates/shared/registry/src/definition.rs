use crate::error::FlagError;
use crate::resolver::Resolver;
use capflags_domain::{FlagKind, FlagValue};
use std::fmt;
use std::sync::Arc;

/// Computes a flag's value. Reads other flags through the [`Resolver`] only.
pub type Evaluator = Arc<dyn Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync>;

/// Called with the new value after an override is installed.
pub type SetHook = Arc<dyn Fn(&FlagValue) + Send + Sync>;

/// Everything the registry knows about one flag. Immutable once registered.
#[derive(Clone)]
pub struct FlagDefinition {
    name: String,
    kind: FlagKind,
    evaluator: Evaluator,
    on_set: Option<SetHook>,
}

impl FlagDefinition {
    pub fn new<F>(name: impl Into<String>, kind: FlagKind, evaluator: F) -> Self
    where
        F: Fn(&Resolver<'_>) -> Result<FlagValue, FlagError> + Send + Sync + 'static,
    {
        Self { name: name.into(), kind, evaluator: Arc::new(evaluator), on_set: None }
    }

    /// Attaches a hook that runs every time the flag is overridden through `set`.
    #[must_use]
    pub fn on_set<H>(mut self, hook: H) -> Self
    where
        H: Fn(&FlagValue) + Send + Sync + 'static,
    {
        self.on_set = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        self.kind
    }

    pub(crate) fn evaluate(&self, resolver: &Resolver<'_>) -> Result<FlagValue, FlagError> {
        (self.evaluator)(resolver)
    }

    pub(crate) fn notify_set(&self, value: &FlagValue) {
        if let Some(hook) = &self.on_set {
            hook(value);
        }
    }
}

impl fmt::Debug for FlagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("on_set", &self.on_set.is_some())
            .finish_non_exhaustive()
    }
}
