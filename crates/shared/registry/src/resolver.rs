use crate::error::FlagError;
use crate::registry::Registry;
use capflags_domain::FlagValue;
use std::fmt;

/// One flag whose evaluation is in progress on the current call stack.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub(crate) name: &'a str,
    pub(crate) parent: Option<&'a Frame<'a>>,
}

impl<'a> Frame<'a> {
    pub(crate) const fn new(name: &'a str, parent: Option<&'a Frame<'a>>) -> Self {
        Self { name, parent }
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.iter().any(|frame| frame.name == name)
    }

    /// Names from the outermost evaluation down to this one.
    pub(crate) fn path(&self) -> Vec<&'a str> {
        let mut names: Vec<_> = self.iter().map(|frame| frame.name).collect();
        names.reverse();
        names
    }

    fn iter(&self) -> impl Iterator<Item = &Frame<'a>> {
        std::iter::successors(Some(self), |frame| frame.parent)
    }
}

/// Read-only access to the registry handed to evaluators.
///
/// Reads made through the resolver are tracked against the flag being evaluated, so a flag that
/// depends on itself (directly or through others) fails with [`FlagError::CyclicDependency`]
/// instead of recursing forever. There is no way to set, unset or reset flags from here.
pub struct Resolver<'a> {
    registry: &'a Registry,
    frame: &'a Frame<'a>,
}

impl<'a> Resolver<'a> {
    pub(crate) const fn new(registry: &'a Registry, frame: &'a Frame<'a>) -> Self {
        Self { registry, frame }
    }

    /// Name of the flag being evaluated.
    #[must_use]
    pub fn flag(&self) -> &str {
        self.frame.name
    }

    /// Resolves another flag.
    ///
    /// # Errors
    /// Same as [`Registry::get`], plus [`FlagError::CyclicDependency`] when `name` is already
    /// being evaluated further up the stack.
    pub fn get(&self, name: &str) -> Result<FlagValue, FlagError> {
        self.registry.resolve(name, Some(self.frame))
    }

    /// # Errors
    /// As [`Resolver::get`], plus [`FlagError::TypeMismatch`] for numeric flags.
    pub fn get_bool(&self, name: &str) -> Result<bool, FlagError> {
        crate::registry::expect_bool(name, self.get(name)?)
    }

    /// # Errors
    /// As [`Resolver::get`], plus [`FlagError::TypeMismatch`] for boolean flags.
    pub fn get_number(&self, name: &str) -> Result<f64, FlagError> {
        crate::registry::expect_number(name, self.get(name)?)
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("evaluating", &self.frame.path()).finish_non_exhaustive()
    }
}
