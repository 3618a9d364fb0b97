use capflags_domain::FlagKind;
use capflags_probe::ProbeError;
use std::borrow::Cow;

/// Errors raised while registering, resolving or overriding flags.
#[capflags_derive::capflags_error]
pub enum FlagError {
    #[error("Unknown flag '{name}'{}", format_context(.context))]
    UnknownFlag { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Flag '{name}' is already registered{}", format_context(.context))]
    DuplicateFlag { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value of the wrong kind was read, written or produced by an evaluator.
    #[error("Flag '{name}' is {expected}, got {actual}{}", format_context(.context))]
    TypeMismatch {
        name: Cow<'static, str>,
        expected: FlagKind,
        actual: FlagKind,
        context: Option<Cow<'static, str>>,
    },

    /// Evaluating `name` reached `name` again; `chain` lists the path (`A -> B -> A`).
    #[error("Cyclic dependency on flag '{name}': {chain}{}", format_context(.context))]
    CyclicDependency {
        name: Cow<'static, str>,
        chain: String,
        context: Option<Cow<'static, str>>,
    },

    /// An evaluator failed; `flag` names the flag whose evaluator produced `source`.
    #[error("Evaluation of '{flag}' failed{}: {source}", format_context(.context))]
    Evaluation {
        flag: Cow<'static, str>,
        source: Box<FlagError>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Hardware probe error{}: {source}", format_context(.context))]
    Probe { source: ProbeError, context: Option<Cow<'static, str>> },

    #[error("Invalid override{}: {message}", format_context(.context))]
    InvalidOverride { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FlagError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownFlag { name: Cow::Owned(name.to_owned()), context: None }
    }

    pub(crate) fn mismatch(name: &str, expected: FlagKind, actual: FlagKind) -> Self {
        Self::TypeMismatch { name: Cow::Owned(name.to_owned()), expected, actual, context: None }
    }

    /// Whether the error already names the flag it concerns.
    ///
    /// Tagged errors travel through dependent evaluators unchanged; anything else is wrapped in
    /// [`FlagError::Evaluation`] by the flag whose evaluator returned it.
    #[must_use]
    pub const fn is_flag_tagged(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlag { .. }
                | Self::DuplicateFlag { .. }
                | Self::TypeMismatch { .. }
                | Self::CyclicDependency { .. }
                | Self::Evaluation { .. }
        )
    }

    /// Name of the flag the error is about, if any.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::UnknownFlag { name, .. }
            | Self::DuplicateFlag { name, .. }
            | Self::TypeMismatch { name, .. }
            | Self::CyclicDependency { name, .. } => Some(name),
            Self::Evaluation { flag, .. } => Some(flag),
            Self::Probe { .. } | Self::InvalidOverride { .. } | Self::Internal { .. } => None,
        }
    }

    /// Innermost error of an evaluation chain.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Evaluation { source, .. } = current {
            current = source;
        }
        current
    }
}
