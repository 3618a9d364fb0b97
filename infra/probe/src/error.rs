use std::borrow::Cow;

/// Errors raised by hardware handles and the probe cache.
#[capflags_derive::capflags_error]
pub enum ProbeError {
    /// No hardware context exists to answer the query.
    #[error("Hardware unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The driver was asked and answered with an error.
    #[error("Probe '{probe}' failed{}: {message}", format_context(.context))]
    QueryFailed {
        probe: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A cached entry holds a value of another shape than the caller asked for.
    #[error("Probe '{probe}' holds {actual}, expected {expected}{}", format_context(.context))]
    UnexpectedValue {
        probe: Cow<'static, str>,
        expected: &'static str,
        actual: crate::ProbeValue,
        context: Option<Cow<'static, str>>,
    },
}
