use capflags_registry::FlagError;
use std::borrow::Cow;

#[capflags_derive::capflags_error]
pub enum RenderError {
    #[error("Render flag error{}: {source}", format_context(.context))]
    Flag { source: FlagError, context: Option<Cow<'static, str>> },

    #[error("Internal render error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
