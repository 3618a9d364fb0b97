use capflags_registry::FlagError;
use capflags_render::RenderError;
use std::borrow::Cow;

#[capflags_derive::capflags_error]
pub enum EngineError {
    #[error("Flag error{}: {source}", format_context(.context))]
    Flag { source: FlagError, context: Option<Cow<'static, str>> },

    #[error("Render slice error{}: {source}", format_context(.context))]
    Render { source: RenderError, context: Option<Cow<'static, str>> },

    #[error("Internal engine error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
