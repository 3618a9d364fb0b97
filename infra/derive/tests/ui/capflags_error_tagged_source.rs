use capflags_derive::capflags_error;
use std::borrow::Cow;

#[capflags_error]
pub enum DemoError {
    #[error("Evaluation of '{flag}' failed{}: {source}", format_context(.context))]
    Evaluation {
        flag: Cow<'static, str>,
        source: Box<DemoError>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let inner = DemoError::from("boom");
    let err = DemoError::Evaluation { flag: "A".into(), source: Box::new(inner), context: None };
    assert_eq!(err.to_string(), "Evaluation of 'A' failed: Internal error: boom");
}
