use capflags_derive::capflags_error;
use std::borrow::Cow;

#[capflags_error]
pub enum SampleError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Lookup of '{name}' failed{}", format_context(.context))]
    Lookup { name: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, SampleError> {
    Ok(raw.parse::<u32>()?)
}

#[test]
fn capflags_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/capflags_error_pass.rs");
    t.pass("tests/ui/capflags_error_tagged_source.rs");
}

#[test]
fn source_converts_through_question_mark() {
    let err = parse("sixteen").expect_err("not a number");
    assert!(matches!(err, SampleError::Parse { context: None, .. }));
}

#[test]
fn context_is_attached_to_source_results() {
    let err = "x".parse::<u32>().context("reading texture units").expect_err("not a number");
    assert!(err.to_string().starts_with("Parse error (reading texture units): "));
}

#[test]
fn context_is_attached_to_own_results() {
    let result: Result<(), SampleError> =
        Err(SampleError::Lookup { name: "HAS_GPU".into(), context: None });
    let err = result.context("resolving dependents").expect_err("lookup failed");
    assert_eq!(err.to_string(), "Lookup of 'HAS_GPU' failed (resolving dependents)");
}

#[test]
fn strings_become_internal_errors() {
    let borrowed = SampleError::from("static message");
    let owned = SampleError::from(format!("owned {}", 7));
    assert_eq!(borrowed.to_string(), "Internal error: static message");
    assert_eq!(owned.to_string(), "Internal error: owned 7");
}
