#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the capflags workspace.
//!
//! The only macro today is [`macro@capflags_error`], which every crate uses to declare its
//! error enum so that context handling and conversions look the same everywhere.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! capflags-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a crate's error enum.
///
/// # Features
///
/// * **Automatic Derives**: injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: generates a companion `<Name>Ext` trait adding `.context(..)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every convertible source type.
/// * **Conversions**: implements `From<Source>` for variants whose only fields are
///   `source` and `context`. Variants that carry extra identifying fields (for example the
///   name of the flag that failed) must be constructed explicitly, so no conversion is
///   generated for them.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * A private `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with **named** fields only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source (`source` field, `#[source]` or `#[from]`) must have a `context`.
///
/// # Example
///
/// ```rust,ignore
/// use capflags_derive::capflags_error;
/// use std::borrow::Cow;
///
/// #[capflags_error]
/// pub enum ProbeError {
///     #[error("Probe unavailable{}: {message}", format_context(.context))]
///     Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal probe error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read() -> Result<u64, ProbeError> {
///     Err("driver returned garbage".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn capflags_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
