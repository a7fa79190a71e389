mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any non-generic struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use dupont_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "index sequence is empty", labels = ["add an index here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The texts of the labels that point to each span of the error, in order.      |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression evaluated inside a `&self` method, so fields are reached through
/// `self`. `message` and `help` may be anything that implements [`ToString`], and `labels` anything
/// iterable over such values. Labels are attached to the spans of the error in order, and spans
/// without a label are highlighted without a message. When `message` is missing, the struct name
/// is used, split into lowercase words.
///
/// The generated code refers to the `ariadne` and `dupont_error` crates, so both must be
/// dependencies of the crate using this derive.
///
/// [`ErrorKind`]: https://docs.rs/dupont-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
