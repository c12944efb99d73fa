mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the `cas_error::ErrorKind` trait for the given struct or enum.
///
/// The information of the error is customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use cas_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "cannot divide by zero", labels = ["this expression"])]
/// pub struct Foo;
///
/// let err = cas_error::Error::from_kind(Foo);
/// assert_eq!(err.to_string(), "cannot divide by zero");
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error. Required.                     |
/// | `labels`    | An array of label texts, paired in order with the spans of the error.        |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
/// | `note`      | Optional note with additional context.                                       |
///
/// Each tag accepts an expression that evaluates to something implementing [`ToString`]. The
/// expressions are evaluated inside methods taking `&self`, so fields are reachable through
/// `self`.
///
/// The deriving crate must depend on `ariadne` and `cas-error`.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}
