#![doc = include_str!("../README.md")]

mod args;
mod flat;

use darling::{ast::NestedMeta, FromMeta};

/// A procedural macro for declaring SDK errors.
///
/// Currently only the `flat` error type is supported. A flat error exposes the name of the
/// variant it holds through the `FlatError` trait, so callers can branch on the kind of failure
/// without matching on the concrete error type.
///
/// ```
/// use vnconnector_error::prelude::*;
///
/// #[vnconnector_error(flat)]
/// #[derive(Debug, thiserror::Error)]
/// enum LookupError {
///     #[error("The record was not found")]
///     NotFound,
///     #[error("The server rejected the request: {0}")]
///     Rejected(String),
/// }
///
/// assert_eq!(LookupError::NotFound.error_variant(), "NotFound");
/// ```
#[proc_macro_attribute]
pub fn vnconnector_error(
    args: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(v) => v,
        Err(e) => {
            return proc_macro::TokenStream::from(darling::Error::from(e).write_errors());
        }
    };

    let args = match args::VnConnectorErrorArgs::from_list(&attr_args) {
        Ok(params) => params,
        Err(error) => {
            return proc_macro::TokenStream::from(error.write_errors());
        }
    };

    let input = syn::parse_macro_input!(item as syn::DeriveInput);
    match args.error_type {
        args::VnConnectorErrorType::Flat => flat::attribute::vnconnector_error_flat(&input),
    }
}

/// Derive the `FlatError` trait for an enum, mapping every variant to its name.
#[proc_macro_derive(FlatError)]
pub fn flat_error(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    flat::derive::flat_error(item)
}
