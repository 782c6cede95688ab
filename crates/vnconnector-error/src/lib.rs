#![doc = include_str!("../README.md")]

#[allow(missing_docs)]
pub mod flat_error;

pub use flat_error::FlatError;
pub use vnconnector_error_macro::{vnconnector_error, FlatError};

#[allow(missing_docs)]
pub mod prelude {
    pub use crate::{ErrorCode, FlatError, VnConnectorError};
    pub use vnconnector_error_macro::*;
}

/// Marker trait for errors declared with `#[vnconnector_error]`.
pub trait VnConnectorError: FlatError + ToString {}

/// Errors that map onto a numeric code, as reported by the remote services.
///
/// Codes returned by the server are passed through untouched. Locally raised failures use the
/// codes the services document for the operation (for example `9006` when a create request could
/// not be delivered).
pub trait ErrorCode {
    /// The numeric code of this error.
    fn code(&self) -> i64;
}
