//! Errors that can occur when using this SDK

use std::fmt::Debug;

use reqwest::StatusCode;
use thiserror::Error;
use vnconnector_error::{vnconnector_error, ErrorCode};

/// Errors from performing network requests.
///
/// Any failure to obtain a well-formed response envelope is reported here: the request could not
/// be sent, it timed out, the server answered with a non-success HTTP status, or the body was not
/// valid JSON.
#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    ReqwestMiddleware(#[from] reqwest_middleware::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error("Received error message from server: [{}] {}", .status, .message)]
    ResponseContent { status: StatusCode, message: String },
}

impl ApiError {
    /// Returns true when the request did not complete before the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Reqwest(e) => e.is_timeout(),
            ApiError::ReqwestMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}

/// The server answered with a falsy `status` flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("The server rejected the request: [{code}] {message}")]
pub struct ServerRejectedError {
    /// Message provided by the server.
    pub message: String,
    /// Code provided by the server, `0` when absent.
    pub code: i64,
}

impl ErrorCode for ServerRejectedError {
    fn code(&self) -> i64 {
        self.code
    }
}

/// Missing required field.
#[derive(Debug, Error)]
#[error("The response received was missing a required field: {0}")]
pub struct MissingFieldError(pub &'static str);

/// This macro is used to require that a value is present or return an error otherwise.
/// It is equivalent to using `val.ok_or(Error::MissingFields)?`, but easier to use and
/// with a more descriptive error message.
/// Note that this macro will return early from the function if the value is not present.
#[macro_export]
macro_rules! require {
    ($val:expr) => {
        match $val {
            Some(val) => val,
            None => return Err($crate::MissingFieldError(stringify!($val)).into()),
        }
    };
}
