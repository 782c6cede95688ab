use thiserror::Error;
use vnconnector_error::{vnconnector_error, ErrorCode};

use crate::MissingFieldError;

/// Reading the session failed.
#[vnconnector_error(flat)]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No session has been established.
    #[error("The user is not logged in")]
    NotLoggedIn,
    /// The session exists but its expiry has passed.
    #[error("The user token has expired")]
    TokenExpired,
}

impl SessionError {
    /// Code of [SessionError::NotLoggedIn].
    pub const NOT_LOGGED_IN_CODE: i64 = 1000;
    /// Code of [SessionError::TokenExpired].
    pub const TOKEN_EXPIRED_CODE: i64 = 1001;
}

impl ErrorCode for SessionError {
    fn code(&self) -> i64 {
        match self {
            SessionError::NotLoggedIn => Self::NOT_LOGGED_IN_CODE,
            SessionError::TokenExpired => Self::TOKEN_EXPIRED_CODE,
        }
    }
}

/// The payload handed back by the SSO service could not be turned into a session.
#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum DecryptSessionError {
    #[error(transparent)]
    Crypto(#[from] vnconnector_crypto::CryptoError),
    #[error("The session payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("The session expiry offset {0} is out of range")]
    InvalidExpiry(i64),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}
