#![doc = include_str!("../README.md")]

mod error;
pub use error::{CryptoError, EncodingError};
mod session_cipher;
pub use session_cipher::{decrypt, encrypt, SessionCipher};

pub(crate) type Result<T, E = CryptoError> = std::result::Result<T, E>;
