use thiserror::Error;
use vnconnector_error::vnconnector_error;

#[allow(missing_docs)]
#[vnconnector_error(flat)]
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("The provided key is not valid for the cipher")]
    InvalidKey,
    #[error("The ciphertext could not be decrypted, the padding is invalid")]
    InvalidPadding,
    #[error("The decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("Encoding error, {0}")]
    Encoding(#[from] EncodingError),
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Invalid base64 encoding, {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
