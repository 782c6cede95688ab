//! # Session cipher
//!
//! Camellia-256-CBC with PKCS#7 padding, keyed from a shared secret.
//!
//! The wire token is base64 applied twice: the cipher output is base64 encoded once by the cipher
//! layer and once more for transport. Key material is the ASCII hex digest of the secret, not the
//! raw digest bytes.

use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{CryptoError, EncodingError, Result};

type Camellia256CbcEnc = cbc::Encryptor<camellia::Camellia256>;
type Camellia256CbcDec = cbc::Decryptor<camellia::Camellia256>;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
/// Number of hex characters of the SHA-256 digest used as key material. The rest of the key is
/// zero filled.
const KEY_MATERIAL_LEN: usize = 24;

/// Deterministic symmetric cipher derived from a shared secret.
///
/// The same secret always derives the same key and IV, there is no random nonce.
pub struct SessionCipher {
    key: Zeroizing<[u8; KEY_LEN]>,
    iv: [u8; IV_LEN],
}

impl SessionCipher {
    /// Derive the key and IV from `secret`.
    pub fn from_secret(secret: &str) -> Self {
        let iv_hex = hex::encode(Sha1::digest(secret.as_bytes()));
        let key_hex = Zeroizing::new(hex::encode(Sha256::digest(secret.as_bytes())));

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&iv_hex.as_bytes()[..IV_LEN]);

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key[..KEY_MATERIAL_LEN].copy_from_slice(&key_hex.as_bytes()[..KEY_MATERIAL_LEN]);

        Self { key, iv }
    }

    /// Encrypt `plaintext` into a transport token.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Camellia256CbcEnc::new_from_slices(self.key.as_slice(), &self.iv)
            .map_err(|_| CryptoError::InvalidKey)?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(STANDARD.encode(STANDARD.encode(ciphertext)))
    }

    /// Decrypt a transport token produced by [SessionCipher::encrypt] or by the SSO service.
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let inner = STANDARD
            .decode(token.trim())
            .map_err(EncodingError::from)?;
        let ciphertext = STANDARD.decode(inner).map_err(EncodingError::from)?;

        let cipher = Camellia256CbcDec::new_from_slices(self.key.as_slice(), &self.iv)
            .map_err(|_| CryptoError::InvalidKey)?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CryptoError::InvalidPadding)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

impl std::fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCipher").finish_non_exhaustive()
    }
}

/// Encrypt `plaintext` with a cipher derived from `shared_secret`.
pub fn encrypt(plaintext: &str, shared_secret: &str) -> Result<String> {
    SessionCipher::from_secret(shared_secret).encrypt(plaintext)
}

/// Decrypt `token` with a cipher derived from `shared_secret`.
pub fn decrypt(token: &str, shared_secret: &str) -> Result<String> {
    SessionCipher::from_secret(shared_secret).decrypt(token)
}
