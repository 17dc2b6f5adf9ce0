//! use certmint::error::CertMintError;

use thiserror::Error;

/// Represents errors that can occur in the certmint library.
///
/// Every failure is terminal for the call that raised it; nothing is retried
/// internally. Callers distinguish "not present" (`NotFound`) from store
/// failures (`StoreWriteError`).
#[derive(Debug, Error, Clone)]
pub enum CertMintError {
    /// Requested key or signature algorithm is not implemented.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key size below the safe minimum or not accepted by the backend.
    #[error("Invalid key size: {0} bits (supported RSA sizes: 2048, 3072, 4096)")]
    InvalidKeySize(usize),

    /// Certificate validity window where notBefore is not earlier than notAfter.
    #[error(
        "Invalid validity window: notBefore {not_before} is not earlier than notAfter {not_after}"
    )]
    InvalidValidityWindow {
        not_before: time::OffsetDateTime,
        not_after: time::OffsetDateTime,
    },

    /// Key/algorithm mismatch, or the underlying crypto primitive rejected the
    /// operation. Also raised when a signature fails to verify.
    #[error("Signing failure: {0}")]
    SigningFailure(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// The credential store rejected a write.
    #[error("Credential store write failed: {0}")]
    StoreWriteError(String),

    /// No certificate with the given fingerprint exists in the store.
    #[error("No certificate found for fingerprint {0}")]
    NotFound(String),
}

impl From<der::Error> for CertMintError {
    fn from(err: der::Error) -> Self {
        CertMintError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for CertMintError {
    fn from(err: pkcs8::Error) -> Self {
        CertMintError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for CertMintError {
    fn from(err: pkcs8::spki::Error) -> Self {
        CertMintError::EncodingError(err.to_string())
    }
}
