//! Signing of TBS certificates and assembly of the final certificate.
//!
//! Signing is a single pure step: digest the canonical TBS encoding, apply
//! the private-key transform with the declared padding, and wrap TBS +
//! algorithm identifier + signature bits into the outer certificate
//! SEQUENCE. Failures are not transient and are surfaced immediately; there
//! is no retry logic.

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use sha2::Sha256;
use x509_cert::certificate::CertificateInner;

use crate::cert::{Certificate, SignatureAlgorithm};
use crate::error::CertMintError;
use crate::key::{KeyPair, PublicKey};
use crate::tbs_certificate::TbsCertificate;

type Result<T> = std::result::Result<T, CertMintError>;

// PKCS#1 v1.5 with SHA-256 needs EMSA headroom beyond the 51-byte
// DigestInfo; anything smaller cannot carry the padding.
const MIN_RSA_MODULUS_BYTES: usize = 62;

/// Signs the TBS certificate with the given key and assembles the final
/// certificate.
///
/// The signature covers exactly the bytes of [`TbsCertificate::to_der`].
/// Fails with [`CertMintError::SigningFailure`] when the key does not match
/// the TBS certificate's declared signature algorithm or is too small for
/// the padding scheme.
pub fn sign(tbs: &TbsCertificate, key: &KeyPair) -> Result<Certificate> {
    let tbs_inner = tbs.to_tbs_certificate_inner()?;
    let tbs_der = der::Encode::to_der(&tbs_inner)?;

    let signature = sign_data(&tbs_der, key, tbs.signature_algorithm)?;

    let cert_inner = CertificateInner {
        tbs_certificate: tbs_inner,
        signature_algorithm: tbs.signature_algorithm.into(),
        signature: der::asn1::BitString::from_bytes(&signature)
            .map_err(|e| CertMintError::EncodingError(e.to_string()))?,
    };

    Ok(Certificate { inner: cert_inner })
}

/// Signs raw bytes with the given key using the declared algorithm.
pub fn sign_data(
    data: &[u8],
    key: &KeyPair,
    algorithm: SignatureAlgorithm,
) -> Result<Vec<u8>> {
    match (key, algorithm) {
        (KeyPair::Rsa { private, .. }, SignatureAlgorithm::Sha256WithRsa) => {
            if private.size() < MIN_RSA_MODULUS_BYTES {
                return Err(CertMintError::SigningFailure(format!(
                    "RSA key of {} bytes is too small for PKCS#1 v1.5 with SHA-256",
                    private.size()
                )));
            }
            let signing_key: SigningKey<Sha256> = SigningKey::new((**private).clone());
            let signature = signing_key
                .try_sign(data)
                .map_err(|e| CertMintError::SigningFailure(e.to_string()))?;
            Ok(signature.to_vec())
        }
    }
}

/// Verifies a signature over raw bytes against a public key.
///
/// Fails with [`CertMintError::SigningFailure`] when the signature does not
/// verify under the declared algorithm.
pub fn verify(
    data: &[u8],
    public_key: &PublicKey,
    signature: &[u8],
    algorithm: SignatureAlgorithm,
) -> Result<()> {
    match (public_key, algorithm) {
        (PublicKey::Rsa(public), SignatureAlgorithm::Sha256WithRsa) => {
            let verifying_key: VerifyingKey<Sha256> = VerifyingKey::new(public.clone());
            let signature = Signature::try_from(signature)
                .map_err(|e| CertMintError::DecodingError(e.to_string()))?;
            verifying_key
                .verify(data, &signature)
                .map_err(|e| CertMintError::SigningFailure(e.to_string()))
        }
    }
}
