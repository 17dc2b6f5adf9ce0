pub mod params;

use der::{Decode, Encode, EncodePem};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use x509_cert::certificate::CertificateInner;

use crate::error::CertMintError;
use crate::key::{KeyPair, PublicKey};
use crate::signer;
use crate::tbs_certificate::TbsCertificate;
use params::{DistinguishedName, Validity};

pub type Result<T> = std::result::Result<T, CertMintError>;

/// Represents the supported signature algorithms for certificates.
///
/// This enum provides a mapping to the corresponding OIDs for each algorithm.
/// Only SHA-256 with RSA (PKCS#1 v1.5) is currently implemented; it is also
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption (PKCS#1 v1.5 padding).
    #[default]
    Sha256WithRsa,
}

impl SignatureAlgorithm {
    /// Converts the algorithm into an X.509 AlgorithmIdentifier.
    ///
    /// RSA signature algorithm identifiers carry an explicit ASN.1 NULL
    /// parameter per RFC 3279; omitting it trips strict decoders.
    pub fn to_algorithm_identifier(self) -> x509_cert::spki::AlgorithmIdentifierOwned {
        match self {
            SignatureAlgorithm::Sha256WithRsa => x509_cert::spki::AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
                parameters: Some(der::AnyRef::NULL.into()),
            },
        }
    }

    /// Determines the algorithm from an X.509 AlgorithmIdentifier.
    pub fn from_algorithm_identifier(
        identifier: &x509_cert::spki::AlgorithmIdentifierOwned,
    ) -> Result<Self> {
        match identifier.oid {
            const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION => {
                Ok(SignatureAlgorithm::Sha256WithRsa)
            }
            oid => Err(CertMintError::UnsupportedAlgorithm(oid.to_string())),
        }
    }
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    fn from(value: SignatureAlgorithm) -> Self {
        value.to_algorithm_identifier()
    }
}

/// Digest algorithms used to fingerprint certificates.
///
/// SHA-1 matches the thumbprint indexing of legacy OS certificate stores;
/// SHA-256 is the default for new stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FingerprintAlgorithm {
    Sha1,
    #[default]
    Sha256,
}

/// A digest over a certificate's DER encoding, used as a store lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub algorithm: FingerprintAlgorithm,
    pub bytes: Vec<u8>,
}

impl Fingerprint {
    /// Computes the fingerprint of a DER-encoded certificate blob.
    ///
    /// The input is hashed as-is; it does not need to parse as a
    /// certificate. The same bytes always produce the same fingerprint.
    pub fn of_der(der: &[u8], algorithm: FingerprintAlgorithm) -> Self {
        let bytes = match algorithm {
            FingerprintAlgorithm::Sha1 => Sha1::digest(der).to_vec(),
            FingerprintAlgorithm::Sha256 => Sha256::digest(der).to_vec(),
        };
        Fingerprint { algorithm, bytes }
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.bytes))
    }
}

/// Represents an X.509 certificate.
///
/// Created once by the signer and immutable thereafter. The canonical DER
/// encoding from [`Certificate::to_der`] is the artifact a credential store
/// persists and retrieves.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Creates a new self-signed certificate.
    ///
    /// The issuer equals the subject, the serial number is freshly
    /// randomized, and the signature algorithm is the default
    /// SHA-256/RSA. This is the one-call form of
    /// [`TbsCertificate::build`] followed by [`signer::sign`].
    pub fn new_self_signed(
        subject: &DistinguishedName,
        validity: Validity,
        key: &KeyPair,
    ) -> Result<Self> {
        let tbs = TbsCertificate::build(
            subject.clone(),
            subject.clone(),
            validity,
            key.public_key(),
            SignatureAlgorithm::default(),
        )?;
        signer::sign(&tbs, key)
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| CertMintError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| CertMintError::EncodingError(e.to_string()))
    }

    /// Decodes a certificate from its DER encoding.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der)
            .map_err(|e| CertMintError::DecodingError(e.to_string()))?;
        Ok(Certificate { inner })
    }

    /// The subject distinguished name.
    pub fn subject(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.subject)
    }

    /// The issuer distinguished name.
    pub fn issuer(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.issuer)
    }

    /// The public key embedded in the certificate.
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_spki(&self.inner.tbs_certificate.subject_public_key_info)
    }

    /// Computes the fingerprint of this certificate's DER encoding.
    pub fn fingerprint(&self, algorithm: FingerprintAlgorithm) -> Result<Fingerprint> {
        Ok(Fingerprint::of_der(&self.to_der()?, algorithm))
    }

    /// Verifies the certificate's signature against its own embedded public
    /// key, the defining property of a self-signed certificate.
    ///
    /// Fails with [`CertMintError::SigningFailure`] when the signature does
    /// not verify.
    pub fn verify_self_signed(&self) -> Result<()> {
        let public_key = self.public_key()?;
        self.verify_signed_by(&public_key)
    }

    /// Verifies the certificate's signature against the given issuer key.
    pub fn verify_signed_by(&self, issuer_key: &PublicKey) -> Result<()> {
        let algorithm =
            SignatureAlgorithm::from_algorithm_identifier(&self.inner.signature_algorithm)?;
        let tbs_der = self.inner.tbs_certificate.to_der()?;
        let signature = self
            .inner
            .signature
            .as_bytes()
            .ok_or_else(|| CertMintError::DecodingError("signature has unused bits".to_string()))?;
        signer::verify(&tbs_der, issuer_key, signature, algorithm)
    }
}
