use pkcs8::SecretDocument;
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePrivateKey, EncodePrivateKey},
};

use crate::error::CertMintError;

type Result<T> = std::result::Result<T, CertMintError>;

/// RSA key sizes accepted by [`KeyPair::generate`].
pub const SUPPORTED_RSA_KEY_SIZES: [usize; 3] = [2048, 3072, 4096];

/// Default RSA modulus size in bits.
pub const DEFAULT_RSA_KEY_SIZE: usize = 4096;

/// Asymmetric key algorithms supported for certificate operations.
///
/// Only RSA is currently implemented; the enum exists so additional
/// algorithms can be added without changing call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
}

/// An asymmetric key pair used to sign certificates.
///
/// The private half is sensitive: it is never logged or cached by this crate,
/// and the underlying [`RsaPrivateKey`] zeroizes its material on drop.
pub enum KeyPair {
    Rsa {
        private: Box<RsaPrivateKey>,
        public: RsaPublicKey,
    },
}

impl KeyPair {
    /// Generate a key pair of the given algorithm and size.
    ///
    /// Fails with [`CertMintError::InvalidKeySize`] unless `bits` is one of
    /// [`SUPPORTED_RSA_KEY_SIZES`]. Entropy comes from the operating system's
    /// CSPRNG; the call may block briefly under entropy starvation, which is
    /// a normal delay rather than a failure.
    pub fn generate(algorithm: KeyAlgorithm, bits: usize) -> Result<Self> {
        match algorithm {
            KeyAlgorithm::Rsa => Self::generate_rsa(bits),
        }
    }

    /// Generate an RSA key pair with the specified number of modulus bits.
    ///
    /// Generation time grows quickly with the key size; a 4096-bit key can
    /// take multiple seconds.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        if !SUPPORTED_RSA_KEY_SIZES.contains(&bits) {
            return Err(CertMintError::InvalidKeySize(bits));
        }
        let mut rng = rand_core::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| CertMintError::SigningFailure(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair::Rsa {
            private: Box::new(private),
            public,
        })
    }

    /// The algorithm this key pair belongs to.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            KeyPair::Rsa { .. } => KeyAlgorithm::Rsa,
        }
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyPair::Rsa { public, .. } => PublicKey::Rsa(public.clone()),
        }
    }

    /// Export the private key as a DER-encoded PKCS#8 document.
    ///
    /// The returned [`SecretDocument`] zeroizes its buffer on drop; callers
    /// handing the bytes to a credential store should scope the document
    /// tightly.
    pub fn to_pkcs8_der(&self) -> Result<SecretDocument> {
        match self {
            KeyPair::Rsa { private, .. } => Ok(private.to_pkcs8_der()?),
        }
    }

    /// Import a key pair from a DER-encoded PKCS#8 private key.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| CertMintError::DecodingError(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair::Rsa {
            private: Box::new(private),
            public,
        })
    }
}

/// The public half of a [`KeyPair`], as embedded in a certificate.
#[derive(Debug, Clone)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
}

impl PublicKey {
    /// Extracts the public key from a key pair.
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        key_pair.public_key()
    }

    /// Converts the public key into an X.509 SubjectPublicKeyInfo structure.
    pub fn to_spki(&self) -> Result<x509_cert::spki::SubjectPublicKeyInfoOwned> {
        match self {
            PublicKey::Rsa(public) => {
                Ok(x509_cert::spki::SubjectPublicKeyInfoOwned::from_key(
                    public.clone(),
                )?)
            }
        }
    }

    /// Reads a public key back out of an X.509 SubjectPublicKeyInfo structure.
    ///
    /// Fails with [`CertMintError::UnsupportedAlgorithm`] for key types other
    /// than RSA and with [`CertMintError::DecodingError`] for corrupt key
    /// bytes.
    pub fn from_spki(spki: &x509_cert::spki::SubjectPublicKeyInfoOwned) -> Result<Self> {
        if spki.algorithm.oid != const_oid::db::rfc5912::RSA_ENCRYPTION {
            return Err(CertMintError::UnsupportedAlgorithm(
                spki.algorithm.oid.to_string(),
            ));
        }
        use rsa::pkcs1::DecodeRsaPublicKey;
        let key_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| CertMintError::DecodingError("public key has unused bits".to_string()))?;
        let public = RsaPublicKey::from_pkcs1_der(key_bytes)
            .map_err(|e| CertMintError::DecodingError(e.to_string()))?;
        Ok(PublicKey::Rsa(public))
    }
}
