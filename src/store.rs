//! Credential store boundary.
//!
//! The store is an external collaborator: an opaque persistence facility
//! indexed by certificate fingerprint, holding a DER certificate blob with
//! its private key attached. The core only crosses this boundary with byte
//! blobs and fingerprints; it knows nothing about whether the backend is
//! file-backed, OS-keychain-backed, or HSM-backed.
//!
//! [`MemoryStore`] is the in-memory double used by unit tests and the demo.

use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::cert::{Certificate, Fingerprint, FingerprintAlgorithm};
use crate::error::CertMintError;

type Result<T> = std::result::Result<T, CertMintError>;

/// Store location, mirroring the per-user/per-machine split of OS
/// certificate stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreLocation {
    #[default]
    CurrentUser,
    LocalMachine,
}

/// Configuration handed to a store at construction time.
///
/// There are no process-wide store defaults; every store instance is told
/// explicitly which logical store it represents and which digest its index
/// uses. [`StoreConfig::default`] matches the conventional personal store of
/// the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Logical store name, e.g. `My` for the personal store.
    pub name: String,
    pub location: StoreLocation,
    /// Digest the store indexes certificates by. Lookup fingerprints must be
    /// computed with the same algorithm.
    pub fingerprint_algorithm: FingerprintAlgorithm,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "My".to_string(),
            location: StoreLocation::default(),
            fingerprint_algorithm: FingerprintAlgorithm::default(),
        }
    }
}

/// Handle returned by a successful insert, carrying the fingerprint the
/// store filed the certificate under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHandle {
    fingerprint: Fingerprint,
}

impl StoreHandle {
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

/// A certificate retrieved from a store, with its private key blob if one
/// was attached at insert time.
pub struct StoredCredential {
    pub certificate_der: Vec<u8>,
    /// DER-encoded PKCS#8 private key. Zeroized on drop.
    pub private_key_der: Option<Zeroizing<Vec<u8>>>,
}

impl StoredCredential {
    /// Decodes the stored certificate blob.
    pub fn certificate(&self) -> Result<Certificate> {
        Certificate::from_der(&self.certificate_der)
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key_der.is_some()
    }
}

/// An opaque key/value persistence facility for certificates, keyed by
/// fingerprint.
pub trait CredentialStore {
    /// Persists a DER-encoded certificate with its private key attached,
    /// returning a handle carrying the fingerprint it was filed under.
    ///
    /// Fails with [`CertMintError::StoreWriteError`] when the backend
    /// rejects the write.
    fn insert(&mut self, certificate_der: &[u8], private_key_der: &[u8]) -> Result<StoreHandle>;

    /// Looks up a certificate by fingerprint.
    ///
    /// Absence is the distinct [`CertMintError::NotFound`] kind, not a
    /// generic failure, so callers can tell "not present" from "store
    /// unreachable".
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<StoredCredential>;
}

struct MemoryEntry {
    certificate_der: Vec<u8>,
    private_key_der: Zeroizing<Vec<u8>>,
}

/// In-memory credential store.
///
/// Behaves like the OS store for the two operations the core needs: inserts
/// validate that the blob parses as a certificate, and lookups are keyed by
/// the configured fingerprint digest. Private key blobs are zeroized when
/// the store drops.
pub struct MemoryStore {
    config: StoreConfig,
    entries: HashMap<Fingerprint, MemoryEntry>,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn insert(&mut self, certificate_der: &[u8], private_key_der: &[u8]) -> Result<StoreHandle> {
        // Reject blobs the OS store would refuse to file.
        Certificate::from_der(certificate_der)
            .map_err(|e| CertMintError::StoreWriteError(e.to_string()))?;

        let fingerprint = Fingerprint::of_der(certificate_der, self.config.fingerprint_algorithm);
        self.entries.insert(
            fingerprint.clone(),
            MemoryEntry {
                certificate_der: certificate_der.to_vec(),
                private_key_der: Zeroizing::new(private_key_der.to_vec()),
            },
        );

        Ok(StoreHandle { fingerprint })
    }

    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<StoredCredential> {
        let entry = self
            .entries
            .get(fingerprint)
            .ok_or_else(|| CertMintError::NotFound(fingerprint.to_string()))?;

        Ok(StoredCredential {
            certificate_der: entry.certificate_der.clone(),
            private_key_der: Some(Zeroizing::new(entry.private_key_der.to_vec())),
        })
    }
}
