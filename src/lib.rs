//! # CertMint - Self-Signed Certificate Issuance
//!
//! CertMint is a small certificate-issuance library built entirely with
//! rustcrypto libraries, with no dependencies on ring or openssl. It
//! generates RSA key pairs, assembles X.509v3 TBS certificates, signs them
//! with SHA-256/PKCS#1 v1.5, and hands the resulting DER blobs to a
//! fingerprint-indexed credential store.
//!
//! The three core operations are pure functions over their inputs plus an
//! OS random source: there is no shared state, no cache, and no multi-step
//! protocol, so concurrent calls from different threads are independent.
//!
//! ## Quick Start
//!
//! ### Generating a Self-Signed Certificate
//!
//! ```rust,no_run
//! use certmint::{
//!     cert::{Certificate, params::{DistinguishedName, Validity}},
//!     key::{KeyAlgorithm, KeyPair},
//! };
//!
//! # fn main() -> Result<(), certmint::error::CertMintError> {
//! // Generate an RSA key pair
//! let key_pair = KeyPair::generate(KeyAlgorithm::Rsa, 2048)?;
//!
//! // Describe the subject; for a self-signed certificate the issuer is the
//! // same name
//! let subject = DistinguishedName::builder()
//!     .common_name("example.com".to_string())
//!     .organization("Example Corp".to_string())
//!     .country("US".to_string())
//!     .build();
//!
//! // Issue the certificate, valid for ten years
//! let certificate = Certificate::new_self_signed(&subject, Validity::for_days(3650), &key_pair)?;
//!
//! // Export to PEM format
//! let pem_cert = certificate.to_pem()?;
//! println!("Certificate:\n{}", pem_cert);
//! # Ok(())
//! # }
//! ```
//!
//! ### Building and Signing Separately
//!
//! The one-call form above composes the builder and the signer. They can be
//! driven independently, e.g. to control the validity window and issuer
//! name explicitly:
//!
//! ```rust,no_run
//! use certmint::{
//!     cert::{SignatureAlgorithm, params::{DistinguishedName, Validity}},
//!     key::KeyPair,
//!     signer,
//!     tbs_certificate::TbsCertificate,
//! };
//!
//! # fn main() -> Result<(), certmint::error::CertMintError> {
//! let key_pair = KeyPair::generate_rsa(2048)?;
//! let name = DistinguishedName::from_common_name("localhost");
//!
//! let tbs = TbsCertificate::build(
//!     name.clone(),
//!     name, // issuer == subject: self-signed
//!     Validity::for_days(365),
//!     key_pair.public_key(),
//!     SignatureAlgorithm::Sha256WithRsa,
//! )?;
//!
//! let certificate = signer::sign(&tbs, &key_pair)?;
//! certificate.verify_self_signed()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Persisting and Retrieving by Fingerprint
//!
//! ```rust,no_run
//! use certmint::{
//!     cert::{Certificate, params::{DistinguishedName, Validity}},
//!     key::{DEFAULT_RSA_KEY_SIZE, KeyAlgorithm, KeyPair},
//!     store::{CredentialStore, MemoryStore, StoreConfig},
//! };
//!
//! # fn main() -> Result<(), certmint::error::CertMintError> {
//! let key_pair = KeyPair::generate(KeyAlgorithm::Rsa, DEFAULT_RSA_KEY_SIZE)?;
//! let subject = DistinguishedName::from_common_name("localhost");
//! let certificate = Certificate::new_self_signed(&subject, Validity::for_days(3650), &key_pair)?;
//!
//! let mut store = MemoryStore::new(StoreConfig::default());
//! let private_key = key_pair.to_pkcs8_der()?;
//! let handle = store.insert(&certificate.to_der()?, private_key.as_bytes())?;
//!
//! let retrieved = store.find_by_fingerprint(handle.fingerprint())?;
//! assert!(retrieved.has_private_key());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All failures surface as [`error::CertMintError`] kinds and are terminal
//! for the call that raised them:
//!
//! ```rust
//! use certmint::{error::CertMintError, key::{KeyAlgorithm, KeyPair}};
//!
//! match KeyPair::generate(KeyAlgorithm::Rsa, 512) {
//!     Err(CertMintError::InvalidKeySize(bits)) => println!("{} bits rejected", bits),
//!     Err(e) => println!("Other error: {}", e),
//!     Ok(_) => unreachable!("512-bit keys are below the supported minimum"),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`key`]: Key pair generation and import/export
//! - [`tbs_certificate`]: TBS certificate assembly and canonical encoding
//! - [`signer`]: Signing and signature verification
//! - [`cert`]: Certificate encoding/decoding and fingerprints
//! - [`store`]: Credential store interface and in-memory double
//! - [`error`]: Error types

pub mod cert;
pub mod error;
pub mod key;
pub mod signer;
pub mod store;
pub mod tbs_certificate;
