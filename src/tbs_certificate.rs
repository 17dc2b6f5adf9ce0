use der::Encode;
use rand_core::{OsRng, RngCore};
use x509_cert::Version;
use x509_cert::certificate::TbsCertificateInner;
use x509_cert::serial_number::SerialNumber;

use crate::cert::SignatureAlgorithm;
use crate::cert::params::{DistinguishedName, Validity};
use crate::error::CertMintError;
use crate::key::PublicKey;

type Result<T> = std::result::Result<T, CertMintError>;

/// Represents the "To Be Signed" (TBS) portion of an X.509 certificate.
///
/// Immutable once built. Its DER encoding from [`TbsCertificate::to_der`] is
/// the exact byte sequence the signer signs, and re-encoding the same fields
/// is byte-identical, so verifiers reproduce the signed input exactly.
pub struct TbsCertificate {
    /// Certificate serial number, as a minimal non-negative DER integer.
    pub serial_number: Vec<u8>,
    /// Algorithm the certificate will be signed with.
    pub signature_algorithm: SignatureAlgorithm,
    /// Certificate issuer distinguished name.
    pub issuer: DistinguishedName,
    /// Certificate validity window.
    pub validity: Validity,
    /// Certificate subject distinguished name.
    pub subject: DistinguishedName,
    /// Subject's public key.
    pub subject_public_key: PublicKey,
}

impl TbsCertificate {
    /// Assembles a TBS certificate from its parts.
    ///
    /// Subject and issuer are accepted independently; passing the same name
    /// for both yields the self-signed form. The serial number is freshly
    /// drawn from [`random_serial`]. Fails with
    /// [`CertMintError::InvalidValidityWindow`] when `validity.not_before`
    /// is not strictly earlier than `validity.not_after`.
    pub fn build(
        subject: DistinguishedName,
        issuer: DistinguishedName,
        validity: Validity,
        subject_public_key: PublicKey,
        signature_algorithm: SignatureAlgorithm,
    ) -> Result<Self> {
        validity.ensure_well_formed()?;

        Ok(Self {
            serial_number: random_serial(),
            signature_algorithm,
            issuer,
            validity,
            subject,
            subject_public_key,
        })
    }

    /// Converts the `TbsCertificate` into a `TbsCertificateInner` for DER
    /// encoding.
    pub fn to_tbs_certificate_inner(&self) -> Result<TbsCertificateInner> {
        let algorithm_id: x509_cert::spki::AlgorithmIdentifierOwned =
            self.signature_algorithm.into();

        let validity = x509_cert::time::Validity {
            not_before: to_x509_time(self.validity.not_before)?,
            not_after: to_x509_time(self.validity.not_after)?,
        };

        let serial_number = SerialNumber::new(self.serial_number.as_slice())
            .map_err(|e| CertMintError::EncodingError(e.to_string()))?;

        let subject_public_key_info = self.subject_public_key.to_spki()?;

        Ok(TbsCertificateInner {
            version: Version::V3,
            serial_number,
            signature: algorithm_id,
            issuer: self.issuer.as_x509_name()?,
            validity,
            subject: self.subject.as_x509_name()?,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        })
    }

    /// Creates a `TbsCertificate` from a decoded `TbsCertificateInner`.
    pub fn from_tbs_certificate_inner(inner: TbsCertificateInner) -> Result<Self> {
        let issuer = DistinguishedName::from_x509_name(&inner.issuer);
        let subject = DistinguishedName::from_x509_name(&inner.subject);
        let subject_public_key = PublicKey::from_spki(&inner.subject_public_key_info)?;
        let signature_algorithm = SignatureAlgorithm::from_algorithm_identifier(&inner.signature)?;

        let validity = Validity {
            not_before: from_x509_time(inner.validity.not_before),
            not_after: from_x509_time(inner.validity.not_after),
        };

        Ok(Self {
            serial_number: inner.serial_number.as_bytes().into(),
            signature_algorithm,
            issuer,
            validity,
            subject,
            subject_public_key,
        })
    }

    /// Encodes the `TbsCertificate` into DER format.
    ///
    /// This is the canonical signing input: identical fields always encode
    /// to identical bytes.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_tbs_certificate_inner()?.to_der()?)
    }
}

/// Draws a 128-bit serial number from the operating system CSPRNG.
///
/// Serial numbers must be unique per issuance and non-predictable; 128 random
/// bits cover both. The raw bytes are normalized with [`normalize_serial`].
pub fn random_serial() -> Vec<u8> {
    let mut raw = [0u8; 16];
    OsRng.fill_bytes(&mut raw);
    normalize_serial(&raw)
}

/// Normalizes raw bytes into a minimal, non-negative DER integer encoding.
///
/// Leading zero bytes are stripped, and a single zero byte is prepended when
/// the high bit of the first remaining byte is set, preserving the
/// non-negative invariant of the ASN.1 INTEGER encoding.
pub fn normalize_serial(raw: &[u8]) -> Vec<u8> {
    let stripped: &[u8] = {
        let first_nonzero = raw.iter().position(|&b| b != 0);
        match first_nonzero {
            Some(idx) => &raw[idx..],
            None => return vec![0],
        }
    };

    let mut serial = Vec::with_capacity(stripped.len() + 1);
    if stripped[0] & 0x80 != 0 {
        serial.push(0);
    }
    serial.extend_from_slice(stripped);
    serial
}

fn to_x509_time(timestamp: time::OffsetDateTime) -> Result<x509_cert::time::Time> {
    let system_time: std::time::SystemTime = timestamp.into();

    // RFC 5280 4.1.2.5: dates through 2049 use UTCTime, later ones
    // GeneralizedTime.
    if timestamp.year() < 2050 {
        let utc = der::asn1::UtcTime::from_system_time(system_time)
            .map_err(|e| CertMintError::EncodingError(e.to_string()))?;
        Ok(x509_cert::time::Time::UtcTime(utc))
    } else {
        let unix = system_time
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| CertMintError::EncodingError(e.to_string()))?;
        let general = der::asn1::GeneralizedTime::from_unix_duration(unix)
            .map_err(|e| CertMintError::EncodingError(e.to_string()))?;
        Ok(x509_cert::time::Time::GeneralTime(general))
    }
}

fn from_x509_time(x509_time: x509_cert::time::Time) -> time::OffsetDateTime {
    match x509_time {
        x509_cert::time::Time::UtcTime(ut) => time::OffsetDateTime::from(ut.to_system_time()),
        x509_cert::time::Time::GeneralTime(gt) => time::OffsetDateTime::from(gt.to_system_time()),
    }
}
