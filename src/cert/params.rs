use bon::Builder;
use time::Duration;
use time::OffsetDateTime;
use x509_cert::name::RdnSequence;

use crate::error::CertMintError;

/// Distinguished name of a certificate subject or issuer.
///
/// Immutable once constructed. For self-signed certificates the caller passes
/// the same name as subject and issuer; nothing in the crate assumes they
/// match.
#[derive(Clone, Debug, PartialEq, Eq, Builder, Default)]
pub struct DistinguishedName {
    pub common_name: String,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
}

impl DistinguishedName {
    /// Creates a name carrying only a common name, e.g. `CN=localhost`.
    pub fn from_common_name(common_name: impl Into<String>) -> Self {
        DistinguishedName {
            common_name: common_name.into(),
            ..Default::default()
        }
    }

    /// Converts the distinguished name to an X.509 RDN sequence.
    ///
    /// Only attributes that are actually set are emitted, so two names built
    /// from the same inputs always encode identically.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName, CertMintError> {
        use core::str::FromStr;
        let mut parts = vec![format!("CN={}", self.common_name)];
        if let Some(ou) = &self.organization_unit {
            parts.push(format!("OU={ou}"));
        }
        if let Some(o) = &self.organization {
            parts.push(format!("O={o}"));
        }
        if let Some(l) = &self.locality {
            parts.push(format!("L={l}"));
        }
        if let Some(st) = &self.state {
            parts.push(format!("ST={st}"));
        }
        if let Some(c) = &self.country {
            parts.push(format!("C={c}"));
        }
        RdnSequence::from_str(&parts.join(","))
            .map_err(|e| CertMintError::EncodingError(e.to_string()))
    }

    /// Creates a `DistinguishedName` from an X.509 RDN sequence.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Self {
        let mut name = DistinguishedName::default();

        for rdn in x509dn.0.iter() {
            for attr in rdn.0.iter() {
                // Attribute values may be UTF8String or PrintableString.
                let utf8 = attr.value.decode_as::<String>();
                let value = match utf8 {
                    Ok(s) => s,
                    Err(_) => match attr.value.decode_as::<der::asn1::PrintableStringRef>() {
                        Ok(s) => s.as_str().to_string(),
                        Err(_) => continue,
                    },
                };
                match attr.oid {
                    const_oid::db::rfc4519::CN => name.common_name = value,
                    const_oid::db::rfc4519::OU => name.organization_unit = Some(value),
                    const_oid::db::rfc4519::O => name.organization = Some(value),
                    const_oid::db::rfc4519::L => name.locality = Some(value),
                    const_oid::db::rfc4519::ST => name.state = Some(value),
                    const_oid::db::rfc4519::C => name.country = Some(value),
                    _ => {}
                }
            }
        }

        name
    }
}

/// Certificate validity period.
///
/// Invariant: `not_before < not_after`. The invariant is enforced when a TBS
/// certificate is built, so a `Validity` itself can hold any pair of
/// timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period starting now for the given number of days.
    pub fn for_days(days: i64) -> Self {
        // UTCTime encodes whole seconds only; truncate so the window
        // round-trips exactly through DER.
        let now = OffsetDateTime::now_utc()
            .replace_nanosecond(0)
            .unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            not_before: now,
            not_after: now + Duration::days(days),
        }
    }

    /// Checks the window invariant, failing with
    /// [`CertMintError::InvalidValidityWindow`] when `not_before` is not
    /// strictly earlier than `not_after`.
    pub fn ensure_well_formed(&self) -> Result<(), CertMintError> {
        if self.not_before >= self.not_after {
            return Err(CertMintError::InvalidValidityWindow {
                not_before: self.not_before,
                not_after: self.not_after,
            });
        }
        Ok(())
    }
}
