mod util;

use certmint::cert::{Certificate, SignatureAlgorithm};
use certmint::cert::params::{DistinguishedName, Validity};
use certmint::error::CertMintError;
use certmint::key::{KeyAlgorithm, KeyPair};
use certmint::signer;
use certmint::tbs_certificate::TbsCertificate;
use time::macros::datetime;

#[test]
fn generate_rejects_undersized_keys() {
    for bits in [512, 1024, 2047] {
        match KeyPair::generate(KeyAlgorithm::Rsa, bits) {
            Err(CertMintError::InvalidKeySize(rejected)) => assert_eq!(rejected, bits),
            Err(other) => panic!("expected InvalidKeySize for {bits} bits, got {other:?}"),
            Ok(_) => panic!("expected InvalidKeySize for {bits} bits, got a key pair"),
        }
    }
}

#[test]
fn generate_accepts_2048_bits() {
    let key_pair = KeyPair::generate(KeyAlgorithm::Rsa, 2048).expect("2048 bits is supported");
    assert_eq!(key_pair.algorithm(), KeyAlgorithm::Rsa);
}

#[test]
fn build_rejects_inverted_validity_window() {
    let key_pair = util::test_key();
    let name = DistinguishedName::from_common_name("invalid.window");

    for not_before in [
        datetime!(2026-01-01 00:00:00 UTC),
        datetime!(2030-06-15 12:34:56 UTC),
    ] {
        // Equal endpoints and reversed endpoints must both fail.
        for not_after in [not_before, not_before - time::Duration::seconds(1)] {
            let validity = Validity {
                not_before,
                not_after,
            };
            let result = TbsCertificate::build(
                name.clone(),
                name.clone(),
                validity,
                key_pair.public_key(),
                SignatureAlgorithm::Sha256WithRsa,
            );
            assert!(matches!(
                result,
                Err(CertMintError::InvalidValidityWindow { .. })
            ));
        }
    }
}

#[test]
fn tbs_encoding_is_deterministic_up_to_serial() {
    let key_pair = util::test_key();
    let name = DistinguishedName::builder()
        .common_name("determinism.test".to_string())
        .organization("CertMint".to_string())
        .build();
    let validity = Validity {
        not_before: datetime!(2026-01-01 00:00:00 UTC),
        not_after: datetime!(2027-01-01 00:00:00 UTC),
    };

    let first = TbsCertificate::build(
        name.clone(),
        name.clone(),
        validity.clone(),
        key_pair.public_key(),
        SignatureAlgorithm::Sha256WithRsa,
    )
    .unwrap();
    let mut second = TbsCertificate::build(
        name,
        first.issuer.clone(),
        validity,
        key_pair.public_key(),
        SignatureAlgorithm::Sha256WithRsa,
    )
    .unwrap();

    // With different serials, every other encoded field matches.
    let first_inner = first.to_tbs_certificate_inner().unwrap();
    let second_inner = second.to_tbs_certificate_inner().unwrap();
    assert_eq!(first_inner.issuer, second_inner.issuer);
    assert_eq!(first_inner.subject, second_inner.subject);
    assert_eq!(first_inner.validity, second_inner.validity);
    assert_eq!(
        first_inner.subject_public_key_info,
        second_inner.subject_public_key_info
    );
    assert_eq!(first_inner.signature, second_inner.signature);

    // With identical serials, the encodings are byte-identical.
    second.serial_number = first.serial_number.clone();
    assert_eq!(first.to_der().unwrap(), second.to_der().unwrap());
}

#[test]
fn signed_certificate_verifies_against_embedded_key() {
    let (cert, _key) = util::generate_self_signed("roundtrip.test", 365);
    cert.verify_self_signed()
        .expect("signature must verify against the embedded public key");
}

#[test]
fn tampered_certificate_fails_verification() {
    let key_pair = util::test_key();
    let name = DistinguishedName::from_common_name("tamper.test");
    let tbs = TbsCertificate::build(
        name.clone(),
        name,
        Validity::for_days(30),
        key_pair.public_key(),
        SignatureAlgorithm::Sha256WithRsa,
    )
    .unwrap();
    let cert = signer::sign(&tbs, &key_pair).unwrap();

    // Re-sign a different TBS and graft its signature onto this one.
    let other_name = DistinguishedName::from_common_name("someone.else");
    let other_tbs = TbsCertificate::build(
        other_name.clone(),
        other_name,
        Validity::for_days(30),
        key_pair.public_key(),
        SignatureAlgorithm::Sha256WithRsa,
    )
    .unwrap();
    let other_cert = signer::sign(&other_tbs, &key_pair).unwrap();

    let mut forged = cert.clone();
    forged.inner.signature = other_cert.inner.signature;
    assert!(matches!(
        forged.verify_self_signed(),
        Err(CertMintError::SigningFailure(_))
    ));
}

#[test]
fn end_to_end_issuance() {
    let key_pair = util::test_key();
    let subject = DistinguishedName::from_common_name("Test");
    let validity = Validity {
        not_before: datetime!(2026-01-01 00:00:00 UTC),
        not_after: datetime!(2026-01-01 00:00:00 UTC) + time::Duration::days(3650),
    };

    let cert = Certificate::new_self_signed(&subject, validity, &key_pair).unwrap();
    let der = cert.to_der().unwrap();

    // The DER must decode with a standard X.509 decoder.
    let decoded = Certificate::from_der(&der).unwrap();
    assert_eq!(decoded.subject().common_name, "Test");
    assert_eq!(decoded.subject(), decoded.issuer(), "self-signed: subject == issuer");

    let tbs = TbsCertificate::from_tbs_certificate_inner(decoded.inner.tbs_certificate.clone())
        .unwrap();
    assert_eq!(
        tbs.validity.not_after - tbs.validity.not_before,
        time::Duration::days(3650)
    );

    decoded.verify_self_signed().unwrap();

    // Decoding re-encodes to the exact bytes that were signed.
    assert_eq!(decoded.to_der().unwrap(), der);
}

#[test]
fn unknown_signature_oid_is_unsupported() {
    let identifier = x509_cert::spki::AlgorithmIdentifierOwned {
        oid: const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
        parameters: None,
    };
    assert!(matches!(
        SignatureAlgorithm::from_algorithm_identifier(&identifier),
        Err(CertMintError::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn signing_with_mismatched_key_fails() {
    // A key below the PKCS#1 v1.5 + SHA-256 floor is rejected before the
    // primitive runs. Build one by hand since generate() refuses small
    // sizes.
    let mut rng = rand_core::OsRng;
    let private = rsa::RsaPrivateKey::new(&mut rng, 256).unwrap();
    let public = rsa::RsaPublicKey::from(&private);
    let small_key = KeyPair::Rsa {
        private: Box::new(private),
        public,
    };

    let name = DistinguishedName::from_common_name("too.small");
    let tbs = TbsCertificate::build(
        name.clone(),
        name,
        Validity::for_days(30),
        small_key.public_key(),
        SignatureAlgorithm::Sha256WithRsa,
    )
    .unwrap();

    assert!(matches!(
        signer::sign(&tbs, &small_key),
        Err(CertMintError::SigningFailure(_))
    ));
}
