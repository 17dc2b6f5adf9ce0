use std::sync::OnceLock;

use certmint::cert::{Certificate, params::{DistinguishedName, Validity}};
use certmint::key::KeyPair;

static TEST_KEY_DER: OnceLock<Vec<u8>> = OnceLock::new();

/// A shared 2048-bit RSA key, generated once per test binary. Exercising
/// issuance does not need a fresh key per test, and RSA generation dominates
/// test time otherwise.
#[allow(dead_code)]
pub fn test_key() -> KeyPair {
    let der = TEST_KEY_DER.get_or_init(|| {
        KeyPair::generate_rsa(2048)
            .expect("2048-bit RSA generation must succeed")
            .to_pkcs8_der()
            .expect("PKCS#8 export must succeed")
            .as_bytes()
            .to_vec()
    });
    KeyPair::from_pkcs8_der(der).expect("PKCS#8 import must succeed")
}

/// Issues a self-signed certificate for the given common name with a
/// freshly generated 2048-bit RSA key.
#[allow(dead_code)]
pub fn generate_self_signed(common_name: &str, days: i64) -> (Certificate, KeyPair) {
    let key_pair = KeyPair::generate_rsa(2048).expect("2048-bit RSA generation must succeed");
    let subject = DistinguishedName::from_common_name(common_name);
    let cert = Certificate::new_self_signed(&subject, Validity::for_days(days), &key_pair)
        .expect("self-signed issuance must succeed");
    (cert, key_pair)
}
