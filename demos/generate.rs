use certmint::cert::{Certificate, params::{DistinguishedName, Validity}};
use certmint::error::CertMintError;
use certmint::key::{DEFAULT_RSA_KEY_SIZE, KeyAlgorithm, KeyPair};
use certmint::store::{CredentialStore, MemoryStore, StoreConfig};

fn main() -> Result<(), CertMintError> {
    // Generate the default 4096-bit RSA key; this can take a few seconds.
    let key_pair = KeyPair::generate(KeyAlgorithm::Rsa, DEFAULT_RSA_KEY_SIZE)?;

    let subject = DistinguishedName::from_common_name("Test Certificate with RSA Private Key");
    let certificate = Certificate::new_self_signed(&subject, Validity::for_days(3650), &key_pair)?;

    let mut store = MemoryStore::new(StoreConfig::default());
    let private_key = key_pair.to_pkcs8_der()?;
    let handle = store.insert(&certificate.to_der()?, private_key.as_bytes())?;

    println!("This is the certificate that was stored:");
    println!("  Name: CN={}", certificate.subject().common_name);
    println!("  Fingerprint: {}", handle.fingerprint());

    let retrieved = store.find_by_fingerprint(handle.fingerprint())?;
    let retrieved_cert = retrieved.certificate()?;

    println!("This is the certificate retrieved from the same store, it should be equal to the one above:");
    println!("  Name: CN={}", retrieved_cert.subject().common_name);
    println!(
        "  Fingerprint: {}",
        retrieved_cert.fingerprint(store.config().fingerprint_algorithm)?
    );
    println!("  HasPrivateKey: {}", retrieved.has_private_key());

    Ok(())
}
