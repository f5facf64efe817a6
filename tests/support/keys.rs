use std::io::Write;
use std::sync::OnceLock;

use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::NamedTempFile;

/// One 1024-bit key per test binary.
pub fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("generate key"))
}

pub fn public_key() -> RsaPublicKey {
    private_key().to_public_key()
}

pub fn pkcs8_pem() -> String {
    private_key()
        .to_pkcs8_pem(LineEnding::LF)
        .expect("encode pkcs8")
        .to_string()
}

/// PEM written to a temp file.
pub fn pem_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(pkcs8_pem().as_bytes()).expect("write key file");
    file
}
