//! Request authentication for venues that require signed headers.

pub mod key;
pub mod signer;

pub use key::{Credential, KeySource};
pub use signer::{HeaderNames, RequestSigner, SignatureScheme, SignedRequestHeaders};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::OnceLock;

    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::RsaPrivateKey;

    /// A 1024-bit key shared by every test in the crate. Generated once.
    pub fn private_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), 1024).expect("generate key"))
    }

    pub fn pkcs8_pem() -> String {
        private_key().to_pkcs8_pem(LineEnding::LF).expect("encode pkcs8").to_string()
    }

    pub fn pkcs1_pem() -> String {
        private_key().to_pkcs1_pem(LineEnding::LF).expect("encode pkcs1").to_string()
    }
}
