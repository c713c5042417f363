//! `client_ed25519` (spec §4.4): an Ed25519 signature over the server
//! seed, using the key derived from `SHA-512(password)`. No teacher
//! module covers this plugin — `sqlx-mysql` only ships
//! native/clear/caching_sha2 — so it is built directly against RFC 8032
//! rather than adapted from an existing implementation.

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha512};

use super::AuthPlugin;

#[derive(Debug)]
pub struct ClientEd25519;

impl AuthPlugin for ClientEd25519 {
    fn name(&self) -> &'static str {
        "client_ed25519"
    }

    fn initial_response(&self, seed: &[u8], password: &str) -> crate::Result<Vec<u8>> {
        let signature = sign(seed, password.as_bytes());
        Ok(signature.to_bytes().to_vec())
    }
}

fn sign(message: &[u8], password: &[u8]) -> ed25519_dalek::Signature {
    let hash = Sha512::digest(password);

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&hash[..32]);

    let signing_key = SigningKey::from_bytes(&key_bytes);
    signing_key.sign(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_64_bytes() {
        let plugin = ClientEd25519;
        let seed = [7u8; 32];
        let response = plugin.initial_response(&seed, "secret").unwrap();
        assert_eq!(response.len(), 64);
    }

    #[test]
    fn same_inputs_sign_deterministically() {
        let plugin = ClientEd25519;
        let seed = [1u8; 16];
        let a = plugin.initial_response(&seed, "secret").unwrap();
        let b = plugin.initial_response(&seed, "secret").unwrap();
        assert_eq!(a, b);
    }
}
