//! `mysql_native_password` (spec §4.4, §8 scenario 4): `SHA1(password)
//! XOR SHA1(seed || SHA1(SHA1(password)))`, a 20-byte payload; an empty
//! password sends an empty response instead.

use sha1::{Digest, Sha1};

use super::{AuthPlugin, AuthStep};

#[derive(Debug)]
pub struct NativePassword;

impl AuthPlugin for NativePassword {
    fn name(&self) -> &'static str {
        "mysql_native_password"
    }

    fn initial_response(&self, seed: &[u8], password: &str) -> crate::Result<Vec<u8>> {
        if password.is_empty() {
            return Ok(Vec::new());
        }

        Ok(scramble(seed, password.as_bytes()).to_vec())
    }

    fn handle_more_data(
        &self,
        _data: &[u8],
        _seed: &[u8],
        _password: &str,
        _secure_channel: bool,
    ) -> crate::Result<AuthStep> {
        Ok(AuthStep::AwaitServer)
    }
}

fn scramble(seed: &[u8], password: &[u8]) -> [u8; 20] {
    let password_hash = Sha1::digest(password);
    let password_hash_hash = Sha1::digest(password_hash);

    let mut hasher = Sha1::new();
    hasher.update(seed);
    hasher.update(password_hash_hash);
    let seed_hash = hasher.finalize();

    let mut out = [0u8; 20];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = password_hash[i] ^ seed_hash[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_native_password_invariant() {
        let seed: Vec<u8> = (1u8..=20).collect();
        let expected = scramble(&seed, b"secret");

        let password_hash = Sha1::digest(b"secret");
        let password_hash_hash = Sha1::digest(password_hash);
        let mut hasher = Sha1::new();
        hasher.update(&seed);
        hasher.update(password_hash_hash);
        let seed_hash = hasher.finalize();

        let mut manual = [0u8; 20];
        for i in 0..20 {
            manual[i] = password_hash[i] ^ seed_hash[i];
        }

        assert_eq!(expected, manual);
        assert_eq!(expected.len(), 20);
    }

    #[test]
    fn empty_password_sends_empty_response() {
        let plugin = NativePassword;
        let seed: Vec<u8> = (1u8..=20).collect();
        assert!(plugin.initial_response(&seed, "").unwrap().is_empty());
    }
}
