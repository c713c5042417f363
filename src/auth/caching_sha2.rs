//! `caching_sha2_password` (spec §4.4): first exchange is `SHA256(password)
//! XOR SHA256(seed || SHA256(SHA256(password)))`, 32 bytes. A server
//! `AuthMoreData` of `0x03` is fast-path success; `0x04` requests the
//! full-auth exchange, which this plugin only completes over TLS or a
//! unix socket — otherwise it fails outright rather than leaking the
//! password in cleartext over TCP.

use sha2::{Digest, Sha256};

use crate::protocol::{FAST_AUTH_SUCCESS, FULL_AUTH_REQUIRED};

use super::{AuthPlugin, AuthStep};

#[derive(Debug)]
pub struct CachingSha2Password;

impl AuthPlugin for CachingSha2Password {
    fn name(&self) -> &'static str {
        "caching_sha2_password"
    }

    fn initial_response(&self, seed: &[u8], password: &str) -> crate::Result<Vec<u8>> {
        if password.is_empty() {
            return Ok(Vec::new());
        }

        Ok(scramble(seed, password.as_bytes()).to_vec())
    }

    fn handle_more_data(
        &self,
        data: &[u8],
        _seed: &[u8],
        password: &str,
        secure_channel: bool,
    ) -> crate::Result<AuthStep> {
        match data.first().copied() {
            Some(FAST_AUTH_SUCCESS) => Ok(AuthStep::AwaitServer),
            Some(FULL_AUTH_REQUIRED) => {
                if !secure_channel {
                    return Err(crate::Error::Configuration(
                        "caching_sha2_password full authentication requires TLS or a unix socket"
                            .to_owned(),
                    ));
                }

                let mut out = Vec::with_capacity(password.len() + 1);
                out.extend_from_slice(password.as_bytes());
                out.push(0);
                Ok(AuthStep::Respond(out))
            }
            other => Err(protocol_err!(
                "unexpected caching_sha2_password AuthMoreData tag: {:?}",
                other
            )),
        }
    }
}

fn scramble(seed: &[u8], password: &[u8]) -> [u8; 32] {
    let password_hash = Sha256::digest(password);
    let password_hash_hash = Sha256::digest(password_hash);

    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(password_hash_hash);
    let seed_hash = hasher.finalize();

    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = password_hash[i] ^ seed_hash[i];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_auth_success_awaits_server() {
        let plugin = CachingSha2Password;
        let step = plugin
            .handle_more_data(&[FAST_AUTH_SUCCESS], &[], "secret", false)
            .unwrap();
        assert_eq!(step, AuthStep::AwaitServer);
    }

    #[test]
    fn full_auth_without_secure_channel_fails() {
        let plugin = CachingSha2Password;
        let result = plugin.handle_more_data(&[FULL_AUTH_REQUIRED], &[], "secret", false);
        assert!(result.is_err());
    }

    #[test]
    fn full_auth_over_secure_channel_sends_clear_password() {
        let plugin = CachingSha2Password;
        let step = plugin
            .handle_more_data(&[FULL_AUTH_REQUIRED], &[], "secret", true)
            .unwrap();
        assert_eq!(step, AuthStep::Respond(b"secret\0".to_vec()));
    }

    #[test]
    fn scramble_output_is_32_bytes() {
        let seed: Vec<u8> = (1u8..=20).collect();
        assert_eq!(scramble(&seed, b"secret").len(), 32);
    }
}
