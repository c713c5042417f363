//! `mysql_clear_password` (spec §4.4): the UTF-8 password bytes
//! followed by a NUL terminator, sent as-is — this plugin only ever
//! makes sense over an already-encrypted channel, but enforcing that is
//! the caller's responsibility (the connection state machine knows
//! whether TLS was negotiated; this plugin does not).

use super::AuthPlugin;

#[derive(Debug)]
pub struct ClearPassword;

impl AuthPlugin for ClearPassword {
    fn name(&self) -> &'static str {
        "mysql_clear_password"
    }

    fn initial_response(&self, _seed: &[u8], password: &str) -> crate::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(password.len() + 1);
        out.extend_from_slice(password.as_bytes());
        out.push(0);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_nul_terminator() {
        let plugin = ClearPassword;
        let response = plugin.initial_response(&[], "hunter2").unwrap();
        assert_eq!(response, b"hunter2\0");
    }
}
