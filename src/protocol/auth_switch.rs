//! `AuthSwitchRequest` (spec §4.4): the server re-dispatches
//! authentication through a different plugin with a fresh seed.
//!
//! Grounded on `sqlx-core/src/mysql/protocol/auth_switch.rs`.

use crate::io::Buf;

#[derive(Debug)]
pub struct AuthSwitchRequest {
    pub plugin_name: Box<str>,
    pub seed: Box<[u8]>,
}

impl AuthSwitchRequest {
    pub fn read(mut buf: &[u8]) -> crate::Result<AuthSwitchRequest> {
        let header = buf.get_u8()?;
        if header != 0xFE {
            return Err(protocol_err!(
                "expected AuthSwitchRequest (0xFE); received 0x{:X}",
                header
            ));
        }

        let plugin_name = buf.get_str_nul()?.into();
        let seed = buf.get_bytes(buf.remaining())?.to_vec().into_boxed_slice();

        Ok(AuthSwitchRequest { plugin_name, seed })
    }
}
