//! `COM_CHANGE_USER` (0x11): re-authenticates an existing connection as a
//! different user without reconnecting, reusing the handshake response's
//! auth-response layout rules.

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_CHANGE_USER;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComChangeUser<'a> {
    pub username: &'a str,
    pub auth_response: &'a [u8],
    pub database: Option<&'a str>,
    pub client_collation: u8,
    pub auth_plugin_name: &'a str,
}

impl Encode for ComChangeUser<'_> {
    fn encode(&self, buf: &mut Vec<u8>, capabilities: Capabilities) {
        buf.put_u8(COM_CHANGE_USER);
        buf.put_str_nul(self.username);

        if capabilities.contains(Capabilities::SECURE_CONNECTION) {
            buf.put_u8(self.auth_response.len() as u8);
            buf.put_bytes(self.auth_response);
        } else {
            buf.put_bytes(self.auth_response);
            buf.put_u8(0);
        }

        buf.put_str_nul(self.database.unwrap_or(""));
        buf.put_u16(u16::from(self.client_collation));

        if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.put_str_nul(self.auth_plugin_name);
        }
    }
}
