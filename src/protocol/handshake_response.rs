//! Client handshake response (spec §4.5, transition 3).
//!
//! Grounded on `sqlx-core/src/mysql/protocol/handshake_response.rs`.

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct HandshakeResponse<'a> {
    pub max_packet_size: u32,
    pub client_collation: u8,
    pub username: &'a str,
    pub database: Option<&'a str>,
    pub auth_plugin_name: &'a str,
    pub auth_response: &'a [u8],
}

impl Encode for HandshakeResponse<'_> {
    fn encode(&self, buf: &mut Vec<u8>, capabilities: Capabilities) {
        buf.put_u32(capabilities.bits() as u32);
        buf.put_u32(self.max_packet_size);
        buf.put_u8(self.client_collation);
        buf.zero_fill(19);

        if capabilities.contains(Capabilities::MYSQL) {
            buf.zero_fill(4);
        } else {
            buf.put_u32((capabilities.bits() >> 32) as u32);
        }

        buf.put_str_nul(self.username);

        if capabilities.contains(Capabilities::PLUGIN_AUTH_LENENC_DATA) {
            buf.put_bytes_lenenc(self.auth_response);
        } else if capabilities.contains(Capabilities::SECURE_CONNECTION) {
            buf.put_u8(self.auth_response.len() as u8);
            buf.put_bytes(self.auth_response);
        } else {
            buf.put_u8(0);
        }

        if capabilities.contains(Capabilities::CONNECT_WITH_DB) {
            if let Some(database) = self.database {
                buf.put_str_nul(database);
            }
        }

        if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.put_str_nul(self.auth_plugin_name);
        }
    }
}
