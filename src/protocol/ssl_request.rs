//! SSL upgrade request (spec §4.5, transition 2): sent before the TLS
//! handshake so the server knows to expect an encrypted stream next.
//!
//! Grounded on `sqlx-core/src/mysql/protocol/ssl_request.rs`.

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct SslRequest {
    pub max_packet_size: u32,
    pub client_collation: u8,
}

impl Encode for SslRequest {
    fn encode(&self, buf: &mut Vec<u8>, capabilities: Capabilities) {
        debug_assert!(
            capabilities.contains(Capabilities::SSL),
            "SSL capability must be negotiated before sending SslRequest"
        );

        buf.put_u32(capabilities.bits() as u32);
        buf.put_u32(self.max_packet_size);
        buf.put_u8(self.client_collation);
        buf.zero_fill(23);
    }
}
