//! Initial handshake packet (spec §4.5, transition 1).
//!
//! Grounded on `sqlx-core/src/mysql/protocol/handshake.rs`, generalized
//! to carry the full 64-bit capability mask and the raw seed so the auth
//! dispatch table can rebuild whichever plugin's scramble it needs.

use crate::capabilities::Capabilities;
use crate::io::Buf;
use crate::status::Status;

#[derive(Debug)]
pub struct Handshake {
    pub protocol_version: u8,
    pub server_version: Box<str>,
    pub thread_id: u32,
    pub server_capabilities: Capabilities,
    pub server_default_collation: u8,
    pub status: Status,
    pub auth_plugin_name: Option<Box<str>>,
    pub auth_plugin_data: Box<[u8]>,
}

impl Handshake {
    pub fn read(mut buf: &[u8]) -> crate::Result<Handshake> {
        let protocol_version = buf.get_u8()?;
        if protocol_version != 0x0a {
            return Err(protocol_err!(
                "unsupported handshake protocol version: {}",
                protocol_version
            ));
        }

        let server_version = buf.get_str_nul()?.into();
        let thread_id = buf.get_u32()?;

        let mut seed = Vec::with_capacity(20);
        seed.extend_from_slice(buf.get_bytes(8)?);

        // filler
        buf.advance(1);

        let capabilities_lo = buf.get_u16()?;
        let mut capabilities = Capabilities::from_bits_truncate(u64::from(capabilities_lo));

        let default_collation = buf.get_u8()?;
        let status = Status::from_bits_truncate(buf.get_u16()?);

        let capabilities_hi = buf.get_u16()?;
        capabilities |= Capabilities::from_bits_truncate(u64::from(capabilities_hi) << 16);

        let auth_plugin_data_len = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            buf.get_u8()?
        } else {
            buf.advance(1);
            0
        };

        // reserved
        buf.advance(6);

        if capabilities.contains(Capabilities::MYSQL) {
            buf.advance(4);
        } else {
            let capabilities_hi2 = buf.get_u32()?;
            capabilities |= Capabilities::from_bits_truncate(u64::from(capabilities_hi2) << 32);
        }

        if capabilities.contains(Capabilities::SECURE_CONNECTION) {
            let len = (auth_plugin_data_len as isize - 9).max(12) as usize;
            seed.extend_from_slice(buf.get_bytes(len)?);
            buf.advance(1);
        }

        let auth_plugin_name = if capabilities.contains(Capabilities::PLUGIN_AUTH) {
            Some(buf.get_str_nul()?.into())
        } else {
            None
        };

        Ok(Handshake {
            protocol_version,
            server_version,
            thread_id,
            server_capabilities: capabilities,
            server_default_collation: default_collation,
            status,
            auth_plugin_name,
            auth_plugin_data: seed.into_boxed_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDSHAKE_MARIADB_10_4_7: &[u8] = b"\n5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic\x00\x0b\x00\x00\x00t6L\\j\"dS\x00\xfe\xf7\x08\x02\x00\xff\x81\x15\x00\x00\x00\x00\x00\x00\x07\x00\x00\x00U14Oph9\"<H5n\x00mysql_native_password\x00";

    #[test]
    fn reads_mariadb_handshake() {
        let handshake = Handshake::read(HANDSHAKE_MARIADB_10_4_7).unwrap();

        assert_eq!(handshake.protocol_version, 10);
        assert_eq!(
            &*handshake.server_version,
            "5.5.5-10.4.7-MariaDB-1:10.4.7+maria~bionic"
        );
        assert_eq!(handshake.thread_id, 11);
        assert!(handshake
            .status
            .contains(crate::status::Status::SERVER_STATUS_AUTOCOMMIT));
        assert_eq!(handshake.auth_plugin_name.as_deref(), Some("mysql_native_password"));
        assert_eq!(handshake.auth_plugin_data.len(), 20);
    }
}
