//! `ERR_Packet` (spec §4.3, §7).
//!
//! Grounded on `sqlx-core/src/mysql/protocol/err.rs`. The SQLSTATE-class
//! classification itself lives in [`crate::error::classify`]; this module
//! only decodes the wire bytes.

use crate::io::Buf;

#[derive(Debug, Clone)]
pub struct ErrPacket {
    pub error_code: u16,
    pub sql_state: Box<str>,
    pub error_message: Box<str>,
}

impl ErrPacket {
    pub fn read(mut buf: &[u8]) -> crate::Result<ErrPacket> {
        let header = buf.get_u8()?;
        if header != 0xFF {
            return Err(protocol_err!("expected ERR (0xFF); received 0x{:X}", header));
        }

        let error_code = buf.get_u16()?;

        // SQLSTATE marker, always '#'
        let _marker = buf.get_u8()?;
        let sql_state = buf.get_str(5)?.into();

        let error_message = buf.get_str(buf.remaining())?.into();

        Ok(ErrPacket {
            error_code,
            sql_state,
            error_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERR_UNKNOWN_DB: &[u8] = b"\xff\x19\x04#42000Unknown database 'unknown'";

    #[test]
    fn decodes_err_packet() {
        let err = ErrPacket::read(ERR_UNKNOWN_DB).unwrap();
        assert_eq!(err.error_code, 1049);
        assert_eq!(&*err.sql_state, "42000");
        assert_eq!(&*err.error_message, "Unknown database 'unknown'");
    }
}
