//! `OK_Packet` (spec §4.3). With `CLIENT_DEPRECATE_EOF` negotiated, this
//! same layout also terminates a result set in place of an `EOF_Packet`.
//!
//! Grounded on `sqlx-core/src/mysql/protocol/ok.rs`.

use crate::io::Buf;
use crate::status::Status;

#[derive(Debug, Clone)]
pub struct OkPacket {
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub status: Status,
    pub warnings: u16,
    pub info: Box<str>,
}

impl OkPacket {
    pub fn read(mut buf: &[u8]) -> crate::Result<OkPacket> {
        let header = buf.get_u8()?;
        if header != 0x00 && header != 0xFE {
            return Err(protocol_err!(
                "expected OK (0x00 or 0xFE); received 0x{:X}",
                header
            ));
        }

        let affected_rows = buf.get_uint_lenenc()?.unwrap_or(0);
        let last_insert_id = buf.get_uint_lenenc()?.unwrap_or(0);
        let status = Status::from_bits_truncate(buf.get_u16()?);
        let warnings = buf.get_u16()?;
        let info = buf.get_str(buf.remaining())?.into();

        Ok(OkPacket {
            affected_rows,
            last_insert_id,
            status,
            warnings,
            info,
        })
    }

    /// Whether this OK terminates the current result stream: no
    /// `SERVER_MORE_RESULTS_EXISTS` status bit set (spec §4.6 "ending").
    pub fn is_ending(&self) -> bool {
        !self.status.contains(Status::SERVER_MORE_RESULTS_EXISTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_HANDSHAKE: &[u8] = b"\x00\x00\x00\x02\x00\x00\x00";

    #[test]
    fn decodes_ok_after_handshake() {
        let ok = OkPacket::read(OK_HANDSHAKE).unwrap();
        assert_eq!(ok.affected_rows, 0);
        assert_eq!(ok.last_insert_id, 0);
        assert!(ok.status.contains(Status::SERVER_STATUS_AUTOCOMMIT));
        assert_eq!(ok.warnings, 0);
        assert!(ok.info.is_empty());
    }
}
