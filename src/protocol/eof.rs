//! Legacy `EOF_Packet` (spec §4.3), replaced by a repurposed `OK_Packet`
//! when `CLIENT_DEPRECATE_EOF` is negotiated.
//!
//! Grounded on `sqlx-core/src/mysql/protocol/eof.rs`.

use crate::io::Buf;
use crate::status::Status;

#[derive(Debug, Clone)]
pub struct EofPacket {
    pub warnings: u16,
    pub status: Status,
}

impl EofPacket {
    pub fn read(mut buf: &[u8]) -> crate::Result<EofPacket> {
        let header = buf.get_u8()?;
        if header != 0xFE {
            return Err(protocol_err!("expected EOF (0xFE); received 0x{:X}", header));
        }

        let warnings = buf.get_u16()?;
        let status = Status::from_bits_truncate(buf.get_u16()?);

        Ok(EofPacket { warnings, status })
    }

    pub fn is_ending(&self) -> bool {
        !self.status.contains(Status::SERVER_MORE_RESULTS_EXISTS)
    }
}
