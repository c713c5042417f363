//! `COM_STMT_PREPARE` response header (spec §3 "ServerPrepareResult").
//! The parameter and result column definitions that follow are parsed as
//! ordinary `ColumnDefinition` packets by the pipeline.
//!
//! Grounded on `sqlx-core/src/mysql/protocol/com_stmt_prepare_ok.rs`.

use crate::io::Buf;

#[derive(Debug)]
pub struct ComStmtPrepareOk {
    pub statement_id: u32,
    pub column_count: u16,
    pub param_count: u16,
    pub warning_count: u16,
}

impl ComStmtPrepareOk {
    pub fn read(mut buf: &[u8]) -> crate::Result<ComStmtPrepareOk> {
        let header = buf.get_u8()?;
        if header != 0x00 {
            return Err(protocol_err!(
                "expected COM_STMT_PREPARE_OK (0x00); received 0x{:X}",
                header
            ));
        }

        let statement_id = buf.get_u32()?;
        let column_count = buf.get_u16()?;
        let param_count = buf.get_u16()?;

        // reserved
        buf.advance(1);

        let warning_count = buf.get_u16()?;

        Ok(ComStmtPrepareOk {
            statement_id,
            column_count,
            param_count,
            warning_count,
        })
    }
}
