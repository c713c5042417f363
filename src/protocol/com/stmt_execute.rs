//! `COM_STMT_EXECUTE` (spec §4.4 command set; §3 "Binding").
//!
//! Grounded on `sqlx-core/src/mysql/protocol/com_stmt_execute.rs`'s
//! `Cursor` flag and null-bitmap/param-type layout, generalized to take
//! the pre-encoded bitmap/types/payload a [`crate::binding::Binding`]
//! produces rather than a fixed parameter array.

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_STMT_EXECUTE;
use crate::protocol::{ColumnType, Encode};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cursor: u8 {
        const NO_CURSOR  = 0x00;
        const READ_ONLY  = 0x01;
        const FOR_UPDATE = 0x02;
        const SCROLLABLE = 0x04;
    }
}

#[derive(Debug)]
pub struct ComStmtExecute<'a> {
    pub statement_id: u32,
    pub cursor: Cursor,
    /// One entry per bound parameter, in index order; empty when the
    /// statement takes no parameters or the server already has the
    /// types from a prior execute (spec §4.2 "new params bound" flag).
    pub param_types: &'a [(ColumnType, bool)],
    pub null_bitmap: &'a [u8],
    /// Binary-encoded parameter values, concatenated in index order,
    /// NULLs omitted (spec §4.2 "Null encoding in prepared binary
    /// parameters").
    pub params: &'a [u8],
}

impl Encode for ComStmtExecute<'_> {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_STMT_EXECUTE);
        buf.put_u32(self.statement_id);
        buf.put_u8(self.cursor.bits());
        buf.put_u32(1); // iteration count, always 1

        if self.param_types.is_empty() {
            return;
        }

        buf.put_bytes(self.null_bitmap);
        buf.put_u8(1); // new-params-bound flag

        for (column_type, is_unsigned) in self.param_types {
            buf.put_u8(column_type.0);
            buf.put_u8(if *is_unsigned { 0x80 } else { 0x00 });
        }

        buf.put_bytes(self.params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_header_and_iteration_count() {
        let execute = ComStmtExecute {
            statement_id: 7,
            cursor: Cursor::NO_CURSOR,
            param_types: &[],
            null_bitmap: &[],
            params: &[],
        };

        let mut buf = Vec::new();
        execute.encode(&mut buf, Capabilities::empty());

        assert_eq!(buf[0], COM_STMT_EXECUTE);
        assert_eq!(&buf[1..5], &7u32.to_le_bytes());
        assert_eq!(buf[5], 0); // NO_CURSOR
        assert_eq!(&buf[6..10], &1u32.to_le_bytes());
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn encodes_bound_parameter_with_type_and_unsigned_flag() {
        let null_bitmap = [0u8];
        let params = [42u8, 0, 0, 0];
        let execute = ComStmtExecute {
            statement_id: 1,
            cursor: Cursor::NO_CURSOR,
            param_types: &[(ColumnType::LONG, false)],
            null_bitmap: &null_bitmap,
            params: &params,
        };

        let mut buf = Vec::new();
        execute.encode(&mut buf, Capabilities::empty());

        // header(10) + null_bitmap(1) + new-params flag(1) + type(2) + params(4)
        assert_eq!(buf.len(), 10 + 1 + 1 + 2 + 4);
        assert_eq!(buf[11], 1); // new-params-bound flag
        assert_eq!(buf[12], ColumnType::LONG.0);
        assert_eq!(buf[13], 0x00);
    }
}
