//! `COM_STMT_RESET`: clears a prepared statement's current cursor and
//! buffered parameter data without deallocating it, replied to with a
//! plain OK packet.

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_STMT_RESET;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComStmtReset {
    pub statement_id: u32,
}

impl Encode for ComStmtReset {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_STMT_RESET);
        buf.put_u32(self.statement_id);
    }
}
