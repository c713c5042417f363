//! `COM_STMT_CLOSE`: deallocates a prepared statement server-side. No
//! response packet is sent back (spec §4.6 "Prepared statements").

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_STMT_CLOSE;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComStmtClose {
    pub statement_id: u32,
}

impl Encode for ComStmtClose {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_STMT_CLOSE);
        buf.put_u32(self.statement_id);
    }
}
