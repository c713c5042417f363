//! `COM_STMT_FETCH`: fetches the next batch of rows for a statement
//! executed with a cursor (spec §4.4 "Client Message Builder").

use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_STMT_FETCH;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComStmtFetch {
    pub statement_id: u32,
    pub row_count: u32,
}

impl Encode for ComStmtFetch {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_STMT_FETCH);
        buf.put_u32(self.statement_id);
        buf.put_u32(self.row_count);
    }
}
