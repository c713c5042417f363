use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_STMT_PREPARE;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComStmtPrepare<'a> {
    pub sql: &'a str,
}

impl Encode for ComStmtPrepare<'_> {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_STMT_PREPARE);
        buf.put_str(self.sql);
    }
}
