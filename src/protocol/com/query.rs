use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_QUERY;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComQuery<'a> {
    pub sql: &'a str,
}

impl Encode for ComQuery<'_> {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_QUERY);
        buf.put_str(self.sql);
    }
}
