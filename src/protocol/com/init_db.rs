use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_INIT_DB;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComInitDb<'a> {
    pub schema: &'a str,
}

impl Encode for ComInitDb<'_> {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_INIT_DB);
        buf.put_str(self.schema);
    }
}
