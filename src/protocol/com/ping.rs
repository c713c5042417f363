use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_PING;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComPing;

impl Encode for ComPing {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_PING);
    }
}
