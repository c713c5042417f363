use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_RESET_CONNECTION;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComResetConnection;

impl Encode for ComResetConnection {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_RESET_CONNECTION);
    }
}
