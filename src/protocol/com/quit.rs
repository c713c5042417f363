use crate::capabilities::Capabilities;
use crate::io::BufMut;
use crate::protocol::com::COM_QUIT;
use crate::protocol::Encode;

#[derive(Debug)]
pub struct ComQuit;

impl Encode for ComQuit {
    fn encode(&self, buf: &mut Vec<u8>, _: Capabilities) {
        buf.put_u8(COM_QUIT);
    }
}
