//! `AuthMoreData` (spec §4.4): the server's generic "more data" frame
//! during authentication, used by `caching_sha2_password` to signal
//! fast-path success (`0x03`) or request the full-auth exchange
//! (`0x04`), and more generally as an opaque carrier for whatever the
//! active plugin's state machine expects next.

use crate::io::Buf;

pub const FAST_AUTH_SUCCESS: u8 = 0x03;
pub const FULL_AUTH_REQUIRED: u8 = 0x04;

#[derive(Debug)]
pub struct AuthMoreData {
    pub data: Box<[u8]>,
}

impl AuthMoreData {
    pub fn read(mut buf: &[u8]) -> crate::Result<AuthMoreData> {
        let header = buf.get_u8()?;
        if header != 0x01 {
            return Err(protocol_err!(
                "expected AuthMoreData (0x01); received 0x{:X}",
                header
            ));
        }

        let data = buf.get_bytes(buf.remaining())?.to_vec().into_boxed_slice();
        Ok(AuthMoreData { data })
    }
}
