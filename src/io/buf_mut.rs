use byteorder::{ByteOrder, LittleEndian};

/// Write cursor over an owned, growable buffer. Every client message
/// builder in `protocol::com` encodes through this.
pub trait BufMut {
    fn put_u8(&mut self, value: u8);
    fn put_i8(&mut self, value: i8);
    fn put_u16(&mut self, value: u16);
    fn put_u24(&mut self, value: u32);
    fn put_u32(&mut self, value: u32);
    fn put_i32(&mut self, value: i32);
    fn put_u64(&mut self, value: u64);
    fn put_f32(&mut self, value: f32);
    fn put_f64(&mut self, value: f64);

    fn put_bytes(&mut self, bytes: &[u8]);
    fn put_str(&mut self, s: &str);
    fn put_str_nul(&mut self, s: &str);

    /// `int<lenenc>`.
    fn put_uint_lenenc(&mut self, value: u64);
    /// `string<lenenc>`.
    fn put_str_lenenc(&mut self, s: &str);
    fn put_bytes_lenenc(&mut self, bytes: &[u8]);

    /// Zero-fill padding, used by the BIT/MEDIUMINT reserved-byte layouts.
    fn zero_fill(&mut self, count: usize);
}

impl BufMut for Vec<u8> {
    fn put_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn put_i8(&mut self, value: i8) {
        self.push(value as u8);
    }

    fn put_u16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_u24(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.extend_from_slice(&buf[..3]);
    }

    fn put_u32(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_i32(&mut self, value: i32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_i32(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_u64(&mut self, value: u64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_f32(&mut self, value: f32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_f64(&mut self, value: f64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, value);
        self.extend_from_slice(&buf);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn put_str(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
    }

    fn put_str_nul(&mut self, s: &str) {
        self.extend_from_slice(s.as_bytes());
        self.push(0);
    }

    fn put_uint_lenenc(&mut self, value: u64) {
        if value < 251 {
            self.put_u8(value as u8);
        } else if value < 0x1_0000 {
            self.put_u8(0xFC);
            self.put_u16(value as u16);
        } else if value < 0x100_0000 {
            self.put_u8(0xFD);
            self.put_u24(value as u32);
        } else {
            self.put_u8(0xFE);
            self.put_u64(value);
        }
    }

    fn put_str_lenenc(&mut self, s: &str) {
        self.put_uint_lenenc(s.len() as u64);
        self.put_str(s);
    }

    fn put_bytes_lenenc(&mut self, bytes: &[u8]) {
        self.put_uint_lenenc(bytes.len() as u64);
        self.put_bytes(bytes);
    }

    fn zero_fill(&mut self, count: usize) {
        self.resize(self.len() + count, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenenc_int_round_trips_boundaries() {
        use crate::io::Buf;

        for value in [0u64, 250, 251, 65535, 65536, 0xFF_FFFF, 0x100_0000] {
            let mut buf = Vec::new();
            buf.put_uint_lenenc(value);
            let mut slice: &[u8] = &buf;
            assert_eq!(slice.get_uint_lenenc().unwrap(), Some(value));
        }
    }
}
