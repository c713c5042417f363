use byteorder::{ByteOrder, LittleEndian};
use memchr::memchr;

use crate::error::Error;

/// A read cursor over a borrowed byte slice, advanced in place by every
/// `get_*` call. Mirrors the primitive accessors a wire decoder needs;
/// the length-encoded extensions live alongside it since MySQL's lenenc
/// framing is used everywhere a primitive width would otherwise suffice.
pub trait Buf<'a> {
    fn advance(&mut self, cnt: usize);
    fn remaining(&self) -> usize;

    fn get_u8(&mut self) -> crate::Result<u8>;
    fn get_i8(&mut self) -> crate::Result<i8>;
    fn get_u16(&mut self) -> crate::Result<u16>;
    fn get_i16(&mut self) -> crate::Result<i16>;
    fn get_u24(&mut self) -> crate::Result<u32>;
    fn get_u32(&mut self) -> crate::Result<u32>;
    fn get_i32(&mut self) -> crate::Result<i32>;
    fn get_u64(&mut self) -> crate::Result<u64>;
    fn get_i64(&mut self) -> crate::Result<i64>;
    fn get_f32(&mut self) -> crate::Result<f32>;
    fn get_f64(&mut self) -> crate::Result<f64>;

    fn get_bytes(&mut self, len: usize) -> crate::Result<&'a [u8]>;
    fn get_str(&mut self, len: usize) -> crate::Result<&'a str>;
    /// NUL-terminated string, consuming the terminator.
    fn get_str_nul(&mut self) -> crate::Result<&'a str>;

    /// `int<lenenc>`: `0xFB` = SQL NULL (`None`), `< 0xFB` literal,
    /// `0xFC`/`0xFD`/`0xFE` prefix a 2/3/8-byte little-endian length.
    fn get_uint_lenenc(&mut self) -> crate::Result<Option<u64>>;
    /// `string<lenenc>`: a `lenenc` length prefix followed by that many
    /// bytes, or `None` for the `0xFB` NULL marker.
    fn get_str_lenenc(&mut self) -> crate::Result<Option<&'a str>>;
    fn get_bytes_lenenc(&mut self) -> crate::Result<Option<&'a [u8]>>;
}

impl<'a> Buf<'a> for &'a [u8] {
    fn advance(&mut self, cnt: usize) {
        *self = &self[cnt..];
    }

    fn remaining(&self) -> usize {
        self.len()
    }

    fn get_u8(&mut self) -> crate::Result<u8> {
        let v = *self.first().ok_or_else(|| protocol_err!("buffer underflow reading u8"))?;
        self.advance(1);
        Ok(v)
    }

    fn get_i8(&mut self) -> crate::Result<i8> {
        Ok(self.get_u8()? as i8)
    }

    fn get_u16(&mut self) -> crate::Result<u16> {
        let bytes = self.get_bytes(2)?;
        Ok(LittleEndian::read_u16(bytes))
    }

    fn get_i16(&mut self) -> crate::Result<i16> {
        let bytes = self.get_bytes(2)?;
        Ok(LittleEndian::read_i16(bytes))
    }

    fn get_u24(&mut self) -> crate::Result<u32> {
        let bytes = self.get_bytes(3)?;
        Ok(LittleEndian::read_u24(bytes))
    }

    fn get_u32(&mut self) -> crate::Result<u32> {
        let bytes = self.get_bytes(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    fn get_i32(&mut self) -> crate::Result<i32> {
        let bytes = self.get_bytes(4)?;
        Ok(LittleEndian::read_i32(bytes))
    }

    fn get_u64(&mut self) -> crate::Result<u64> {
        let bytes = self.get_bytes(8)?;
        Ok(LittleEndian::read_u64(bytes))
    }

    fn get_i64(&mut self) -> crate::Result<i64> {
        let bytes = self.get_bytes(8)?;
        Ok(LittleEndian::read_i64(bytes))
    }

    fn get_f32(&mut self) -> crate::Result<f32> {
        let bytes = self.get_bytes(4)?;
        Ok(LittleEndian::read_f32(bytes))
    }

    fn get_f64(&mut self) -> crate::Result<f64> {
        let bytes = self.get_bytes(8)?;
        Ok(LittleEndian::read_f64(bytes))
    }

    fn get_bytes(&mut self, len: usize) -> crate::Result<&'a [u8]> {
        if self.len() < len {
            return Err(protocol_err!(
                "buffer underflow: wanted {} bytes, have {}",
                len,
                self.len()
            ));
        }
        let (head, tail) = self.split_at(len);
        *self = tail;
        Ok(head)
    }

    fn get_str(&mut self, len: usize) -> crate::Result<&'a str> {
        Ok(std::str::from_utf8(self.get_bytes(len)?)?)
    }

    fn get_str_nul(&mut self) -> crate::Result<&'a str> {
        let len = memchr(b'\0', self).ok_or_else(|| protocol_err!("missing NUL terminator"))?;
        let s = self.get_str(len)?;
        self.advance(1);
        Ok(s)
    }

    fn get_uint_lenenc(&mut self) -> crate::Result<Option<u64>> {
        Ok(match self.get_u8()? {
            0xFB => None,
            0xFC => Some(u64::from(self.get_u16()?)),
            0xFD => Some(u64::from(self.get_u24()?)),
            0xFE => Some(self.get_u64()?),
            value => Some(u64::from(value)),
        })
    }

    fn get_str_lenenc(&mut self) -> crate::Result<Option<&'a str>> {
        match self.get_uint_lenenc()? {
            Some(len) => Ok(Some(self.get_str(len as usize)?)),
            None => Ok(None),
        }
    }

    fn get_bytes_lenenc(&mut self) -> crate::Result<Option<&'a [u8]>> {
        match self.get_uint_lenenc()? {
            Some(len) => Ok(Some(self.get_bytes(len as usize)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lenenc_int_boundaries() {
        let mut buf: &[u8] = &[0xFA];
        assert_eq!(buf.get_uint_lenenc().unwrap(), Some(250));

        let mut buf: &[u8] = &[0xFC, 0x00, 0x01];
        assert_eq!(buf.get_uint_lenenc().unwrap(), Some(256));

        let mut buf: &[u8] = &[0xFB];
        assert_eq!(buf.get_uint_lenenc().unwrap(), None);
    }

    #[test]
    fn reads_nul_terminated_string() {
        let mut buf: &[u8] = b"root\0rest";
        assert_eq!(buf.get_str_nul().unwrap(), "root");
        assert_eq!(buf.get_bytes(4).unwrap(), b"rest");
    }
}
