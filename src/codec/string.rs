//! String codec (spec §4.2 "String"): BIT's default text rendering,
//! zero-fill padding for display, and the plain UTF-8 catch-all for
//! VARCHAR/STRING/ENUM/SET/JSON.

use crate::io::BufMut;
use crate::protocol::ColumnType;

use super::escape::escape_literal;
use super::{Codec, ColumnContext, Format, Value};

pub struct StringCodec;

impl Codec for StringCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(
            column.column_type,
            ColumnType::BIT
                | ColumnType::VARCHAR
                | ColumnType::VAR_STRING
                | ColumnType::STRING
                | ColumnType::ENUM
                | ColumnType::SET
                | ColumnType::JSON
        )
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn decode(&self, buf: &[u8], column: &ColumnContext, _format: Format) -> crate::Result<Value> {
        if column.column_type == ColumnType::BIT {
            return Ok(Value::String(bit_to_string(buf)));
        }

        Ok(Value::String(std::str::from_utf8(buf)?.to_owned()))
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, format: Format) {
        let Value::String(text) = value else { return };

        match format {
            Format::Binary => out.put_str_lenenc(text),
            // Default server SQL mode (NO_BACKSLASH_ESCAPES unset). Callers
            // that need to honor the session's actual mode go through
            // `crate::codec::encode_text_param` instead, which takes the
            // flag explicitly.
            Format::Text => out.put_str(&escape_literal(text, false)),
        }
    }
}

/// `BIT` decodes to `b'` + the bits of `bytes`, big-endian, rendered as
/// a string: leading zero *bytes* are dropped outright, then the
/// leading zero *bits* of the first remaining byte are dropped by
/// plain binary formatting, but every byte after that keeps its full
/// 8-bit width (including embedded zero bytes). Preserved literally
/// per the system this behavior was ported from — see spec §9 "Open
/// questions".
pub fn bit_to_string(bytes: &[u8]) -> String {
    let mut start = 0;
    while start < bytes.len().saturating_sub(1) && bytes[start] == 0 {
        start += 1;
    }

    let mut out = String::from("b'");

    if let Some((&first, rest)) = bytes[start..].split_first() {
        out.push_str(&format!("{first:b}"));
        for byte in rest {
            out.push_str(&format!("{byte:08b}"));
        }
    } else {
        out.push('0');
    }

    out.push('\'');
    out
}

/// Pads an integer's decimal digits to `display_length` with leading
/// zeros, for `ZEROFILL` columns rendered as a string (spec §4.2
/// "String"). `digits` must already be the unsigned decimal form —
/// zerofill columns are implicitly unsigned.
pub fn pad_zerofill(digits: &str, display_length: u32) -> String {
    let display_length = display_length as usize;
    if digits.len() >= display_length {
        return digits.to_owned();
    }
    format!("{:0>width$}", digits, width = display_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_drops_leading_zero_byte_and_bits() {
        assert_eq!(bit_to_string(&[0x00, 0x05]), "b'101'");
    }

    #[test]
    fn bit_keeps_interior_zero_bytes_full_width() {
        assert_eq!(bit_to_string(&[0x01, 0x00]), "b'100000000'");
    }

    #[test]
    fn zerofill_pads_with_leading_zeros() {
        assert_eq!(pad_zerofill("42", 5), "00042");
        assert_eq!(pad_zerofill("123456", 3), "123456");
    }

    #[test]
    fn text_encode_escapes_and_quotes() {
        let codec = StringCodec;
        let mut out = Vec::new();
        codec.encode(&mut out, &Value::String("O'Brien".to_owned()), Format::Text);
        assert_eq!(out, b"'O\\'Brien'");
    }
}
