//! Integral codecs: TINY/SHORT/INT24/LONG/LONGLONG and BIT (spec §4.2
//! "Integral codecs").
//!
//! Grounded on `sqlx-core/src/mysql/protocol/row.rs`'s binary-width
//! dispatch (MEDIUMINT wire-encoded on 3 + 1 padding bytes) and
//! `type_info.rs`'s signed/unsigned flag handling.

use crate::io::{Buf, BufMut};
use crate::protocol::ColumnType;

use super::{Codec, ColumnContext, Format, Value};

pub struct IntegerCodec;

impl Codec for IntegerCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(
            column.column_type,
            ColumnType::TINY
                | ColumnType::SHORT
                | ColumnType::INT24
                | ColumnType::LONG
                | ColumnType::LONGLONG
                | ColumnType::YEAR
        )
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Int(_) | Value::UInt(_) | Value::Bool(_))
    }

    fn decode(&self, buf: &[u8], column: &ColumnContext, format: Format) -> crate::Result<Value> {
        let raw = match format {
            Format::Text => parse_ascii_digits(buf)?,
            Format::Binary => decode_binary_width(buf, column)?,
        };

        let raw = if column.column_type == ColumnType::YEAR {
            remap_year(raw, column.display_length)
        } else {
            raw
        };

        Ok(if column.is_unsigned() {
            Value::UInt(raw as u64)
        } else {
            Value::Int(raw)
        })
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, format: Format) {
        let raw: i128 = match value {
            Value::Int(v) => *v as i128,
            Value::UInt(v) => *v as i128,
            Value::Bool(b) => *b as i128,
            _ => return,
        };

        match format {
            Format::Text => out.put_str(&raw.to_string()),
            Format::Binary => out.put_u64(raw as u64),
        }
    }
}

/// YEAR(2) stores only the two low digits of the year on the wire; spec
/// §4.2 maps them back to a four-digit year: `0..=69` is `2000 + n`,
/// `70..=99` is `1900 + n`. YEAR(4), the common case, is passed through
/// unchanged.
fn remap_year(raw: i64, display_length: u32) -> i64 {
    if display_length == 2 && (0..=99).contains(&raw) {
        if raw <= 69 {
            2000 + raw
        } else {
            1900 + raw
        }
    } else {
        raw
    }
}

fn parse_ascii_digits(buf: &[u8]) -> crate::Result<i64> {
    let text = std::str::from_utf8(buf)?;
    text.parse()
        .or_else(|_| text.parse::<u64>().map(|v| v as i64))
        .map_err(|_| protocol_err!("malformed integer literal: {:?}", text))
}

fn decode_binary_width(mut buf: &[u8], column: &ColumnContext) -> crate::Result<i64> {
    Ok(match column.column_type {
        ColumnType::TINY => {
            if column.is_unsigned() {
                i64::from(buf.get_u8()?)
            } else {
                i64::from(buf.get_i8()?)
            }
        }
        ColumnType::SHORT | ColumnType::YEAR => {
            if column.is_unsigned() {
                i64::from(buf.get_u16()?)
            } else {
                i64::from(buf.get_i16()?)
            }
        }
        // 3 data bytes + 1 padding byte on the wire regardless of signedness.
        ColumnType::INT24 => {
            let v = buf.get_u32()?;
            if column.is_unsigned() {
                i64::from(v & 0x00FF_FFFF)
            } else {
                i64::from((v & 0x00FF_FFFF) as i32) << 8 >> 8
            }
        }
        ColumnType::LONG => {
            if column.is_unsigned() {
                i64::from(buf.get_u32()?)
            } else {
                i64::from(buf.get_i32()?)
            }
        }
        ColumnType::LONGLONG => {
            if column.is_unsigned() {
                buf.get_u64()? as i64
            } else {
                buf.get_i64()?
            }
        }
        _ => return Err(protocol_err!("not an integral column type: {}", column.column_type.name())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FieldFlags;

    fn column(column_type: ColumnType, unsigned: bool) -> ColumnContext {
        ColumnContext {
            column_type,
            flags: if unsigned { FieldFlags::UNSIGNED } else { FieldFlags::empty() },
            display_length: 0,
        }
    }

    #[test]
    fn remaps_year_2_low_value_into_2000s() {
        let codec = IntegerCodec;
        let column = ColumnContext { display_length: 2, ..column(ColumnType::YEAR, false) };
        let value = codec.decode(b"5", &column, Format::Text).unwrap();
        assert_eq!(value, Value::Int(2005));
    }

    #[test]
    fn remaps_year_2_high_value_into_1900s() {
        let codec = IntegerCodec;
        let column = ColumnContext { display_length: 2, ..column(ColumnType::YEAR, false) };
        let value = codec.decode(b"95", &column, Format::Text).unwrap();
        assert_eq!(value, Value::Int(1995));
    }

    #[test]
    fn year_4_passes_through_unchanged() {
        let codec = IntegerCodec;
        let column = ColumnContext { display_length: 4, ..column(ColumnType::YEAR, false) };
        let value = codec.decode(b"2024", &column, Format::Text).unwrap();
        assert_eq!(value, Value::Int(2024));
    }

    #[test]
    fn decodes_signed_long_binary() {
        let codec = IntegerCodec;
        let mut buf = Vec::new();
        buf.put_i32(-42);
        let value = codec.decode(&buf, &column(ColumnType::LONG, false), Format::Binary).unwrap();
        assert_eq!(value, Value::Int(-42));
    }

    #[test]
    fn decodes_unsigned_tiny_text() {
        let codec = IntegerCodec;
        let value = codec.decode(b"200", &column(ColumnType::TINY, true), Format::Text).unwrap();
        assert_eq!(value, Value::UInt(200));
    }

    #[test]
    fn decodes_medium_int_negative() {
        let codec = IntegerCodec;
        let mut buf = Vec::new();
        buf.put_u32(0x00FF_FFFE); // -2 as a 24-bit two's complement value
        let value = codec.decode(&buf, &column(ColumnType::INT24, false), Format::Binary).unwrap();
        assert_eq!(value, Value::Int(-2));
    }

}
