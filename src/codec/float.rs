//! FLOAT/DOUBLE codec (spec §4.2 "Float/Double"): binary IEEE-754 LE,
//! text via decimal parse.

use crate::io::{Buf, BufMut};
use crate::protocol::ColumnType;

use super::{Codec, ColumnContext, Format, Value};

pub struct FloatCodec;

impl Codec for FloatCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(column.column_type, ColumnType::FLOAT | ColumnType::DOUBLE)
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Float(_) | Value::Double(_))
    }

    fn decode(&self, mut buf: &[u8], column: &ColumnContext, format: Format) -> crate::Result<Value> {
        if format == Format::Text {
            let text = std::str::from_utf8(buf)?;
            let parsed: f64 = text
                .parse()
                .map_err(|_| protocol_err!("malformed float literal: {:?}", text))?;

            return Ok(if column.column_type == ColumnType::FLOAT {
                Value::Float(parsed as f32)
            } else {
                Value::Double(parsed)
            });
        }

        Ok(match column.column_type {
            ColumnType::FLOAT => Value::Float(buf.get_f32()?),
            ColumnType::DOUBLE => Value::Double(buf.get_f64()?),
            _ => return Err(protocol_err!("not a float column type: {}", column.column_type.name())),
        })
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, format: Format) {
        match (value, format) {
            (Value::Float(v), Format::Binary) => out.put_f32(*v),
            (Value::Double(v), Format::Binary) => out.put_f64(*v),
            (Value::Float(v), Format::Text) => out.put_str(&v.to_string()),
            (Value::Double(v), Format::Text) => out.put_str(&v.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FieldFlags;

    fn column(column_type: ColumnType) -> ColumnContext {
        ColumnContext { column_type, flags: FieldFlags::empty(), display_length: 0 }
    }

    #[test]
    fn decodes_double_binary() {
        let codec = FloatCodec;
        let mut buf = Vec::new();
        buf.put_f64(3.5);
        let value = codec.decode(&buf, &column(ColumnType::DOUBLE), Format::Binary).unwrap();
        assert_eq!(value, Value::Double(3.5));
    }

    #[test]
    fn decodes_float_text() {
        let codec = FloatCodec;
        let value = codec.decode(b"2.25", &column(ColumnType::FLOAT), Format::Text).unwrap();
        assert_eq!(value, Value::Float(2.25));
    }
}
