//! DECIMAL/OLDDECIMAL codec (spec §4.2 "BigDecimal"): the server always
//! wire-encodes these as text digits prefixed with a length-encoded
//! length, in both the text and binary row protocols.
//!
//! Grounded on `sqlx-core/src/mysql/types/bigdecimal.rs`'s text-digit
//! round trip through `bigdecimal::BigDecimal::from_str`/`to_string`.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::io::BufMut;
use crate::protocol::ColumnType;

use super::{Codec, ColumnContext, Format, Value};

pub struct DecimalCodec;

impl Codec for DecimalCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(column.column_type, ColumnType::DECIMAL | ColumnType::NEWDECIMAL)
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Decimal(_))
    }

    fn decode(&self, buf: &[u8], _column: &ColumnContext, _format: Format) -> crate::Result<Value> {
        let text = std::str::from_utf8(buf)?;
        let decimal = BigDecimal::from_str(text)
            .map_err(|_| protocol_err!("invalid DECIMAL literal: {}", text))?;
        Ok(Value::Decimal(decimal))
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, format: Format) {
        let Value::Decimal(decimal) = value else { return };
        let text = decimal.to_string();

        match format {
            Format::Binary => out.put_str_lenenc(&text),
            Format::Text => out.put_str(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FieldFlags;

    #[test]
    fn decodes_decimal_text_verbatim() {
        let codec = DecimalCodec;
        let column = ColumnContext {
            column_type: ColumnType::NEWDECIMAL,
            flags: FieldFlags::empty(),
            display_length: 0,
        };
        let value = codec.decode(b"123.450", &column, Format::Binary).unwrap();
        assert_eq!(value, Value::Decimal(BigDecimal::from_str("123.450").unwrap()));
    }

    #[test]
    fn encodes_decimal_as_text_digits() {
        let codec = DecimalCodec;
        let mut out = Vec::new();
        codec.encode(&mut out, &Value::Decimal(BigDecimal::from_str("42.5").unwrap()), Format::Text);
        assert_eq!(out, b"42.5");
    }
}
