//! BLOB/GEOMETRY catch-all codec: raw bytes, passed through unchanged.
//! Placed last in the registry so every other codec gets first refusal.

use crate::io::BufMut;
use crate::protocol::ColumnType;

use super::{Codec, ColumnContext, Format, Value};

pub struct BlobCodec;

impl Codec for BlobCodec {
    fn can_decode(&self, column: &ColumnContext) -> bool {
        matches!(
            column.column_type,
            ColumnType::TINY_BLOB
                | ColumnType::MEDIUM_BLOB
                | ColumnType::LONG_BLOB
                | ColumnType::BLOB
                | ColumnType::GEOMETRY
        )
    }

    fn can_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Bytes(_))
    }

    fn decode(&self, buf: &[u8], _column: &ColumnContext, _format: Format) -> crate::Result<Value> {
        Ok(Value::Bytes(buf.to_vec()))
    }

    fn encode(&self, out: &mut Vec<u8>, value: &Value, _format: Format) {
        let Value::Bytes(bytes) = value else { return };
        out.put_bytes_lenenc(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FieldFlags;

    #[test]
    fn decodes_blob_bytes_verbatim() {
        let codec = BlobCodec;
        let column = ColumnContext {
            column_type: ColumnType::BLOB,
            flags: FieldFlags::empty(),
            display_length: 0,
        };
        let value = codec.decode(&[1, 2, 3], &column, Format::Binary).unwrap();
        assert_eq!(value, Value::Bytes(vec![1, 2, 3]));
    }
}
