//! Text and binary result rows (spec §4.3 "Server Message Parser",
//! "Text rows"/"Binary rows").
//!
//! Grounded on `sqlx-core/src/mysql/protocol/row.rs`, generalized from a
//! single hard-coded `TypeId` match into one driven by
//! [`ColumnType::fixed_binary_width`] plus the handful of
//! self-length-prefixed temporal/variable types spec §4.3 calls out.

use crate::io::Buf;
use crate::protocol::ColumnType;

/// One decoded row. Each column is either `None` (SQL NULL) or the raw
/// column bytes in whichever format (text or binary) the row was decoded
/// in — codec resolution and host-value conversion happen one layer up,
/// in [`crate::codec`].
#[derive(Debug, Clone)]
pub struct Row {
    columns: Box<[Option<Box<[u8]>>]>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.columns[index].as_deref()
    }

    /// Decodes a text-protocol row: every column is a length-encoded
    /// string, or `0xFB` for NULL.
    pub fn decode_text(mut buf: &[u8], column_count: usize) -> crate::Result<Row> {
        let mut columns = Vec::with_capacity(column_count);

        for _ in 0..column_count {
            match buf.get_bytes_lenenc()? {
                Some(bytes) => columns.push(Some(bytes.to_vec().into_boxed_slice())),
                None => columns.push(None),
            }
        }

        Ok(Row {
            columns: columns.into_boxed_slice(),
        })
    }

    /// Decodes a binary-protocol row: leading `0x00`, a null bitmap of
    /// `ceil((column_count + 2) / 8)` bytes offset by 2, then columns
    /// concatenated with type-specific widths.
    pub fn decode_binary(mut buf: &[u8], column_types: &[ColumnType]) -> crate::Result<Row> {
        let header = buf.get_u8()?;
        if header != 0x00 {
            return Err(protocol_err!(
                "expected binary ROW header (0x00); received 0x{:X}",
                header
            ));
        }

        let null_bitmap_len = (column_types.len() + 2 + 7) / 8;
        let null_bitmap = buf.get_bytes(null_bitmap_len)?;

        let mut columns = Vec::with_capacity(column_types.len());

        for (index, column_type) in column_types.iter().enumerate() {
            let bit_index = index + 2;
            let is_null = null_bitmap[bit_index / 8] & (1 << (bit_index % 8)) != 0;

            if is_null {
                columns.push(None);
                continue;
            }

            let value = read_binary_value(&mut buf, *column_type)?;
            columns.push(Some(value));
        }

        Ok(Row {
            columns: columns.into_boxed_slice(),
        })
    }
}

fn read_binary_value<'a>(buf: &mut &'a [u8], column_type: ColumnType) -> crate::Result<Box<[u8]>> {
    if let Some(width) = column_type.fixed_binary_width() {
        return Ok(buf.get_bytes(width)?.to_vec().into_boxed_slice());
    }

    match column_type {
        // MEDIUMINT is wire-encoded on 3 bytes plus 1 padding byte (spec §4.2).
        ColumnType::INT24 => Ok(buf.get_bytes(4)?.to_vec().into_boxed_slice()),

        // DATE/TIME/DATETIME/TIMESTAMP are self-length-prefixed on the
        // wire: a single length byte followed by that many field bytes
        // (spec §4.2). The length byte itself is consumed here and not
        // part of the stored value — the temporal decoders key off
        // `buf.is_empty()`/`buf.remaining()` on the body alone.
        ColumnType::DATE
        | ColumnType::TIME
        | ColumnType::DATETIME
        | ColumnType::TIMESTAMP
        | ColumnType::NEWDATE => {
            let len = buf.get_u8()? as usize;
            Ok(buf.get_bytes(len)?.to_vec().into_boxed_slice())
        }

        // Everything else (VARCHAR/STRING/BLOB/JSON/DECIMAL/BIT/ENUM/SET/...)
        // is a plain `lenenc`-prefixed byte string.
        _ => {
            let bytes = buf
                .get_bytes_lenenc()?
                .ok_or_else(|| protocol_err!("unexpected NULL in non-nullable binary column"))?;
            Ok(bytes.to_vec().into_boxed_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_row_with_null() {
        // "abc", NULL, "1"
        let buf: &[u8] = &[3, b'a', b'b', b'c', 0xFB, 1, b'1'];
        let row = Row::decode_text(buf, 3).unwrap();

        assert_eq!(row.get(0), Some(&b"abc"[..]));
        assert_eq!(row.get(1), None);
        assert_eq!(row.get(2), Some(&b"1"[..]));
    }

    #[test]
    fn decodes_binary_row_tiny_and_null() {
        // column 0: TINY = 5, column 1: NULL
        let null_bitmap = 1u8 << ((1 + 2) % 8);
        let buf: &[u8] = &[0x00, null_bitmap, 5];
        let row = Row::decode_binary(buf, &[ColumnType::TINY, ColumnType::TINY]).unwrap();

        assert_eq!(row.get(0), Some(&[5u8][..]));
        assert_eq!(row.get(1), None);
    }

    #[test]
    fn decodes_binary_time_zero_length() {
        let buf: &[u8] = &[0x00, 0x00, 0x00];
        let row = Row::decode_binary(buf, &[ColumnType::TIME]).unwrap();
        assert_eq!(row.get(0), Some(&[][..]));
    }

    #[test]
    fn decodes_binary_date_with_body_only_no_length_prefix() {
        // column: DATE, length byte 4, then year=2024 (LE u16), month=3, day=9
        let buf: &[u8] = &[0x00, 0x00, 4, 0xE8, 0x07, 3, 9];
        let row = Row::decode_binary(buf, &[ColumnType::DATE]).unwrap();
        assert_eq!(row.get(0), Some(&[0xE8, 0x07, 3, 9][..]));
    }
}
