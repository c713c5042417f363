//! Column-definition packet (spec §3 "ColumnDefinition", §4.3).
//!
//! Grounded on `sqlx-core/src/mysql/protocol/column_def.rs`.

use crate::io::Buf;
use crate::protocol::{ColumnType, FieldFlags};

#[derive(Debug, Clone)]
pub struct ColumnDefinition {
    pub catalog: Box<str>,
    pub schema: Box<str>,
    pub table: Box<str>,
    pub original_table: Box<str>,
    pub name: Box<str>,
    pub original_name: Box<str>,
    pub collation: u16,
    pub display_length: u32,
    pub column_type: ColumnType,
    pub flags: FieldFlags,
    pub decimals: u8,
}

impl ColumnDefinition {
    pub fn read(mut buf: &[u8]) -> crate::Result<ColumnDefinition> {
        let catalog = buf.get_str_lenenc()?.unwrap_or_default().into();
        let schema = buf.get_str_lenenc()?.unwrap_or_default().into();
        let table = buf.get_str_lenenc()?.unwrap_or_default().into();
        let original_table = buf.get_str_lenenc()?.unwrap_or_default().into();
        let name = buf.get_str_lenenc()?.unwrap_or_default().into();
        let original_name = buf.get_str_lenenc()?.unwrap_or_default().into();

        let fixed_len = buf.get_uint_lenenc()?.unwrap_or(0);
        if fixed_len != 0x0c {
            return Err(protocol_err!(
                "expected ColumnDefinition fixed-length field (0x0c); received {:?}",
                fixed_len
            ));
        }

        let collation = buf.get_u16()?;
        let display_length = buf.get_u32()?;
        let column_type = ColumnType(buf.get_u8()?);
        let flags = FieldFlags::from_bits_truncate(buf.get_u16()?);
        let decimals = buf.get_u8()?;

        Ok(ColumnDefinition {
            catalog,
            schema,
            table,
            original_table,
            name,
            original_name,
            collation,
            display_length,
            column_type,
            flags,
            decimals,
        })
    }
}
