//! Column count packet preceding a result set's column definitions
//! (spec §4.3).

use crate::io::Buf;

#[derive(Debug, Clone, Copy)]
pub struct ColumnCount(pub u64);

impl ColumnCount {
    pub fn read(mut buf: &[u8]) -> crate::Result<ColumnCount> {
        let count = buf
            .get_uint_lenenc()?
            .ok_or_else(|| protocol_err!("column count packet carried a NULL length"))?;
        Ok(ColumnCount(count))
    }
}
