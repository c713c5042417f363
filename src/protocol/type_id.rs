//! Server data type enum (spec §3 "ColumnDefinition").

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnType(pub u8);

impl ColumnType {
    pub const DECIMAL: ColumnType = ColumnType(0);
    pub const TINY: ColumnType = ColumnType(1);
    pub const SHORT: ColumnType = ColumnType(2);
    pub const LONG: ColumnType = ColumnType(3);
    pub const FLOAT: ColumnType = ColumnType(4);
    pub const DOUBLE: ColumnType = ColumnType(5);
    pub const NULL: ColumnType = ColumnType(6);
    pub const TIMESTAMP: ColumnType = ColumnType(7);
    pub const LONGLONG: ColumnType = ColumnType(8);
    pub const INT24: ColumnType = ColumnType(9);
    pub const DATE: ColumnType = ColumnType(10);
    pub const TIME: ColumnType = ColumnType(11);
    pub const DATETIME: ColumnType = ColumnType(12);
    pub const YEAR: ColumnType = ColumnType(13);
    pub const NEWDATE: ColumnType = ColumnType(14);
    pub const VARCHAR: ColumnType = ColumnType(15);
    pub const BIT: ColumnType = ColumnType(16);
    pub const JSON: ColumnType = ColumnType(245);
    pub const NEWDECIMAL: ColumnType = ColumnType(246);
    pub const ENUM: ColumnType = ColumnType(247);
    pub const SET: ColumnType = ColumnType(248);
    pub const TINY_BLOB: ColumnType = ColumnType(249);
    pub const MEDIUM_BLOB: ColumnType = ColumnType(250);
    pub const LONG_BLOB: ColumnType = ColumnType(251);
    pub const BLOB: ColumnType = ColumnType(252);
    pub const VAR_STRING: ColumnType = ColumnType(253);
    pub const STRING: ColumnType = ColumnType(254);
    pub const GEOMETRY: ColumnType = ColumnType(255);

    pub fn name(self) -> &'static str {
        match self {
            Self::DECIMAL => "DECIMAL",
            Self::TINY => "TINYINT",
            Self::SHORT => "SMALLINT",
            Self::LONG => "INTEGER",
            Self::FLOAT => "FLOAT",
            Self::DOUBLE => "DOUBLE",
            Self::NULL => "NULL",
            Self::TIMESTAMP => "TIMESTAMP",
            Self::LONGLONG => "BIGINT",
            Self::INT24 => "MEDIUMINT",
            Self::DATE => "DATE",
            Self::TIME => "TIME",
            Self::DATETIME => "DATETIME",
            Self::YEAR => "YEAR",
            Self::NEWDATE => "NEWDATE",
            Self::VARCHAR => "VARCHAR",
            Self::BIT => "BIT",
            Self::JSON => "JSON",
            Self::NEWDECIMAL => "DECIMAL",
            Self::ENUM => "ENUM",
            Self::SET => "SET",
            Self::TINY_BLOB => "TINYBLOB",
            Self::MEDIUM_BLOB => "MEDIUMBLOB",
            Self::LONG_BLOB => "LONGBLOB",
            Self::BLOB => "BLOB",
            Self::VAR_STRING => "VARSTRING",
            Self::STRING => "STRING",
            Self::GEOMETRY => "GEOMETRY",
            _ => "UNKNOWN",
        }
    }

    /// Fixed binary-protocol row width in bytes, or `None` if the column
    /// carries a length-encoded (variable) payload instead (spec §4.3
    /// "Binary rows").
    pub fn fixed_binary_width(self) -> Option<usize> {
        match self {
            Self::TINY => Some(1),
            Self::SHORT | Self::YEAR => Some(2),
            Self::LONG | Self::INT24 | Self::FLOAT => Some(4),
            Self::LONGLONG | Self::DOUBLE => Some(8),
            _ => None,
        }
    }
}
