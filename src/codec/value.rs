//! The tagged value kind codecs decode into and encode out of (spec §9
//! "codec polymorphism ... becomes a tagged variant over value kinds").

use bigdecimal::BigDecimal;

use super::temporal::{DecodedDate, DecodedDateTime, DecodedTime};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    /// The wire encodes `DECIMAL`/`OLDDECIMAL` as length-prefixed ASCII
    /// digits in both protocols; parsed into an arbitrary-precision
    /// `BigDecimal` so integer host conversions never lose scale.
    Decimal(BigDecimal),
    String(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Date(DecodedDate),
    Time(DecodedTime),
    DateTime(DecodedDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
