//! Boolean interpretation (spec §4.2): true iff the value is non-zero
//! (numeric) or not equal to the string `"0"` (textual). MySQL has no
//! dedicated boolean wire type — `BOOLEAN`/`BOOL` are aliases for
//! `TINY(1)` — so these are plain conversions a caller applies to a
//! [`super::Value::Int`] or text column already decoded by
//! [`super::integer::IntegerCodec`], not a registry entry of their own.

pub fn decode_text_bool(bytes: &[u8]) -> bool {
    bytes != b"0"
}

pub fn decode_numeric_bool(value: i64) -> bool {
    value != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_zero_is_false_everything_else_true() {
        assert!(!decode_text_bool(b"0"));
        assert!(decode_text_bool(b"1"));
        assert!(decode_text_bool(b"00"));
    }

    #[test]
    fn numeric_zero_is_false() {
        assert!(!decode_numeric_bool(0));
        assert!(decode_numeric_bool(-1));
    }
}
