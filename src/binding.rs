//! Parameter bindings for `COM_STMT_EXECUTE` (spec §3 "Binding").
//!
//! A dense mapping from parameter index to an encoded value. `validate`
//! must be called before the binding is handed to [`protocol::com::ComStmtExecute`](crate::protocol::com::ComStmtExecute)
//! — every declared index in `[0, expected_size)` must be bound, or the
//! statement fails with a "parameter missing" error rather than being
//! silently sent with gaps.

use crate::codec::Value;
use crate::error::Error;
use crate::protocol::ColumnType;

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    column_type: ColumnType,
    is_unsigned: bool,
}

/// Holds the parameters for one `COM_STMT_EXECUTE`, built up by index.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    expected_size: usize,
    slots: Vec<Option<Slot>>,
}

impl Binding {
    pub fn with_capacity(expected_size: usize) -> Binding {
        Binding {
            expected_size,
            slots: vec![None; expected_size],
        }
    }

    pub fn bind(&mut self, index: usize, value: Value, column_type: ColumnType, is_unsigned: bool) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(Slot {
            value,
            column_type,
            is_unsigned,
        });
    }

    /// Every declared index `[0, expected_size)` must be bound.
    pub fn validate(&self) -> crate::Result<()> {
        if self.slots.len() < self.expected_size {
            return Err(Error::Configuration(format!(
                "parameter missing: expected {} parameters, {} bound",
                self.expected_size,
                self.slots.len()
            )));
        }

        for (index, slot) in self.slots.iter().enumerate().take(self.expected_size) {
            if slot.is_none() {
                return Err(Error::Configuration(format!(
                    "parameter missing at index {index}"
                )));
            }
        }

        Ok(())
    }

    /// Encodes the null bitmap, parameter types, and binary-encoded
    /// values in the layout `COM_STMT_EXECUTE` expects (spec §4.2
    /// "Encoding rules", "Null encoding").
    pub fn encode_binary(&self) -> crate::Result<(Vec<u8>, Vec<(ColumnType, bool)>, Vec<u8>)> {
        self.validate()?;

        let null_bitmap_len = (self.expected_size + 7) / 8;
        let mut null_bitmap = vec![0u8; null_bitmap_len];
        let mut types = Vec::with_capacity(self.expected_size);
        let mut values = Vec::new();

        for (index, slot) in self.slots.iter().enumerate().take(self.expected_size) {
            let slot = slot.as_ref().expect("validated above");
            types.push((slot.column_type, slot.is_unsigned));

            if matches!(slot.value, Value::Null) {
                null_bitmap[index / 8] |= 1 << (index % 8);
            } else {
                crate::codec::encode_binary_param(&mut values, &slot.value, slot.column_type)?;
            }
        }

        Ok((null_bitmap, types, values))
    }

    /// Renders each bound value as an escaped SQL text literal, in
    /// index order, for client-side substitution into a plain
    /// `COM_QUERY` string rather than a prepared `COM_STMT_EXECUTE`
    /// (spec §4.2 "Encoding rules", text branch). `no_backslash_escapes`
    /// should reflect the session's `NO_BACKSLASH_ESCAPES` SQL mode.
    pub fn encode_text(&self, no_backslash_escapes: bool) -> crate::Result<Vec<String>> {
        self.validate()?;

        Ok(self
            .slots
            .iter()
            .take(self.expected_size)
            .map(|slot| {
                let slot = slot.as_ref().expect("validated above");
                crate::codec::encode_text_param(&slot.value, no_backslash_escapes)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_fails_when_a_slot_is_missing() {
        let mut binding = Binding::with_capacity(2);
        binding.bind(0, Value::Int(1), ColumnType::LONG, false);
        assert!(binding.validate().is_err());
    }

    #[test]
    fn validate_succeeds_when_fully_bound() {
        let mut binding = Binding::with_capacity(2);
        binding.bind(0, Value::Int(1), ColumnType::LONG, false);
        binding.bind(1, Value::Null, ColumnType::LONG, false);
        assert!(binding.validate().is_ok());
    }

    #[test]
    fn null_binding_sets_bitmap_and_emits_no_payload() {
        let mut binding = Binding::with_capacity(1);
        binding.bind(0, Value::Null, ColumnType::LONG, false);

        let (null_bitmap, _types, values) = binding.encode_binary().unwrap();
        assert_eq!(null_bitmap[0] & 1, 1);
        assert!(values.is_empty());
    }

    #[test]
    fn encode_text_escapes_strings_and_passes_null_through() {
        let mut binding = Binding::with_capacity(2);
        binding.bind(0, Value::String("O'Brien".to_owned()), ColumnType::VARCHAR, false);
        binding.bind(1, Value::Null, ColumnType::VARCHAR, false);

        let rendered = binding.encode_text(false).unwrap();
        assert_eq!(rendered, vec!["'O\\'Brien'".to_owned(), "NULL".to_owned()]);
    }
}
