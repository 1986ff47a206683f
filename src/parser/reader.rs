//! Structured-field reader.
//!
//! Splits a raw AFP byte stream into an ordered sequence of structured
//! fields. Each record is a 9-byte header followed by its payload:
//!
//! ```text
//! [0x5a][length: u16 BE][type code: u24 BE][3 reserved bytes][payload]
//! ```
//!
//! The length field does not count the control byte, so a record spans
//! `length + 1` bytes and the payload is `length + 1 - 9` bytes long.

use serde::{Deserialize, Serialize};

use crate::consts::{field_name, is_known_field};
use crate::detect::{CONTROL_BYTE, HEADER_LEN};
use crate::error::{Error, Result};

use super::options::ErrorMode;

/// One structured field: a type code and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredField {
    /// 24-bit type code
    pub id: u32,
    /// Payload bytes, header excluded
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,
}

impl StructuredField {
    /// Create a structured field from a type code and payload.
    pub fn new(id: u32, data: Vec<u8>) -> Self {
        Self { id, data }
    }

    /// Descriptive name of the field type, if known.
    pub fn name(&self) -> Option<&'static str> {
        field_name(self.id)
    }
}

/// Reader over a fully resident AFP byte stream.
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
    error_mode: ErrorMode,
    unknown_fields: u32,
}

impl<'a> FieldReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8], error_mode: ErrorMode) -> Self {
        Self {
            data,
            pos: 0,
            error_mode,
            unknown_fields: 0,
        }
    }

    /// Read every record in the stream.
    ///
    /// Returns the ordered field list and the number of unknown fields
    /// retained in permissive mode. Reading stops cleanly at end of
    /// stream only on a record boundary; anything shorter than a full
    /// record is a [`Error::TruncatedRecord`].
    pub fn read_all(mut self) -> Result<(Vec<StructuredField>, u32)> {
        let mut fields = Vec::new();
        while let Some(field) = self.read_field()? {
            fields.push(field);
        }
        Ok((fields, self.unknown_fields))
    }

    fn read_field(&mut self) -> Result<Option<StructuredField>> {
        let offset = self.pos;
        let remaining = &self.data[offset..];
        if remaining.is_empty() {
            return Ok(None);
        }
        if remaining.len() < HEADER_LEN {
            return Err(Error::TruncatedRecord { offset });
        }

        if remaining[0] != CONTROL_BYTE {
            return Err(Error::BadControlByte {
                offset,
                found: remaining[0],
            });
        }

        // Add one: the declared length does not cover the control byte.
        let record_len = u16::from_be_bytes([remaining[1], remaining[2]]) as usize + 1;
        let id = u32::from_be_bytes([0, remaining[3], remaining[4], remaining[5]]);

        let payload_len = record_len
            .checked_sub(HEADER_LEN)
            .ok_or(Error::TruncatedRecord { offset })?;
        if remaining.len() < HEADER_LEN + payload_len {
            return Err(Error::TruncatedRecord { offset });
        }

        log::debug!(
            "field at {}: 0x{:06x} {}",
            offset,
            id,
            field_name(id).unwrap_or("-Unknown-")
        );

        if !is_known_field(id) {
            match self.error_mode {
                ErrorMode::Strict => return Err(Error::UnknownField(id)),
                ErrorMode::Permissive => {
                    self.unknown_fields += 1;
                    log::warn!("unknown structured field 0x{:06x} at offset {}", id, offset);
                }
            }
        }

        let data = remaining[HEADER_LEN..HEADER_LEN + payload_len].to_vec();
        self.pos += HEADER_LEN + payload_len;
        Ok(Some(StructuredField::new(id, data)))
    }
}
