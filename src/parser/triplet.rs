//! Tag Logical Element triplet parsing.
//!
//! A TLE payload is a run of self-describing triplets: one byte of total
//! length, one byte of triplet code, then code-specific data. Code 0x02
//! (Fully Qualified Name) carries a candidate key and code 0x36
//! (Attribute Value) a candidate value, both EBCDIC text behind a
//! two-byte code-specific prefix. Whenever both a key and a value are at
//! hand the pair is written to the map, a repeated key overwriting its
//! earlier entry. All other triplet codes are skipped.

use std::collections::HashMap;

use crate::encoding::ebcdic_to_string;
use crate::parser::StructuredField;

/// Fully Qualified Name triplet.
const TRIPLET_FQN: u8 = 0x02;
/// Attribute Value triplet.
const TRIPLET_ATTRIBUTE_VALUE: u8 = 0x36;

/// Parse the triplets of one or more Tag Logical Element fields into a
/// string map.
pub fn parse_triplets<'a, I>(fields: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = &'a StructuredField>,
{
    let mut tags = HashMap::new();

    for field in fields {
        let payload = &field.data;
        let mut offset = 0;
        let mut key: Option<String> = None;
        let mut value: Option<String> = None;

        while offset < payload.len() {
            let length = payload[offset] as usize;
            if length < 2 || offset + 1 >= payload.len() {
                log::warn!("malformed triplet at offset {}; stopping scan", offset);
                break;
            }
            let code = payload[offset + 1];
            let end = (offset + length).min(payload.len());
            let data = &payload[offset + 2..end];
            offset += length;

            match code {
                // Two bytes of FQN type and format precede the name.
                TRIPLET_FQN if data.len() >= 2 => {
                    key = Some(ebcdic_to_string(&data[2..]));
                }
                // Two reserved bytes precede the value.
                TRIPLET_ATTRIBUTE_VALUE if data.len() >= 2 => {
                    value = Some(ebcdic_to_string(&data[2..]));
                }
                _ => {}
            }

            if let (Some(k), Some(v)) = (&key, &value) {
                if !k.is_empty() && !v.is_empty() {
                    tags.insert(k.clone(), v.clone());
                }
            }
        }
    }

    tags
}
