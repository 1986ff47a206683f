//! Presentation-text (PTOCA) instruction decoding.
//!
//! A presentation-text payload is a chained instruction stream. An
//! unchained instruction opens with the two-byte escape sequence 0x2bd3;
//! a chained one follows its predecessor directly. Either way the
//! instruction is one byte of length, one byte of function code and
//! `length - 2` bytes of function data, with the low bit of the function
//! code signalling whether the next instruction is chained.
//!
//! The decoder keeps four registers (inline position, baseline position,
//! color, orientation), all reset at the start of each payload, and
//! emits positioned text and rule elements in instruction order.

use crate::consts::{clut_lookup, function_name, ptoca, PTOCA_ESCAPE};
use crate::error::{Error, Result};
use crate::model::{Element, Orientation, RuleAxis, DEVICE_DEFAULT_COLOR};

/// Big-endian unsigned integer over an arbitrary-width field.
fn be_uint(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Decoder for presentation-text payloads.
///
/// One decoder can process any number of payloads; register state is
/// per-payload, while the skipped-function count accumulates across
/// calls as a diagnostic.
#[derive(Debug, Default)]
pub struct PtocaDecoder {
    /// Functions outside the catalog that were skipped
    pub skipped_functions: u32,
}

impl PtocaDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one presentation-text payload into its elements.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<Element>> {
        let mut inline = 0u32;
        let mut baseline = 0u32;
        let mut color = DEVICE_DEFAULT_COLOR;
        let mut orientation = Orientation::default();

        let mut elements = Vec::new();
        let mut offset = 0usize;
        let mut chained = false;

        while offset < data.len() {
            if !chained {
                if data.len() - offset < 2 {
                    return Err(Error::TruncatedRecord { offset });
                }
                let escape = u16::from_be_bytes([data[offset], data[offset + 1]]);
                if escape != PTOCA_ESCAPE {
                    return Err(Error::BadEscapeSequence(escape));
                }
                offset += 2;
            }

            if data.len() - offset < 2 {
                return Err(Error::TruncatedRecord { offset });
            }
            let length = data[offset] as usize;
            let function = data[offset + 1];
            offset += 2;

            // Length counts its own byte and the function code.
            let data_len = length
                .checked_sub(2)
                .ok_or(Error::TruncatedRecord { offset })?;
            if data.len() - offset < data_len {
                return Err(Error::TruncatedRecord { offset });
            }
            let function_data = &data[offset..offset + data_len];
            offset += data_len;

            match function & !1 {
                ptoca::STO => {
                    if function_data.len() < 4 {
                        return Err(Error::TruncatedRecord { offset });
                    }
                    let first = u16::from_be_bytes([function_data[0], function_data[1]]);
                    let second = u16::from_be_bytes([function_data[2], function_data[3]]);
                    orientation = match (first, second) {
                        (i, 0) if i != 0 => Orientation::Landscape,
                        (0, b) if b != 0 => Orientation::Portrait,
                        (i, b) => {
                            return Err(Error::BadOrientation {
                                inline: i,
                                baseline: b,
                            })
                        }
                    };
                }

                ptoca::AMB => baseline = be_uint(function_data),
                ptoca::AMI => inline = be_uint(function_data),

                // Relative moves are recognized but intentionally leave
                // the position registers unchanged.
                ptoca::RMB | ptoca::RMI => {}

                ptoca::STC => {
                    let code = be_uint(function_data) as u16;
                    color = clut_lookup(code).ok_or(Error::UnknownColorCode(code))?;
                }

                ptoca::SEC => {
                    if function_data.len() < 13 {
                        return Err(Error::TruncatedRecord { offset });
                    }
                    if function_data[0] != 0 || function_data[1] != 1 {
                        return Err(Error::UnsupportedColorSpace(function_data[1]));
                    }
                    color = be_uint(&function_data[10..13]);
                }

                ptoca::TRN => {
                    let text = crate::encoding::ebcdic_to_string(function_data)
                        .replace(['\u{16}', '\u{91}'], "'");
                    elements.push(Element::text(inline, baseline, color, orientation, text));
                }

                ptoca::DBR | ptoca::DIR => {
                    if function_data.len() < 5 {
                        return Err(Error::TruncatedRecord { offset });
                    }
                    let axis = if function & !1 == ptoca::DBR {
                        RuleAxis::BAxis
                    } else {
                        RuleAxis::IAxis
                    };
                    let rule_length = u16::from_be_bytes([function_data[0], function_data[1]]);
                    let rule_width =
                        i16::from_be_bytes([function_data[2], function_data[3]]);
                    let fraction = function_data[4];
                    elements.push(Element::rule(
                        inline,
                        baseline,
                        color,
                        axis,
                        rule_length,
                        rule_width,
                        fraction,
                    ));
                }

                ptoca::NOP | ptoca::SCFL | ptoca::SIA | ptoca::SVI => {}

                _ => {
                    self.skipped_functions += 1;
                    log::warn!(
                        "skipping presentation-text function 0x{:02x} ({})",
                        function,
                        function_name(function).unwrap_or("unknown")
                    );
                }
            }

            chained = function & 1 == 1;
        }

        if chained {
            return Err(Error::DanglingChain);
        }

        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    /// Build one instruction, escape included when unchained.
    fn instr(chained_self: bool, code: u8, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        if !chained_self {
            out.extend_from_slice(&PTOCA_ESCAPE.to_be_bytes());
        }
        out.push((data.len() + 2) as u8);
        out.push(code);
        out.extend_from_slice(data);
        out
    }

    fn decode(payload: &[u8]) -> Result<Vec<Element>> {
        PtocaDecoder::new().decode(payload)
    }

    #[test]
    fn test_transparent_data_at_position() {
        let mut payload = instr(false, ptoca::AMI | 1, &[0x00, 0x0a]);
        payload.extend(instr(true, ptoca::AMB | 1, &[0x00, 0x14]));
        // EBCDIC "AB"
        payload.extend(instr(true, ptoca::TRN, &[0xc1, 0xc2]));

        let elements = decode(&payload).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].position(), (10, 20));
        assert_eq!(elements[0].text_content(), Some("AB"));
    }

    #[test]
    fn test_registers_reset_per_payload() {
        let mut decoder = PtocaDecoder::new();
        let mut payload = instr(false, ptoca::AMI | 1, &[0x00, 0x63]);
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let first = decoder.decode(&payload).unwrap();
        assert_eq!(first[0].inline, 99);

        let second = decoder.decode(&instr(false, ptoca::TRN, &[0xc1])).unwrap();
        assert_eq!(second[0].inline, 0);
        assert_eq!(second[0].color, DEVICE_DEFAULT_COLOR);
    }

    #[test]
    fn test_orientation_nonzero_first_is_landscape() {
        let mut payload = instr(false, ptoca::STO | 1, &[0x00, 0x64, 0x00, 0x00]);
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let elements = decode(&payload).unwrap();
        assert_eq!(
            elements[0].kind,
            ElementKind::Text {
                text: "A".into(),
                orientation: Orientation::Landscape
            }
        );
    }

    #[test]
    fn test_orientation_nonzero_second_is_portrait() {
        let mut payload = instr(false, ptoca::STO | 1, &[0x00, 0x00, 0x00, 0x64]);
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let elements = decode(&payload).unwrap();
        assert!(matches!(
            &elements[0].kind,
            ElementKind::Text {
                orientation: Orientation::Portrait,
                ..
            }
        ));
    }

    #[test]
    fn test_orientation_both_zero_fails() {
        let payload = instr(false, ptoca::STO, &[0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(
            decode(&payload),
            Err(Error::BadOrientation {
                inline: 0,
                baseline: 0
            })
        ));
    }

    #[test]
    fn test_orientation_both_nonzero_fails() {
        let payload = instr(false, ptoca::STO, &[0x00, 0x64, 0x00, 0x64]);
        assert!(matches!(decode(&payload), Err(Error::BadOrientation { .. })));
    }

    #[test]
    fn test_set_text_color() {
        let mut payload = instr(false, ptoca::STC | 1, &[0x00, 0x02]);
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let elements = decode(&payload).unwrap();
        assert_eq!(elements[0].color, 0xff0000);
    }

    #[test]
    fn test_unknown_color_code() {
        let payload = instr(false, ptoca::STC, &[0x00, 0x42]);
        assert!(matches!(
            decode(&payload),
            Err(Error::UnknownColorCode(0x42))
        ));
    }

    #[test]
    fn test_set_extended_text_color() {
        let mut data = vec![0u8; 13];
        data[1] = 1; // RGB color space
        data[10] = 0x19;
        data[11] = 0x7f;
        data[12] = 0x33;
        let mut payload = instr(false, ptoca::SEC | 1, &data);
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let elements = decode(&payload).unwrap();
        assert_eq!(elements[0].color, 0x197f33);
    }

    #[test]
    fn test_extended_color_bad_color_space() {
        let mut data = vec![0u8; 13];
        data[1] = 2; // CMYK
        let payload = instr(false, ptoca::SEC, &data);
        assert!(matches!(
            decode(&payload),
            Err(Error::UnsupportedColorSpace(2))
        ));
    }

    #[test]
    fn test_extended_color_reserved_byte() {
        let mut data = vec![0u8; 13];
        data[0] = 0xff;
        data[1] = 1;
        let payload = instr(false, ptoca::SEC, &data);
        assert!(matches!(
            decode(&payload),
            Err(Error::UnsupportedColorSpace(_))
        ));
    }

    #[test]
    fn test_quote_substitution() {
        // EBCDIC 0x32 decodes to U+0016 and 0x31 to U+0091; both map to
        // an ASCII apostrophe.
        let payload = instr(false, ptoca::TRN, &[0xc1, 0x32, 0xc2, 0x31]);
        let elements = decode(&payload).unwrap();
        assert_eq!(elements[0].text_content(), Some("A'B'"));
    }

    #[test]
    fn test_draw_rules() {
        let mut payload = instr(false, ptoca::DBR | 1, &[0x01, 0x00, 0xff, 0xfc, 0x02]);
        payload.extend(instr(true, ptoca::DIR, &[0x00, 0x50, 0x00, 0x04, 0x00]));
        let elements = decode(&payload).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0].kind,
            ElementKind::Rule {
                axis: RuleAxis::BAxis,
                length: 256,
                width: -4,
                fraction: 2
            }
        );
        assert_eq!(
            elements[1].kind,
            ElementKind::Rule {
                axis: RuleAxis::IAxis,
                length: 80,
                width: 4,
                fraction: 0
            }
        );
    }

    #[test]
    fn test_relative_moves_leave_registers() {
        let mut payload = instr(false, ptoca::AMI | 1, &[0x00, 0x0a]);
        payload.extend(instr(true, ptoca::RMI | 1, &[0x00, 0x63]));
        payload.extend(instr(true, ptoca::RMB | 1, &[0x00, 0x63]));
        payload.extend(instr(true, ptoca::TRN, &[0xc1]));
        let elements = decode(&payload).unwrap();
        assert_eq!(elements[0].position(), (10, 0));
    }

    #[test]
    fn test_unknown_function_skipped() {
        let mut decoder = PtocaDecoder::new();
        // Repeat String is outside the implemented catalog.
        let mut payload = instr(false, ptoca::RPS | 1, &[0x00, 0x04, 0xc1]);
        payload.extend(instr(true, ptoca::TRN, &[0xc2]));
        let elements = decoder.decode(&payload).unwrap();
        assert_eq!(decoder.skipped_functions, 1);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text_content(), Some("B"));
    }

    #[test]
    fn test_dangling_chain() {
        let payload = instr(false, ptoca::TRN | 1, &[0xc1]);
        assert!(matches!(decode(&payload), Err(Error::DanglingChain)));
    }

    #[test]
    fn test_bad_escape_sequence() {
        let mut payload = vec![0x2b, 0x00];
        payload.extend([0x03, ptoca::NOP, 0x00]);
        assert!(matches!(
            decode(&payload),
            Err(Error::BadEscapeSequence(0x2b00))
        ));
    }

    #[test]
    fn test_empty_payload() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_instruction() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&PTOCA_ESCAPE.to_be_bytes());
        payload.push(0x10); // length promising data that is not there
        payload.push(ptoca::TRN);
        assert!(matches!(decode(&payload), Err(Error::TruncatedRecord { .. })));
    }

    #[test]
    fn test_nop_functions_emit_nothing() {
        let mut payload = instr(false, ptoca::NOP | 1, &[]);
        payload.extend(instr(true, ptoca::SCFL | 1, &[0x01]));
        payload.extend(instr(true, ptoca::SIA | 1, &[0x00, 0x02]));
        payload.extend(instr(true, ptoca::SVI, &[0x00, 0x02]));
        assert!(decode(&payload).unwrap().is_empty());
    }
}
