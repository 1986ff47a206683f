//! EBCDIC text decoding.
//!
//! All character data in an AFP print stream (resource names, tag values,
//! transparent text) is encoded in the EBCDIC international code page 500.
//! That repertoire is not covered by the usual web-encoding crates, so the
//! mapping to Unicode ships here as a fixed 256-entry table.

/// EBCDIC code page 500 to Unicode, indexed by byte value.
const EBCDIC_500: [char; 256] = [
    // 0x00
    '\u{00}', '\u{01}', '\u{02}', '\u{03}', '\u{9c}', '\u{09}', '\u{86}', '\u{7f}',
    '\u{97}', '\u{8d}', '\u{8e}', '\u{0b}', '\u{0c}', '\u{0d}', '\u{0e}', '\u{0f}',
    // 0x10
    '\u{10}', '\u{11}', '\u{12}', '\u{13}', '\u{9d}', '\u{85}', '\u{08}', '\u{87}',
    '\u{18}', '\u{19}', '\u{92}', '\u{8f}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
    // 0x20
    '\u{80}', '\u{81}', '\u{82}', '\u{83}', '\u{84}', '\u{0a}', '\u{17}', '\u{1b}',
    '\u{88}', '\u{89}', '\u{8a}', '\u{8b}', '\u{8c}', '\u{05}', '\u{06}', '\u{07}',
    // 0x30
    '\u{90}', '\u{91}', '\u{16}', '\u{93}', '\u{94}', '\u{95}', '\u{96}', '\u{04}',
    '\u{98}', '\u{99}', '\u{9a}', '\u{9b}', '\u{14}', '\u{15}', '\u{9e}', '\u{1a}',
    // 0x40
    ' ', '\u{a0}', 'â', 'ä', 'à', 'á', 'ã', 'å', 'ç', 'ñ', '[', '.', '<', '(', '+', '!',
    // 0x50
    '&', 'é', 'ê', 'ë', 'è', 'í', 'î', 'ï', 'ì', 'ß', ']', '$', '*', ')', ';', '^',
    // 0x60
    '-', '/', 'Â', 'Ä', 'À', 'Á', 'Ã', 'Å', 'Ç', 'Ñ', '¦', ',', '%', '_', '>', '?',
    // 0x70
    'ø', 'É', 'Ê', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', '`', ':', '#', '@', '\'', '=', '"',
    // 0x80
    'Ø', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', '«', '»', 'ð', 'ý', 'þ', '±',
    // 0x90
    '°', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 'ª', 'º', 'æ', '¸', 'Æ', '¤',
    // 0xa0
    'µ', '~', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '¡', '¿', 'Ð', 'Ý', 'Þ', '®',
    // 0xb0
    '¢', '£', '¥', '·', '©', '§', '¶', '¼', '½', '¾', '¬', '|', '¯', '¨', '´', '×',
    // 0xc0
    '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', '\u{ad}', 'ô', 'ö', 'ò', 'ó', 'õ',
    // 0xd0
    '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', '¹', 'û', 'ü', 'ù', 'ú', 'ÿ',
    // 0xe0
    '\\', '÷', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '²', 'Ô', 'Ö', 'Ò', 'Ó', 'Õ',
    // 0xf0
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '³', 'Û', 'Ü', 'Ù', 'Ú', '\u{9f}',
];

/// Decode EBCDIC code page 500 bytes to a `String`.
///
/// # Example
///
/// ```
/// use unafp::encoding::ebcdic_to_string;
///
/// let text = ebcdic_to_string(b"\xc3\xa4\xa2\xa3\x96\x94\x85\x99\xc9\x95\xd9\xa4\x95");
/// assert_eq!(text, "CustomerInRun");
/// ```
pub fn ebcdic_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| EBCDIC_500[b as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_letters() {
        let text = ebcdic_to_string(b"\xc3\xa4\xa2\xa3\x96\x94\x85\x99\xc9\x95\xd9\xa4\x95");
        assert_eq!(text, "CustomerInRun");
    }

    #[test]
    fn test_decode_digits() {
        assert_eq!(ebcdic_to_string(b"\xf0\xf0\xf1\xf2\xf2"), "00122");
    }

    #[test]
    fn test_decode_punctuation() {
        // 0x40 space, 0x4b period, 0x6b comma, 0x7d apostrophe
        assert_eq!(ebcdic_to_string(b"\x40\x4b\x6b\x7d"), " .,'");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(ebcdic_to_string(b""), "");
    }

    #[test]
    fn test_roundtrip_alphabet() {
        // A-I, J-R, S-Z occupy three discontiguous EBCDIC ranges.
        let upper: Vec<u8> = (0xc1..=0xc9).chain(0xd1..=0xd9).chain(0xe2..=0xe9).collect();
        assert_eq!(ebcdic_to_string(&upper), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }
}
