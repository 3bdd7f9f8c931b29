//! Right-hand parts of the ISO 8859 family, backed by `encoding_rs` tables

use asn1_core::CodesetType;
use encoding_rs::Encoding;

use super::single;
use crate::codeset::{CodesetIdentity, GraphicCodeset, REPLACEMENT};

/// A 96-character set taken from the upper half of a single-byte encoding
///
/// Code position `b` (2/0-7/15) corresponds to byte `b | 0x80` of the
/// underlying encoding. Positions the encoding leaves undefined decode to
/// U+FFFD.
#[derive(Debug, Clone, Copy)]
pub struct Iso8859RightHalf {
    number: u32,
    encoding: &'static Encoding,
}

impl Iso8859RightHalf {
    /// Look up a built-in right-hand part by registration number
    pub fn for_registration(number: u32) -> Option<Self> {
        let encoding = match number {
            101 => encoding_rs::ISO_8859_2,
            109 => encoding_rs::ISO_8859_3,
            110 => encoding_rs::ISO_8859_4,
            // 126 is the 1987 Greek set; the 2003 revision (227) only adds
            // three characters to it
            126 | 227 => encoding_rs::ISO_8859_7,
            127 => encoding_rs::ISO_8859_6,
            138 | 198 => encoding_rs::ISO_8859_8,
            144 => encoding_rs::ISO_8859_5,
            // ISO 8859-9 is windows-1254 restricted to A0-FF
            148 => encoding_rs::WINDOWS_1254,
            157 => encoding_rs::ISO_8859_10,
            // TIS 620 is windows-874 restricted to A0-FF
            166 => encoding_rs::WINDOWS_874,
            179 => encoding_rs::ISO_8859_13,
            199 => encoding_rs::ISO_8859_14,
            203 => encoding_rs::ISO_8859_15,
            226 => encoding_rs::ISO_8859_16,
            _ => return None,
        };

        Some(Self { number, encoding })
    }
}

impl CodesetIdentity for Iso8859RightHalf {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G96
    }
}

impl GraphicCodeset for Iso8859RightHalf {
    fn decode(&self, byte: u8, out: &mut String) {
        let input = [byte | 0x80];
        let (text, had_errors) = self.encoding.decode_without_bom_handling(&input);
        if had_errors {
            out.push(REPLACEMENT);
        } else {
            out.push_str(&text);
        }
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let mut buffer = [0u8; 4];
        let text = single(sequence)?.encode_utf8(&mut buffer);

        let (bytes, _, had_errors) = self.encoding.encode(text);
        match *bytes {
            [byte] if !had_errors && byte >= 0xa0 => Some(vec![byte - 0x80 + base]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin9() {
        let latin9 = Iso8859RightHalf::for_registration(203).unwrap();
        assert_eq!(latin9.codeset_type(), CodesetType::G96);
        assert_eq!(latin9.encoding, encoding_rs::ISO_8859_15);

        let mut out = String::new();
        latin9.decode(0x24, &mut out);
        latin9.decode(0x69, &mut out);
        assert_eq!(out, "\u{20ac}\u{e9}");

        assert_eq!(latin9.encode(&['\u{20ac}'], 0x80), Some(vec![0xa4]));
        assert_eq!(latin9.encode(&['\u{a4}'], 0x80), None);
        assert_eq!(latin9.encode(&['A'], 0x80), None);
    }

    #[test]
    fn test_cyrillic() {
        let cyrillic = Iso8859RightHalf::for_registration(144).unwrap();
        let mut out = String::new();
        cyrillic.decode(0x30, &mut out);
        assert_eq!(out, "\u{410}");
        assert_eq!(cyrillic.encode(&['\u{44f}'], 0), Some(vec![0x6f]));
    }

    #[test]
    fn test_undefined_position() {
        let arabic = Iso8859RightHalf::for_registration(127).unwrap();
        let mut out = String::new();
        // 0xA1 is unassigned in ISO 8859-6
        arabic.decode(0x21, &mut out);
        assert_eq!(out, "\u{fffd}");
    }

    #[test]
    fn test_unknown_registration() {
        assert!(Iso8859RightHalf::for_registration(100).is_none());
        assert!(Iso8859RightHalf::for_registration(6).is_none());
    }
}
