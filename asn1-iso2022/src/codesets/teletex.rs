//! CCITT T.61 (Teletex) primary and supplementary graphic sets

use asn1_core::CodesetType;

use super::{NE, single, table_decode, table_encode};
use crate::codeset::{registry, CodesetIdentity, GraphicCodeset, REPLACEMENT};

/// Positions of the primary set with no character assigned
const UNASSIGNED: [u8; 6] = [0x5c, 0x5e, 0x60, 0x7b, 0x7d, 0x7e];

/// ISO IR 102, T.61 primary set
///
/// ASCII with the currency sign at 2/4 and six positions left unassigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct Teletex;

impl Teletex {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for Teletex {
    fn registration_number(&self) -> u32 {
        registry::TELETEX
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Teletex {
    fn decode(&self, byte: u8, out: &mut String) {
        let ch = match byte {
            0x24 => '\u{a4}',
            b if UNASSIGNED.contains(&b) => REPLACEMENT,
            b => char::from(b),
        };
        out.push(ch);
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let byte = match single(sequence)? {
            '\u{a4}' => 0x24,
            ch => {
                let b = u8::try_from(ch).ok().filter(|b| (0x20..=0x7f).contains(b))?;
                if b == 0x24 || UNASSIGNED.contains(&b) {
                    return None;
                }
                b
            }
        };
        Some(vec![byte + base])
    }
}

/// Supplementary set, 2/0 to 7/15
///
/// Column 4 holds non-spacing diacritics that combine with a character from
/// another set; they are not mapped.
static SUPPLEMENTARY_MAP: [u16; 96] = [
    NE, 0x00a1, 0x00a2, 0x00a3, 0x0024, 0x00a5, 0x0023, 0x00a7, //
    0x00a4, NE, NE, 0x00ab, NE, NE, NE, NE, //
    0x00b0, 0x00b1, 0x00b2, 0x00b3, 0x00d7, 0x00b5, 0x00b6, 0x00b7, //
    0x00f7, NE, NE, 0x00bb, 0x00bc, 0x00bd, 0x00be, 0x00bf, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    0x2126, 0x00c6, 0x00d0, 0x00aa, 0x0126, NE, 0x0132, 0x013f, //
    0x0141, 0x00d8, 0x0152, 0x00ba, 0x00de, 0x0166, 0x014a, 0x0149, //
    0x0138, 0x00e6, 0x0111, 0x00f0, 0x0127, 0x0131, 0x0133, 0x0140, //
    0x0142, 0x00f8, 0x0153, 0x00df, 0x00fe, 0x0167, 0x014b, NE,
];

/// ISO IR 103, T.61 supplementary set
#[derive(Debug, Clone, Copy, Default)]
pub struct TeletexSupplementary;

impl TeletexSupplementary {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for TeletexSupplementary {
    fn registration_number(&self) -> u32 {
        registry::TELETEX_SUPPLEMENTARY
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for TeletexSupplementary {
    fn decode(&self, byte: u8, out: &mut String) {
        out.push(table_decode(&SUPPLEMENTARY_MAP, byte));
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let byte = table_encode(&SUPPLEMENTARY_MAP, single(sequence)?)?;
        Some(vec![byte + base])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_decode() {
        let teletex = Teletex::new();
        let mut out = String::new();
        for &b in b"a$\\b" {
            teletex.decode(b, &mut out);
        }
        assert_eq!(out, "a\u{a4}\u{fffd}b");
    }

    #[test]
    fn test_primary_encode() {
        let teletex = Teletex::new();
        assert_eq!(teletex.encode(&['\u{a4}'], 0), Some(vec![0x24]));
        assert_eq!(teletex.encode(&['$'], 0), None);
        assert_eq!(teletex.encode(&['{'], 0), None);
        assert_eq!(teletex.encode(&['Z'], 0x80), Some(vec![0xda]));
    }

    #[test]
    fn test_supplementary() {
        let supplementary = TeletexSupplementary::new();
        let mut out = String::new();
        supplementary.decode(0x23, &mut out);
        supplementary.decode(0x7b, &mut out);
        supplementary.decode(0x41, &mut out);
        assert_eq!(out, "\u{a3}\u{df}\u{fffd}");

        assert_eq!(supplementary.encode(&['$'], 0), Some(vec![0x24]));
        assert_eq!(supplementary.encode(&['\u{2126}'], 0), Some(vec![0x60]));
        assert_eq!(supplementary.encode(&['\u{fffd}'], 0), None);
        assert_eq!(supplementary.encode(&['A'], 0), None);
    }
}
