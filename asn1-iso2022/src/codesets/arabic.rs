//! ISO IR 89, ASMO 449 7-bit Arabic

use asn1_core::CodesetType;

use super::single;
use crate::codeset::{registry, CodesetIdentity, GraphicCodeset, REPLACEMENT};

/// Positions shared with ASCII
fn is_shared(byte: u8) -> bool {
    matches!(byte,
        0x20..=0x23 | 0x25..=0x2b | 0x2d..=0x3a | 0x3c..=0x3e | 0x40 | 0x5b..=0x5f | 0x7b..=0x7d)
}

/// Positions carrying Arabic letters, at their Unicode code point minus 0x5E0
fn is_letter(byte: u8) -> bool {
    matches!(byte, 0x41..=0x5a | 0x60..=0x72)
}

const SPECIALS: [(u8, char); 5] = [
    (0x24, '\u{a4}'),
    (0x2c, '\u{60c}'),
    (0x3b, '\u{61b}'),
    (0x3f, '\u{61f}'),
    (0x7e, '\u{203e}'),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Arabic;

impl Arabic {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for Arabic {
    fn registration_number(&self) -> u32 {
        registry::ARABIC
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Arabic {
    fn decode(&self, byte: u8, out: &mut String) {
        let ch = if is_shared(byte) {
            char::from(byte)
        } else if is_letter(byte) {
            char::from_u32(u32::from(byte) + 0x5e0).unwrap_or(REPLACEMENT)
        } else {
            SPECIALS
                .iter()
                .find(|(position, _)| *position == byte)
                .map_or(REPLACEMENT, |(_, ch)| *ch)
        };
        out.push(ch);
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let ch = single(sequence)?;
        let code = u32::from(ch);

        let byte = if let Some(byte) = u8::try_from(code).ok().filter(|&b| is_shared(b)) {
            byte
        } else if (0x621..=0x63a).contains(&code) || (0x640..=0x652).contains(&code) {
            u8::try_from(code - 0x5e0).ok()?
        } else {
            SPECIALS.iter().find(|(_, c)| *c == ch).map(|(position, _)| *position)?
        };

        Some(vec![byte + base])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> String {
        let arabic = Arabic::new();
        let mut out = String::new();
        for &b in bytes {
            arabic.decode(b, &mut out);
        }
        out
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_all(b"\x41\x2c\x24 1"), "\u{621}\u{60c}\u{a4} 1");
        // Latin letters have no place in this set
        assert_eq!(decode_all(b"\x73"), "\u{fffd}");
    }

    #[test]
    fn test_encode() {
        let arabic = Arabic::new();
        assert_eq!(arabic.encode(&['\u{628}'], 0), Some(vec![0x48]));
        assert_eq!(arabic.encode(&['\u{652}'], 0), Some(vec![0x72]));
        assert_eq!(arabic.encode(&['\u{61f}'], 0x80), Some(vec![0xbf]));
        assert_eq!(arabic.encode(&['1'], 0), Some(vec![0x31]));
        assert_eq!(arabic.encode(&['A'], 0), None);
        assert_eq!(arabic.encode(&['$'], 0), None);
    }
}
