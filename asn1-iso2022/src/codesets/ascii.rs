//! ISO 646: the international reference version (ASCII) and national variants

use asn1_core::CodesetType;

use super::single;
use crate::codeset::{registry, CodesetIdentity, GraphicCodeset};

/// ISO IR 6, ASCII
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascii;

impl Ascii {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for Ascii {
    fn registration_number(&self) -> u32 {
        registry::ASCII
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Ascii {
    fn decode(&self, byte: u8, out: &mut String) {
        out.push(char::from(byte));
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let ch = u8::try_from(single(sequence)?).ok()?;
        (0x20..=0x7f).contains(&ch).then(|| vec![ch + base])
    }
}

/// A national variant of ISO 646
///
/// ISO 646 leaves twelve positions (2/3, 2/4, 4/0, 5/11-5/14, 6/0, 7/11-7/14)
/// to national use. A position keeps its ASCII meaning unless the variant
/// replaces it.
#[derive(Debug, Clone, Copy)]
pub struct Iso646 {
    number: u32,
    replaced: &'static [(u8, char)],
}

impl Iso646 {
    /// Look up a built-in variant by registration number
    pub fn variant(number: u32) -> Option<Self> {
        let replaced: &'static [(u8, char)] = match number {
            // ISO 646 IRV (1973)
            2 => &[(0x24, '\u{a4}'), (0x7e, '\u{203e}')],
            // BS 4730, United Kingdom
            4 => &[(0x23, '\u{a3}'), (0x7e, '\u{203e}')],
            // SEN 850200 B, Sweden and Finland
            10 => &[
                (0x24, '\u{a4}'),
                (0x5b, '\u{c4}'),
                (0x5c, '\u{d6}'),
                (0x5d, '\u{c5}'),
                (0x7b, '\u{e4}'),
                (0x7c, '\u{f6}'),
                (0x7d, '\u{e5}'),
                (0x7e, '\u{203e}'),
            ],
            // SEN 850200 C, Swedish names
            11 => &[
                (0x24, '\u{a4}'),
                (0x40, '\u{c9}'),
                (0x5b, '\u{c4}'),
                (0x5c, '\u{d6}'),
                (0x5d, '\u{c5}'),
                (0x5e, '\u{dc}'),
                (0x60, '\u{e9}'),
                (0x7b, '\u{e4}'),
                (0x7c, '\u{f6}'),
                (0x7d, '\u{e5}'),
                (0x7e, '\u{fc}'),
            ],
            // JIS C 6220 Roman
            14 => &[(0x5c, '\u{a5}'), (0x7e, '\u{203e}')],
            // UNI 0204-70, Italy
            15 => &[
                (0x23, '\u{a3}'),
                (0x40, '\u{a7}'),
                (0x5b, '\u{b0}'),
                (0x5c, '\u{e7}'),
                (0x5d, '\u{e9}'),
                (0x60, '\u{f9}'),
                (0x7b, '\u{e0}'),
                (0x7c, '\u{f2}'),
                (0x7d, '\u{e8}'),
                (0x7e, '\u{ec}'),
            ],
            // Spain
            17 => &[
                (0x23, '\u{a3}'),
                (0x40, '\u{a7}'),
                (0x5b, '\u{a1}'),
                (0x5c, '\u{d1}'),
                (0x5d, '\u{bf}'),
                (0x7b, '\u{b0}'),
                (0x7c, '\u{f1}'),
                (0x7d, '\u{e7}'),
            ],
            // DIN 66003, Germany
            21 => &[
                (0x40, '\u{a7}'),
                (0x5b, '\u{c4}'),
                (0x5c, '\u{d6}'),
                (0x5d, '\u{dc}'),
                (0x7b, '\u{e4}'),
                (0x7c, '\u{f6}'),
                (0x7d, '\u{fc}'),
                (0x7e, '\u{df}'),
            ],
            // NS 4551-1, Norway
            60 => &[
                (0x5b, '\u{c6}'),
                (0x5c, '\u{d8}'),
                (0x5d, '\u{c5}'),
                (0x7b, '\u{e6}'),
                (0x7c, '\u{f8}'),
                (0x7d, '\u{e5}'),
                (0x7e, '\u{203e}'),
            ],
            // NF Z 62-010 (1982), France
            69 => &[
                (0x23, '\u{a3}'),
                (0x40, '\u{e0}'),
                (0x5b, '\u{b0}'),
                (0x5c, '\u{e7}'),
                (0x5d, '\u{a7}'),
                (0x60, '\u{b5}'),
                (0x7b, '\u{e9}'),
                (0x7c, '\u{f9}'),
                (0x7d, '\u{e8}'),
                (0x7e, '\u{a8}'),
            ],
            _ => return None,
        };

        Some(Self { number, replaced })
    }

    fn replacement(&self, byte: u8) -> Option<char> {
        self.replaced
            .iter()
            .find(|(position, _)| *position == byte)
            .map(|(_, ch)| *ch)
    }
}

impl CodesetIdentity for Iso646 {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Iso646 {
    fn decode(&self, byte: u8, out: &mut String) {
        out.push(self.replacement(byte).unwrap_or(char::from(byte)));
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let ch = single(sequence)?;

        if let Some(&(position, _)) = self.replaced.iter().find(|(_, c)| *c == ch) {
            return Some(vec![position + base]);
        }

        let byte = u8::try_from(ch).ok().filter(|b| (0x20..=0x7f).contains(b))?;
        if self.replacement(byte).is_some() {
            return None;
        }
        Some(vec![byte + base])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_round_trip() {
        let ascii = Ascii::new();
        let mut out = String::new();
        ascii.decode(b'A', &mut out);
        assert_eq!(out, "A");
        assert_eq!(ascii.encode(&['A'], 0), Some(vec![0x41]));
        assert_eq!(ascii.encode(&['A'], 0x80), Some(vec![0xc1]));
    }

    #[test]
    fn test_ascii_rejects() {
        let ascii = Ascii::new();
        assert_eq!(ascii.encode(&['\u{e9}'], 0), None);
        assert_eq!(ascii.encode(&['\n'], 0), None);
        assert_eq!(ascii.encode(&['e', '\u{301}'], 0), None);
    }

    #[test]
    fn test_german_variant() {
        let din = Iso646::variant(21).unwrap();
        let mut out = String::new();
        for &b in b"Gr}\x7e[" {
            din.decode(b, &mut out);
        }
        assert_eq!(out, "Grü\u{df}Ä");
        assert_eq!(din.encode(&['\u{fc}'], 0), Some(vec![0x7d]));
        // The ASCII character displaced by the variant is not available
        assert_eq!(din.encode(&['}'], 0), None);
        // Unchanged national positions keep ASCII
        assert_eq!(din.encode(&['#'], 0), Some(vec![0x23]));
    }

    #[test]
    fn test_unknown_variant() {
        assert!(Iso646::variant(6).is_none());
        assert!(Iso646::variant(8).is_none());
    }
}
