//! ISO IR 100, right-hand part of ISO 8859-1

use asn1_core::CodesetType;

use crate::codeset::{registry, CodesetIdentity, GraphicCodeset};

/// Precompose a Latin base letter with one combining mark
///
/// Returns the ISO 8859-1 code point of the composed letter. Case is carried
/// by bit 5, which is the same for the base letter and the result.
fn compose(base: char, mark: char) -> Option<u8> {
    let case = (u32::from(base) & 0x20) as u8;

    let upper = match (base, mark) {
        ('A' | 'a', '\u{300}') => 0xc0,
        ('A' | 'a', '\u{301}') => 0xc1,
        ('A' | 'a', '\u{302}') => 0xc2,
        ('A' | 'a', '\u{303}') => 0xc3,
        ('A' | 'a', '\u{308}') => 0xc4,
        ('A' | 'a', '\u{30a}') => 0xc5,
        ('C' | 'c', '\u{327}') => 0xc7,
        ('E' | 'e', '\u{300}') => 0xc8,
        ('E' | 'e', '\u{301}') => 0xc9,
        ('E' | 'e', '\u{302}') => 0xca,
        ('E' | 'e', '\u{308}') => 0xcb,
        ('I' | 'i' | '\u{131}', '\u{300}') => 0xcc,
        ('I' | 'i' | '\u{131}', '\u{301}') => 0xcd,
        ('I' | 'i' | '\u{131}', '\u{302}') => 0xce,
        ('I' | 'i' | '\u{131}', '\u{308}') => 0xcf,
        ('N' | 'n', '\u{303}') => 0xd1,
        ('O' | 'o', '\u{300}') => 0xd2,
        ('O' | 'o', '\u{301}') => 0xd3,
        ('O' | 'o', '\u{302}') => 0xd4,
        ('O' | 'o', '\u{303}') => 0xd5,
        ('O' | 'o', '\u{308}') => 0xd6,
        ('U' | 'u', '\u{300}') => 0xd9,
        ('U' | 'u', '\u{301}') => 0xda,
        ('U' | 'u', '\u{302}') => 0xdb,
        ('U' | 'u', '\u{308}') => 0xdc,
        ('Y' | 'y', '\u{301}') => 0xdd,
        // There is no capital Y with diaeresis in Latin-1
        ('y', '\u{308}') => return Some(0xff),
        _ => return None,
    };

    Some(upper | case)
}

/// 96-character set mapping 2/0-7/15 onto U+00A0-U+00FF
///
/// Also accepts a base letter followed by a single combining mark when
/// Latin-1 has the precomposed letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latin1;

impl Latin1 {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for Latin1 {
    fn registration_number(&self) -> u32 {
        registry::LATIN_1
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G96
    }
}

impl GraphicCodeset for Latin1 {
    fn decode(&self, byte: u8, out: &mut String) {
        out.push(char::from(byte | 0x80));
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let code = match *sequence {
            [ch] => u8::try_from(ch).ok().filter(|&b| b >= 0xa0)?,
            [letter, mark] => compose(letter, mark)?,
            _ => return None,
        };
        Some(vec![code - 0x80 + base])
    }
}
