//! ISO IR 13, JIS C 6220 katakana

use asn1_core::CodesetType;

use super::single;
use crate::codeset::{registry, CodesetIdentity, GraphicCodeset, REPLACEMENT};

/// Half-width katakana at 2/1-5/15, mapped onto U+FF61-U+FF9F
#[derive(Debug, Clone, Copy, Default)]
pub struct Katakana;

impl Katakana {
    pub fn new() -> Self {
        Self
    }
}

impl CodesetIdentity for Katakana {
    fn registration_number(&self) -> u32 {
        registry::KATAKANA
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Katakana {
    fn decode(&self, byte: u8, out: &mut String) {
        if byte == 0x20 || byte >= 0x60 {
            out.push(REPLACEMENT);
        } else {
            out.push(char::from_u32(0xff40 + u32::from(byte)).unwrap_or(REPLACEMENT));
        }
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let ch = u32::from(single(sequence)?);
        if !(0xff61..=0xff9f).contains(&ch) {
            return None;
        }
        let byte = u8::try_from(ch - 0xff40).ok()?;
        Some(vec![byte + base])
    }
}
