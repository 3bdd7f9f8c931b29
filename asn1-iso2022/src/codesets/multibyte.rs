//! 94x94 multiple-byte sets backed by `encoding_rs` EUC tables

use std::sync::atomic::{AtomicU16, Ordering};

use asn1_core::CodesetType;
use encoding_rs::Encoding;

use super::single;
use crate::codeset::{CodesetIdentity, GraphicCodeset, REPLACEMENT};

/// No lead byte pending
const EMPTY: u16 = 0;
/// Marks a stored lead byte (the low byte holds it)
const PENDING: u16 = 0x100;

/// A two-byte 94x94 set
///
/// A character is two code positions in 2/1-7/14; the pair corresponds to the
/// EUC byte pair with the top bit set on both. The first position is held
/// until the second arrives, so a dangling lead byte is reported by
/// [`GraphicCodeset::finish`].
#[derive(Debug)]
pub struct EucMultibyte {
    number: u32,
    encoding: &'static Encoding,
    lead: AtomicU16,
}

impl EucMultibyte {
    /// Look up a built-in multiple-byte set by registration number
    pub fn for_registration(number: u32) -> Option<Self> {
        let encoding = match number {
            // JIS C 6226-1978 and JIS X 0208-1983
            42 | 168 => encoding_rs::EUC_JP,
            // GB 2312, the 94x94 area of GBK
            58 => encoding_rs::GBK,
            // KS C 5601, the 94x94 area of windows-949
            149 => encoding_rs::EUC_KR,
            _ => return None,
        };

        Some(Self {
            number,
            encoding,
            lead: AtomicU16::new(EMPTY),
        })
    }

    fn take_lead(&self) -> Option<u8> {
        match self.lead.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            stored => Some((stored & 0xff) as u8),
        }
    }
}

fn is_position(byte: u8) -> bool {
    (0x21..=0x7e).contains(&byte)
}

impl CodesetIdentity for EucMultibyte {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::Multibyte
    }
}

impl GraphicCodeset for EucMultibyte {
    fn decode(&self, byte: u8, out: &mut String) {
        if !is_position(byte) {
            // SPACE and DELETE are not part of the 94x94 area
            self.finish(out);
            out.push(if byte == 0x20 { ' ' } else { REPLACEMENT });
            return;
        }

        match self.take_lead() {
            None => self.lead.store(PENDING | u16::from(byte), Ordering::Release),
            Some(lead) => {
                let pair = [lead | 0x80, byte | 0x80];
                let (text, had_errors) = self.encoding.decode_without_bom_handling(&pair);
                if had_errors || text.chars().count() != 1 {
                    out.push(REPLACEMENT);
                } else {
                    out.push_str(&text);
                }
            }
        }
    }

    fn finish(&self, out: &mut String) {
        if self.take_lead().is_some() {
            out.push(REPLACEMENT);
        }
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let mut buffer = [0u8; 4];
        let text = single(sequence)?.encode_utf8(&mut buffer);

        let (bytes, _, had_errors) = self.encoding.encode(text);
        match *bytes {
            [lead, trail]
                if !had_errors
                    && (0xa1..=0xfe).contains(&lead)
                    && (0xa1..=0xfe).contains(&trail) =>
            {
                Some(vec![lead - 0x80 + base, trail - 0x80 + base])
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jis_pair() {
        let jis = EucMultibyte::for_registration(168).unwrap();
        let mut out = String::new();
        // U+3042 is 2/4 2/2 in JIS X 0208
        jis.decode(0x24, &mut out);
        assert_eq!(out, "");
        jis.decode(0x22, &mut out);
        assert_eq!(out, "\u{3042}");
        assert_eq!(jis.encode(&['\u{3042}'], 0), Some(vec![0x24, 0x22]));
        assert_eq!(jis.encode(&['\u{3042}'], 0x80), Some(vec![0xa4, 0xa2]));
    }

    #[test]
    fn test_dangling_lead_byte() {
        let jis = EucMultibyte::for_registration(42).unwrap();
        let mut out = String::new();
        jis.decode(0x24, &mut out);
        jis.finish(&mut out);
        assert_eq!(out, "\u{fffd}");
        // Nothing left over after finish
        jis.finish(&mut out);
        assert_eq!(out, "\u{fffd}");
    }

    #[test]
    fn test_space_interrupts_pair() {
        let ksc = EucMultibyte::for_registration(149).unwrap();
        let mut out = String::new();
        ksc.decode(0x30, &mut out);
        ksc.decode(0x20, &mut out);
        assert_eq!(out, "\u{fffd} ");
    }

    #[test]
    fn test_rejects_single_byte_characters() {
        let gb = EucMultibyte::for_registration(58).unwrap();
        assert_eq!(gb.encode(&['A'], 0), None);
        assert_eq!(gb.encode(&['\u{4e2d}'], 0), Some(vec![0x56, 0x50]));
    }
}
