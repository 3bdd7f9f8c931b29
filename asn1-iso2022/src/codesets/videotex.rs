//! ISO IR 72 / 173, third supplementary set of mosaic characters
//!
//! Many of the mosaic cells have no Unicode equivalent and decode to U+FFFD.

use asn1_core::{CodeElement, CodesetType};

use super::{NE, single, table_decode, table_encode};
use crate::codeset::{registry, CodesetIdentity, GraphicCodeset};
use crate::tables::{self, intermediate, ESC};

static MOSAIC_MAP: [u16; 96] = [
    NE, 0x2528, 0x2512, 0x2511, 0x251a, 0x2519, 0x2520, 0x2538, //
    0x2530, 0x2516, 0x2515, 0x250d, 0x250e, 0x2542, NE, 0x258c, //
    0x2503, 0x2501, 0x250f, 0x2513, 0x2517, 0x251b, 0x2523, 0x252b, //
    0x2533, 0x253b, 0x254b, 0x2580, 0x2584, 0x2588, 0x25aa, 0x2590, //
    0x2537, 0x252f, 0x251d, 0x2525, NE, NE, NE, NE, //
    NE, NE, NE, NE, 0x253f, 0x2022, 0x25cf, 0x25cb, //
    0x2502, 0x2500, 0x250c, 0x2510, 0x2514, 0x2518, 0x251c, 0x2524, //
    0x252c, 0x2534, 0x253c, 0x2192, 0x2190, 0x2191, 0x2193, 0x2591, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    NE, NE, NE, NE, NE, NE, 0x2592, 0x2593, //
    NE, NE, NE, NE, NE, NE, NE, NE, //
    NE, NE, NE, NE, NE, NE, NE, NE,
];

/// Mosaic set 3, shared by its original and revised registrations
///
/// Both registrations use final byte 6/4; the revision is designated with a
/// leading IDENTIFY REVISED REGISTRATION (`ESC 2/6 4/0`).
#[derive(Debug, Clone, Copy)]
pub struct Mosaic {
    number: u32,
}

impl Mosaic {
    /// ISO IR 72
    pub fn original() -> Self {
        Self {
            number: registry::MOSAIC_3,
        }
    }

    /// ISO IR 173
    pub fn revised() -> Self {
        Self {
            number: registry::MOSAIC_3_REVISED,
        }
    }
}

impl CodesetIdentity for Mosaic {
    fn registration_number(&self) -> u32 {
        self.number
    }

    fn codeset_type(&self) -> CodesetType {
        CodesetType::G94
    }
}

impl GraphicCodeset for Mosaic {
    fn decode(&self, byte: u8, out: &mut String) {
        out.push(table_decode(&MOSAIC_MAP, byte));
    }

    fn invoke(&self, element: CodeElement) -> Option<Vec<u8>> {
        let mut sequence = vec![ESC, intermediate::REVISED_REGISTRATION, 0x40];
        sequence.extend(tables::designation(
            registry::MOSAIC_3_REVISED,
            CodesetType::G94,
            element,
        )?);
        Some(sequence)
    }

    fn encode(&self, sequence: &[char], base: u8) -> Option<Vec<u8>> {
        let byte = table_encode(&MOSAIC_MAP, single(sequence)?)?;
        Some(vec![byte + base])
    }
}
